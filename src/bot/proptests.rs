//! Property-based tests for the rule-matching strategy
//!
//! Verifies that matching is total, drawn from the fixed reply set, and
//! insensitive to ASCII case.

use super::rules::{reply_to, MENU_REPLY, RULES};
use proptest::prelude::*;

proptest! {
    #[test]
    fn reply_is_always_from_the_table(input in "[ -~]{0,80}") {
        let reply = reply_to(&input);
        let known = reply == MENU_REPLY || RULES.iter().any(|rule| rule.reply == reply);
        prop_assert!(known, "unexpected reply: {reply}");
    }

    #[test]
    fn matching_ignores_ascii_case(input in "[ -~]{0,80}") {
        prop_assert_eq!(reply_to(&input), reply_to(&input.to_uppercase()));
        prop_assert_eq!(reply_to(&input), reply_to(&input.to_lowercase()));
    }

    #[test]
    fn appointment_always_wins(tail in "[a-z ]{0,40}") {
        // "appointment" is the highest-priority rule, so nothing in the
        // tail can preempt it.
        let input = format!("appointment {tail}");
        prop_assert_eq!(reply_to(&input), RULES[0].reply);
    }
}
