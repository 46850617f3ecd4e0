//! Offline keyword-matching strategy
//!
//! A fixed priority list of trigger substrings, evaluated in order against
//! the lower-cased utterance. No tokenization, no word boundaries: "hi"
//! matches inside "which", and that is observable behavior callers rely on.

use super::error::BotError;
use super::types::ChatMessage;
use super::Bot;
use async_trait::async_trait;

/// One entry in the priority list: any trigger matching selects the reply.
pub struct Rule {
    pub triggers: &'static [&'static str],
    pub reply: &'static str,
}

/// Ordered priority list; the first rule whose triggers match wins.
///
/// Overlaps are resolved by position ("emergency department" is an
/// emergency, not a department query), so this must stay a list, not a map.
pub const RULES: &[Rule] = &[
    Rule {
        triggers: &["appointment"],
        reply: "📅 You can book an appointment by calling our reception at +91-1234567890.",
    },
    Rule {
        triggers: &["visiting hours", "visit time"],
        reply: "🕙 Visiting hours are 10 AM - 1 PM and 5 PM - 7 PM daily.",
    },
    Rule {
        triggers: &["emergency", "chest pain"],
        reply: "⚠️ This seems urgent. Please call 108 or go to the nearest emergency room immediately.",
    },
    Rule {
        triggers: &["department", "doctor"],
        reply: "🏥 We have Cardiology, Neurology, Pediatrics, and General Medicine departments.",
    },
    Rule {
        triggers: &["hello", "hi"],
        reply: "Hello 👋 I’m your hospital assistant bot. How can I help you today?",
    },
];

/// Reply when no rule matches, listing the supported topics.
pub const MENU_REPLY: &str =
    "I can help with appointments, visiting hours, departments, and emergencies.";

/// Match an utterance against the rule table. Total: always returns a reply.
pub fn reply_to(utterance: &str) -> &'static str {
    let normalized = utterance.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| normalized.contains(t)))
        .map_or(MENU_REPLY, |rule| rule.reply)
}

/// Rule-table strategy: no I/O, never fails.
pub struct RuleBot;

#[async_trait]
impl Bot for RuleBot {
    async fn reply(&self, history: &[ChatMessage]) -> Result<String, BotError> {
        // The final history element regardless of role; the endpoint
        // rejects empty histories before we get here.
        let utterance = history.last().map_or("", |m| m.content.as_str());
        Ok(reply_to(utterance).to_string())
    }

    fn name(&self) -> &str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::types::Role;

    #[test]
    fn test_each_topic_matches_its_rule() {
        assert_eq!(reply_to("I want to book an appointment"), RULES[0].reply);
        assert_eq!(reply_to("what are your visiting hours?"), RULES[1].reply);
        assert_eq!(reply_to("what is the visit time"), RULES[1].reply);
        assert_eq!(reply_to("I have chest pain"), RULES[2].reply);
        assert_eq!(reply_to("which departments do you have"), RULES[3].reply);
        assert_eq!(reply_to("I think I need a doctor"), RULES[3].reply);
        assert_eq!(reply_to("hello there"), RULES[4].reply);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(reply_to("APPOINTMENT"), RULES[0].reply);
        assert_eq!(reply_to("Visiting Hours"), RULES[1].reply);
        assert_eq!(reply_to("EMERGENCY!"), RULES[2].reply);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        // Both the emergency and department rules match; emergency is earlier.
        assert_eq!(reply_to("where is the emergency department"), RULES[2].reply);
        // Appointment is the highest-priority rule.
        assert_eq!(reply_to("I need an emergency appointment"), RULES[0].reply);
    }

    #[test]
    fn test_emergency_beats_greeting() {
        assert_eq!(reply_to("Hello, any chest pain protocol?"), RULES[2].reply);
    }

    #[test]
    fn test_substring_semantics_are_preserved() {
        // "which" contains "hi", but the department rule is earlier.
        assert_eq!(reply_to("which department is on floor 2"), RULES[3].reply);
        // With no earlier rule in play, "hi" inside a word still greets.
        assert_eq!(reply_to("this is a hit"), RULES[4].reply);
    }

    #[test]
    fn test_empty_and_unmatched_input_gets_menu() {
        assert_eq!(reply_to(""), MENU_REPLY);
        assert_eq!(reply_to("what is the weather like"), MENU_REPLY);
    }

    #[tokio::test]
    async fn test_rule_bot_uses_final_history_element() {
        let history = vec![
            ChatMessage::new(Role::User, "hello"),
            ChatMessage::new(Role::Assistant, "Hello 👋"),
            ChatMessage::new(Role::User, "appointment please"),
        ];
        let reply = RuleBot.reply(&history).await.unwrap();
        assert_eq!(reply, RULES[0].reply);
    }

    #[tokio::test]
    async fn test_rule_bot_empty_history_gets_menu() {
        let reply = RuleBot.reply(&[]).await.unwrap();
        assert_eq!(reply, MENU_REPLY);
    }
}
