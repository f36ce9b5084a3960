//! Greeting prompt definition.

use chrono::{DateTime, Local, TimeZone};
use std::collections::HashMap;

use super::PromptDefinition;

/// Timestamp layout embedded in the greeting.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A greeting that tells the user the server's current local time.
pub struct GreetingPrompt;

impl GreetingPrompt {
    /// Render the greeting for a given instant.
    pub fn render_at<Tz>(now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format!(
            "Hello, I am a server built on the Model Context Protocol.\n\
             The current time is {}.\n\
             \n\
             Is there anything I can help you with?",
            now.format(TIMESTAMP_FORMAT)
        )
    }
}

impl PromptDefinition for GreetingPrompt {
    const NAME: &'static str = "greeting";
    const DESCRIPTION: &'static str = "A greeting prompt that includes the current time";

    fn render(_arguments: &HashMap<String, String>) -> String {
        Self::render_at(&Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Utc};

    /// Find a `YYYY-MM-DD HH:MM:SS` timestamp anywhere in the text.
    fn find_timestamp(text: &str) -> Option<NaiveDateTime> {
        let width = "2000-01-01 00:00:00".len();
        text.char_indices().find_map(|(start, _)| {
            text.get(start..start + width)
                .and_then(|slice| NaiveDateTime::parse_from_str(slice, TIMESTAMP_FORMAT).ok())
        })
    }

    #[test]
    fn test_greeting_prompt_metadata() {
        assert_eq!(GreetingPrompt::NAME, "greeting");
        assert!(!GreetingPrompt::DESCRIPTION.is_empty());
        assert!(GreetingPrompt::arguments().is_empty());
    }

    #[test]
    fn test_render_at_fixed_time() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 9, 7, 5, 1).unwrap();
        let text = GreetingPrompt::render_at(&instant);
        assert!(text.contains("2025-03-09 07:05:01"));
    }

    #[test]
    fn test_render_contains_current_timestamp() {
        let text = GreetingPrompt::render(&HashMap::new());
        assert!(!text.is_empty());
        assert!(find_timestamp(&text).is_some(), "no timestamp in: {text}");
    }
}
