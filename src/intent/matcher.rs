//! Keyword matching of free text against the command table

use crate::intent::table::{Command, COMMANDS};

/// A matcher hit: which command fired and on which phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentMatch {
    pub command: &'static Command,
    pub trigger: &'static str,
}

/// Case-fold and trim user input
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Find the first command whose trigger occurs in `text`
///
/// `text` is normalized here, so callers may pass raw input. Commands are
/// tried in table order and triggers in list order; an earlier command wins
/// even when a later one has a longer matching phrase.
pub fn match_intent(text: &str) -> Option<IntentMatch> {
    let normalized = normalize(text);
    COMMANDS.iter().find_map(|command| {
        command
            .triggers
            .iter()
            .find(|trigger| normalized.contains(*trigger))
            .map(|trigger| IntentMatch {
                command,
                trigger: *trigger,
            })
    })
}

/// Same as [`match_intent`], without the trigger
pub fn match_command(text: &str) -> Option<&'static Command> {
    match_intent(text).map(|m| m.command)
}

/// Text following the fired trigger, e.g. the query of a search
///
/// Returns `None` when nothing but whitespace follows.
pub fn trailing_text(normalized: &str, trigger: &str) -> Option<String> {
    let start = normalized.find(trigger)? + trigger.len();
    let rest = normalized[start..].trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id_of(text: &str) -> Option<&'static str> {
        match_command(text).map(|c| c.id)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Open WhatsApp NOW \n"), "open whatsapp now");
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        assert_eq!(id_of("Open WhatsApp now"), Some("open-whatsapp"));
        assert_eq!(id_of("please TURN ON FLASHLIGHT"), Some("flashlight-on"));
        assert_eq!(id_of("could you make dimmer the screen"), Some("brightness-dim"));
    }

    #[test]
    fn test_search_wins_over_bare_youtube() {
        let hit = match_intent("search youtube for lofi beats").unwrap();
        assert_eq!(hit.command.id, "search-youtube");
        assert_eq!(hit.trigger, "search youtube for");
        assert_eq!(id_of("youtube search cats"), Some("search-youtube"));
        assert_eq!(id_of("launch youtube"), Some("open-youtube"));
    }

    #[test]
    fn test_table_order_beats_specificity() {
        // whatsapp is declared first, so it wins even though
        // "turn on flashlight" is the longer phrase
        assert_eq!(id_of("turn on flashlight and open whatsapp"), Some("open-whatsapp"));
        assert_eq!(id_of("torch off then torch on"), Some("flashlight-on"));
    }

    #[test]
    fn test_first_trigger_in_list_order_is_reported() {
        let hit = match_intent("open whatsapp").unwrap();
        assert_eq!(hit.trigger, "open whatsapp");
        let hit = match_intent("whatsapp please").unwrap();
        assert_eq!(hit.trigger, "whatsapp");
    }

    #[test]
    fn test_no_match() {
        assert!(match_command("hello there").is_none());
        assert!(match_command("").is_none());
        assert!(match_command("   ").is_none());
    }

    #[test]
    fn test_trailing_text() {
        assert_eq!(
            trailing_text("search youtube for lofi beats", "search youtube for"),
            Some("lofi beats".to_string())
        );
        assert_eq!(trailing_text("search youtube for   ", "search youtube for"), None);
        assert_eq!(trailing_text("nothing here", "search youtube for"), None);
    }

    proptest! {
        #[test]
        fn prop_any_trigger_with_neutral_padding_matches_its_command(
            idx in 0..COMMANDS.len(),
            prefix in "[0-9 ]{0,12}",
            suffix in "[0-9 ]{0,12}",
            upper in any::<bool>(),
        ) {
            let command = &COMMANDS[idx];
            for trigger in command.triggers {
                let phrase = if upper { trigger.to_uppercase() } else { trigger.to_string() };
                let input = format!("{}{}{}", prefix, phrase, suffix);
                let found = match_command(&input).map(|c| c.id);
                // a trigger may itself contain an earlier command's trigger
                let earlier = COMMANDS[..idx]
                    .iter()
                    .find(|c| c.triggers.iter().any(|t| trigger.contains(t)));
                match earlier {
                    Some(first) => {
                        prop_assert_eq!(found, Some(first.id));
                    }
                    None => {
                        prop_assert_eq!(found, Some(command.id));
                    }
                }
            }
        }

        #[test]
        fn prop_digits_and_spaces_never_match(input in "[0-9 ]{0,40}") {
            prop_assert!(match_command(&input).is_none());
        }

        #[test]
        fn prop_matching_is_idempotent(input in ".{0,40}") {
            prop_assert_eq!(match_command(&input), match_command(&input));
        }
    }
}
