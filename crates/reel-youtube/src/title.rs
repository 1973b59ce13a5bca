//! Title sanitation for the YouTube 100-character limit.

use regex::Regex;
use std::sync::OnceLock;

/// YouTube's hard title length limit.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Used when sanitation leaves nothing usable.
pub const DEFAULT_TITLE: &str = "Le meilleur des clips Twitch du Jour";

fn symbol_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Keep word chars, whitespace and common punctuation; emoji and other
    // symbols get stripped.
    RE.get_or_init(|| Regex::new(r#"[^\w\s\-\.,'"!?|]"#).unwrap())
}

fn command_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Chat-bot commands like "!discord" are spam in a video title.
    RE.get_or_init(|| Regex::new(r"!\w+").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Sanitize a raw clip-derived title for upload.
///
/// Strips emoji and exotic symbols, removes `!command` mentions, collapses
/// whitespace, truncates to [`MAX_TITLE_LENGTH`] at a word boundary and
/// falls back to [`DEFAULT_TITLE`] when nothing survives.
pub fn clean_title(raw: &str) -> String {
    let cleaned = symbol_re().replace_all(raw, "");
    let cleaned = command_re().replace_all(&cleaned, "");
    let cleaned = whitespace_re().replace_all(&cleaned, " ");
    let cleaned = truncate_at_word(cleaned.trim(), MAX_TITLE_LENGTH);

    if cleaned.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        cleaned
    }
}

/// Truncate to at most `max_len` characters, cutting at the last full word
/// and appending an ellipsis.
fn truncate_at_word(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        return title.to_string();
    }

    let truncated: String = title.chars().take(max_len - 3).collect();
    let truncated = truncated.trim_end();
    // rfind returns a byte offset of the space, safe to slice at.
    let cut = match truncated.rfind(' ') {
        Some(idx) => truncated[..idx].trim_end(),
        None => truncated,
    };
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_title_unchanged() {
        assert_eq!(clean_title("Il gagne la partie !?"), "Il gagne la partie !?");
    }

    #[test]
    fn test_strips_emoji() {
        assert_eq!(clean_title("GG 🔥🔥 incroyable"), "GG incroyable");
    }

    #[test]
    fn test_strips_chat_commands() {
        assert_eq!(clean_title("Abonnez-vous !discord !prime"), "Abonnez-vous");
    }

    #[test]
    fn test_keeps_accents_and_pipe() {
        assert_eq!(
            clean_title("Soirée épique | Le Clip du Jour"),
            "Soirée épique | Le Clip du Jour"
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_title("  trop   de   blancs  "), "trop de blancs");
    }

    #[test]
    fn test_truncates_at_word_boundary() {
        let raw = "mot ".repeat(40);
        let cleaned = clean_title(&raw);
        assert!(cleaned.chars().count() <= MAX_TITLE_LENGTH);
        assert!(cleaned.ends_with("..."));
        // Never cuts in the middle of a word.
        assert!(cleaned.trim_end_matches("...").ends_with("mot"));
    }

    #[test]
    fn test_empty_input_gets_default() {
        assert_eq!(clean_title("🔥🔥🔥"), DEFAULT_TITLE);
        assert_eq!(clean_title(""), DEFAULT_TITLE);
    }
}
