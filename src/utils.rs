//! Text normalization helpers shared by the loader, classifier and scorers.

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Normalize text for scoring, returning `None` when nothing but whitespace remains.
pub fn scorable_text(text: Option<&str>) -> Option<String> {
    let normalized = normalize_inline_whitespace(text?);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Split text into lowercase word tokens.
///
/// Hashtags and mentions keep their word part (`#Banjir` -> `banjir`).
/// Apostrophes inside words are kept so negations like `don't` survive.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_inline_whitespace_collapses_runs() {
        let input = "Alpha\n\n  Beta\tGamma";
        assert_eq!(normalize_inline_whitespace(input), "Alpha Beta Gamma");
    }

    #[test]
    fn scorable_text_rejects_blank_and_missing() {
        assert_eq!(scorable_text(None), None);
        assert_eq!(scorable_text(Some("")), None);
        assert_eq!(scorable_text(Some(" \t\n ")), None);
        assert_eq!(
            scorable_text(Some("  flood   warning ")),
            Some("flood warning".to_string())
        );
    }

    #[test]
    fn word_tokens_strip_punctuation_and_keep_negations() {
        assert_eq!(
            word_tokens("#Banjir! Rescue teams DON'T stop, 'great' work."),
            vec!["banjir", "rescue", "teams", "don't", "stop", "great", "work"]
        );
        assert!(word_tokens("!!! ...").is_empty());
    }
}
