//! Text normalization shared by the rule-based detectors.

/// Lowercase, trim, fold typographic apostrophes and collapse whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| match c {
                    '\u{2019}' | '\u{2018}' | '\u{02BC}' | '`' => '\'',
                    other => other,
                })
                .collect::<String>()
                .to_lowercase()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  I CAN\u{2019}T   Sleep\n"), "i can't sleep");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t "), "");
    }
}
