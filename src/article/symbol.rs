//! Token symbol derivation.

/// Prefix of every minted coin symbol.
pub const COIN_SYMBOL_PREFIX: &str = "PM-";

/// Symbol written into the metadata document: first four characters of the
/// title, uppercased. Leading whitespace is skipped, so any title that passes
/// draft validation yields a non-blank symbol.
pub fn metadata_symbol(title: &str) -> String {
    title.trim_start().chars().take(4).collect::<String>().to_uppercase()
}

/// Coin symbol: `PM-` followed by the uppercased initial of each
/// whitespace-delimited word. Total over all inputs.
pub fn coin_symbol(title: &str) -> String {
    let initials: String = title
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    format!("{}{}", COIN_SYMBOL_PREFIX, initials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_symbol() {
        assert_eq!(coin_symbol(""), "PM-");
        assert_eq!(coin_symbol("   "), "PM-");
        assert_eq!(coin_symbol("Hello World"), "PM-HW");
        assert_eq!(coin_symbol("x"), "PM-X");
        assert_eq!(coin_symbol("  the\tquick\nbrown  fox "), "PM-TQBF");
        assert_eq!(coin_symbol("über 42 cats"), "PM-Ü4C");
    }

    #[test]
    fn test_metadata_symbol() {
        assert_eq!(metadata_symbol("Hello World"), "HELL");
        assert_eq!(metadata_symbol("ab"), "AB");
        assert_eq!(metadata_symbol(""), "");
        assert_eq!(metadata_symbol("ñandú"), "ÑAND");
        assert_eq!(metadata_symbol("    Hello World"), "HELL");
        assert_eq!(metadata_symbol("\n\tab cd"), "AB C");
    }
}
