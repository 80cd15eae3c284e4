//! URL slug generation

/// Build a URL slug from a display name.
///
/// Lowercases, strips anything that is not alphanumeric/space/hyphen, then
/// collapses whitespace runs into single hyphens.
pub fn slugify(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    cleaned
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Smartphones"), "smartphones");
        assert_eq!(slugify("Wearables & Audio"), "wearables-audio");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("  Budget   Laptops  "), "budget-laptops");
    }

    #[test]
    fn test_slugify_keeps_existing_hyphens() {
        assert_eq!(slugify("e-readers"), "e-readers");
    }
}
