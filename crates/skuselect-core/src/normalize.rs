//! Stable slug identifiers for free-text attribute values.

/// Turns an attribute value into a deterministic slug.
///
/// Trims, lowercases, turns each run of whitespace or underscores into a
/// single hyphen, collapses repeated hyphens and strips a leading or
/// trailing hyphen. `"Light Blue"`, `"light_blue"` and `"  Light-Blue "` all
/// become `"light-blue"`. Degenerate input yields an empty string.
#[must_use]
pub fn normalize_option_value(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.trim().chars().flat_map(char::to_lowercase) {
        let c = if c.is_whitespace() || c == '_' { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    let slug = slug.strip_prefix('-').unwrap_or(&slug);
    let slug = slug.strip_suffix('-').unwrap_or(slug);
    slug.to_string()
}

/// Builds the option id `{group_key}-{slug}` for a raw value.
#[must_use]
pub fn option_id(group_key: &str, value: &str) -> String {
    format!("{group_key}-{}", normalize_option_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_equivalent_values_share_a_slug() {
        for raw in ["Light Blue", "light_blue", "  Light-Blue ", "LIGHT  __ blue"] {
            assert_eq!(normalize_option_value(raw), "light-blue", "input: {raw:?}");
        }
    }

    #[test]
    fn collapses_repeated_hyphens() {
        assert_eq!(normalize_option_value("a---b"), "a-b");
        assert_eq!(normalize_option_value("a - b"), "a-b");
    }

    #[test]
    fn strips_leading_and_trailing_hyphens() {
        assert_eq!(normalize_option_value("-xl-"), "xl");
        assert_eq!(normalize_option_value("_ 12 oz _"), "12-oz");
    }

    #[test]
    fn degenerate_input_is_empty() {
        assert_eq!(normalize_option_value(""), "");
        assert_eq!(normalize_option_value("   "), "");
        assert_eq!(normalize_option_value("-_-"), "");
    }

    #[test]
    fn keeps_punctuation_other_than_separators() {
        assert_eq!(normalize_option_value("8.5 fl. oz"), "8.5-fl.-oz");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "Light Blue",
            " -Sea_Salt & Sage- ",
            "XL",
            "--",
            "Ünïcode Mix",
            "tab\tseparated",
        ];
        for raw in samples {
            let once = normalize_option_value(raw);
            assert_eq!(normalize_option_value(&once), once, "input: {raw:?}");
        }
    }

    #[test]
    fn option_id_prefixes_group_key() {
        assert_eq!(option_id("color", "Light Blue"), "color-light-blue");
        assert_eq!(option_id("size", "M"), "size-m");
    }
}
