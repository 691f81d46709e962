//! Small text transformations shared by both providers.

use regex::Regex;
use std::sync::LazyLock;

static NON_ALNUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]").expect("Invalid non-alphanumeric regex"));

static UNDERSCORE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("Invalid underscore regex"));

static LIST_DELIMITER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[, ] *").expect("Invalid list delimiter regex"));

/// Turn a display name into an identifier usable as a profile or connection
/// name.
///
/// # Example
/// ```
/// use aip_cloud::text::snake_case;
///
/// assert_eq!(snake_case("Research Computing (Prod)"), "research_computing_prod");
/// ```
pub fn snake_case(value: &str) -> String {
    let lowered = value.to_lowercase();
    let replaced = NON_ALNUM_REGEX.replace_all(&lowered, "_");
    let collapsed = UNDERSCORE_RUN_REGEX.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}

/// Split a list argument such as `"a, b c"` on commas or spaces.
///
/// Empty input yields an empty list.
pub fn split_arguments(value: &str) -> Vec<String> {
    let value = value.trim();
    if value.is_empty() {
        return Vec::new();
    }
    LIST_DELIMITER_REGEX
        .split(value)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Sandbox", "sandbox")]
    #[case("  Dev -- Team  ", "dev_team")]
    #[case("ACME_Prod__East", "acme_prod_east")]
    #[case("Café Ops", "caf_ops")]
    #[case("123 Numbers", "123_numbers")]
    #[case("***", "")]
    fn test_snake_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(snake_case(input), expected);
    }

    #[rstest]
    #[case("", &[])]
    #[case("111", &["111"])]
    #[case("111,222", &["111", "222"])]
    #[case("111, 222  333", &["111", "222", "333"])]
    #[case("us-east-1,us-west-2,", &["us-east-1", "us-west-2"])]
    fn test_split_arguments(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(split_arguments(input), expected);
    }
}
