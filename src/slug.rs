//! URL slug generation

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid slug pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid slug pattern"));
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid slug pattern"));

/// Derive a URL slug from a title
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// hyphens, turns whitespace runs into single hyphens, collapses repeated
/// hyphens and trims hyphens from both ends. Non-ASCII letters are dropped.
///
/// Uniqueness against stored items is not checked here.
///
/// # Example
/// ```
/// use site_content::slugify;
///
/// assert_eq!(slugify("Hello, World!  Foo--Bar"), "hello-world-foo-bar");
/// assert_eq!(slugify("   "), "");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches(|c: char| c == '-' || c.is_whitespace()).to_string()
}
