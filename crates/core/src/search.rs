//! Name search helpers.

/// Default number of name-search results.
pub const DEFAULT_SEARCH_LIMIT: i64 = 50;

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// `%`, `_` and `\` in the user's text are escaped so they match literally.
///
/// # Examples
///
/// ```
/// use cinema_core::search::contains_pattern;
/// assert_eq!(contains_pattern("tom"), "%tom%");
/// assert_eq!(contains_pattern("100%"), "%100\\%%");
/// ```
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
