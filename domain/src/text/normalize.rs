//! Comparison normalization.

/// Normalize text for comparison.
///
/// Lowercases, replaces every character that is not an ASCII letter or
/// digit with a space, collapses whitespace runs and trims.
///
/// ```
/// use duet_domain::text::normalize_for_comparison;
///
/// assert_eq!(normalize_for_comparison("  Let's   BEGIN!\n"), "let s begin");
/// ```
pub fn normalize_for_comparison(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| {
            let lower = c.to_ascii_lowercase();
            if lower.is_ascii_alphanumeric() {
                lower
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
