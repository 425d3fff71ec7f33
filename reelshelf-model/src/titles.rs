//! Sort-key derivation for display titles.

const LEADING_ARTICLE: &str = "the ";

/// Derive the key used for alphabetical ordering from a display title.
///
/// The whole title is lower-cased, then a single leading `"the "` is
/// removed. Other articles are kept, and `"Theatre"` stays intact because the
/// article must be followed by a space.
///
/// ```
/// use reelshelf_model::orderable_title;
///
/// assert_eq!(orderable_title("The Godfather"), "godfather");
/// assert_eq!(orderable_title("A Clockwork Orange"), "a clockwork orange");
/// ```
pub fn orderable_title(title: &str) -> String {
    let lower = title.to_lowercase();
    match lower.strip_prefix(LEADING_ARTICLE) {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}
