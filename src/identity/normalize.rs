//! Title normalization for name comparisons.

/// Fold full-width ASCII variants (`Ａ`, `１`, ideographic space) to half-width
fn fold_width(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        _ => c,
    }
}

/// Normalize a title for comparison: width-folded, lowercased, trimmed,
/// inner whitespace collapsed to single spaces.
pub fn normalize(name: &str) -> String {
    let folded: String = name.chars().map(fold_width).collect();
    folded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize free text for substring search.
///
/// Same transform as [`normalize`], so a normalized name is found in text
/// regardless of case, width or spacing differences.
pub fn normalize_text<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    let joined = parts.into_iter().flatten().collect::<Vec<_>>().join(" ");
    normalize(&joined)
}
