//! URL slugs for game pages.

use std::collections::BTreeMap;

fn is_kana_or_han(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}' | '\u{3400}'..='\u{4DBF}')
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// 32-bit string hash (`h * 31 + unit` over UTF-16 units), wrapping
fn string_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Page slug: Android package id, else an iOS id in `com.` form, else a
/// slug derived from the name.
pub fn create_slug(name: &str, app_ids: &BTreeMap<String, String>) -> String {
    if let Some(android) = app_ids.get("android").filter(|id| !id.is_empty()) {
        return android.clone();
    }
    if let Some(ios) = app_ids.get("ios").filter(|id| id.starts_with("com.")) {
        return ios.clone();
    }

    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars().filter(|c| !is_kana_or_han(*c)) {
        let c = if is_slug_char(c) { c } else { '-' };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    let slug = slug.trim_matches('-').to_string();

    if slug.chars().count() < 2 {
        let hash = i64::from(string_hash(name)).unsigned_abs();
        return format!("game-{}", to_base36(hash));
    }
    slug
}
