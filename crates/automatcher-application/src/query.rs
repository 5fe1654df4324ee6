// SPDX-License-Identifier: GPL-3.0-or-later

//! Lucene query construction for the catalog search endpoints.

const RESERVED: &[char] = &[
    '+', '-', '|', '!', '(', ')', '{', '}', '[', ']', '^', '\'', '"', '~', '*', '?', ':', '\\',
];

/// Backslash-escape every character that has a meaning in Lucene query syntax.
pub fn escape_for_search_query(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Recordings credited to `artist` whose title matches `title`.
pub fn track_search_query(artist: &str, title: &str) -> String {
    format!(
        "artist:({}) recording:({})",
        escape_for_search_query(artist),
        escape_for_search_query(title)
    )
}

pub fn artist_search_query(name: &str) -> String {
    format!("artist:({})", escape_for_search_query(name))
}
