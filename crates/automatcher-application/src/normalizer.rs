// SPDX-License-Identifier: GPL-3.0-or-later

//! Turning free-form artist credits into an ordered list of individual names.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Applied in order; every piece produced by one pattern is split again by the next.
    static ref ARTIST_SEPARATORS: Vec<Regex> = [
        r"(?i)\s+featuring\s+",
        r"(?i)\s+feat\.?\s+",
        r"(?i)\s+ft\.?\s+",
        r"(?i)\s+vs\.?\s+",
        r"/",
        r"&",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid artist separator regex"))
    .collect();
}

/// Artist credit as supplied by a caller: one string or an ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInput(Vec<String>);

impl ArtistInput {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for ArtistInput {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for ArtistInput {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for ArtistInput {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for ArtistInput {
    fn from(value: Vec<&str>) -> Self {
        Self(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ArtistInput {
    fn from(value: &[&str]) -> Self {
        Self(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ArtistInput {
    fn from(value: [&str; N]) -> Self {
        Self(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Track title as supplied by a caller. Only the first element of a list is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleInput(Vec<String>);

impl TitleInput {
    /// No title given.
    pub fn none() -> Self {
        Self::default()
    }

    /// The trimmed first title, or `None` when it is missing or blank.
    pub fn into_title(self) -> Option<String> {
        self.0
            .into_iter()
            .next()
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
    }
}

impl From<&str> for TitleInput {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for TitleInput {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Option<&str>> for TitleInput {
    fn from(value: Option<&str>) -> Self {
        Self(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Option<String>> for TitleInput {
    fn from(value: Option<String>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl From<Vec<String>> for TitleInput {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for TitleInput {
    fn from(value: Vec<&str>) -> Self {
        Self(value.into_iter().map(str::to_string).collect())
    }
}

/// Split every element on the separator patterns, trim, and drop blanks.
///
/// ```
/// use automatcher_application::normalize_artists;
///
/// assert_eq!(normalize_artists("Kate Nash ft. Jay-Z"), vec!["Kate Nash", "Jay-Z"]);
/// assert_eq!(normalize_artists("A/B&C"), vec!["A", "B", "C"]);
/// ```
pub fn normalize_artists(input: impl Into<ArtistInput>) -> Vec<String> {
    let mut names = input.into().into_inner();

    for separator in ARTIST_SEPARATORS.iter() {
        let pieces: Vec<String> = names
            .iter()
            .flat_map(|name| separator.split(name))
            .map(str::to_string)
            .collect();
        names = pieces;
    }

    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Join names for display and querying: `["A", "B", "C"]` becomes `"A, B and C"`.
pub fn join_artists(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}
