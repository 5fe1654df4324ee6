// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Artist information from MusicBrainz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// MusicBrainz artist ID (MBID).
    pub id: Uuid,
    pub name: String,
    /// Aliases; present on lookups made with `inc=aliases`.
    #[serde(default)]
    pub aliases: Vec<Alias>,
    /// Search score (only present in search results).
    #[serde(default)]
    pub score: Option<u32>,
}

/// Alternative name of an artist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alias {
    pub name: String,
}

/// Recording (track) information from MusicBrainz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recording {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "artist-credit", default)]
    pub artist_credit: Vec<ArtistCredit>,
    /// Search score (only present in search results).
    #[serde(default)]
    pub score: Option<u32>,
}

impl Recording {
    /// The first credited artist, which MusicBrainz treats as the primary one.
    pub fn primary_artist(&self) -> Option<&ArtistRef> {
        self.artist_credit.first().map(|credit| &credit.artist)
    }
}

/// Artist credit entry (artist contribution to a recording).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistCredit {
    pub artist: ArtistRef,
}

/// Reference to an artist (minimal info).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    pub id: Uuid,
    pub name: String,
}

/// Search query parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Lucene query string, already escaped by the caller.
    pub query: String,
    /// Maximum number of results (default 25, max 100).
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Generic search response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    /// Total number of matches, of which at most `limit` are returned.
    #[serde(default)]
    pub count: u32,
    #[serde(flatten)]
    pub results: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResult {
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSearchResult {
    #[serde(default)]
    pub recordings: Vec<Recording>,
}
