// SPDX-License-Identifier: GPL-3.0-or-later
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Value Objects & IDs
// ============================================================================

/// Catalog identifier of an artist (a MusicBrainz MBID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistId(pub Uuid);

impl ArtistId {
    /// The catalog's "Various Artists" pseudo-artist.
    pub const VARIOUS_ARTISTS: ArtistId =
        ArtistId(uuid::uuid!("89ad4ac3-39f7-470e-963a-56509c546377"));

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn is_various_artists(&self) -> bool {
        *self == Self::VARIOUS_ARTISTS
    }
}

impl FromStr for ArtistId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for ArtistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Catalog Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogArtist {
    pub id: ArtistId,
    pub name: String,
    /// Alternative names; only populated by a lookup by id.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CatalogArtist {
    pub fn new(id: ArtistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub id: TrackId,
    pub title: String,
    pub artist: CatalogArtist,
}

/// One entry of a ranked search response. `score` is the service's own 0-100 relevance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored<T> {
    pub score: u8,
    pub entity: T,
}

impl<T> Scored<T> {
    pub fn new(score: u8, entity: T) -> Self {
        Self { score, entity }
    }
}

// ============================================================================
// Resolution Outcome
// ============================================================================

/// Terminal answer of one artist resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchDecision {
    Matched(ArtistId),
    NoMatch,
}

impl MatchDecision {
    pub fn artist_id(&self) -> Option<ArtistId> {
        match self {
            MatchDecision::Matched(id) => Some(*id),
            MatchDecision::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchDecision::Matched(_))
    }
}

impl From<Option<ArtistId>> for MatchDecision {
    fn from(value: Option<ArtistId>) -> Self {
        value.map_or(MatchDecision::NoMatch, MatchDecision::Matched)
    }
}
