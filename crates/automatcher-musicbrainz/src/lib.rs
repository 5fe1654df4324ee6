// SPDX-License-Identifier: GPL-3.0-or-later

//! MusicBrainz ws/2 client used as the catalog behind the artist matcher.
//!
//! Only the three calls the matcher needs are exposed: recording search,
//! artist search and artist lookup with aliases. Requests are throttled to
//! respect the MusicBrainz rate limit.

pub mod client;
pub mod error;
pub mod models;
pub mod throttle;

pub use client::{MusicBrainzClient, MusicBrainzClientBuilder};
pub use error::{MusicBrainzError, Result};
pub use models::{
    Alias, Artist, ArtistCredit, ArtistRef, ArtistSearchResult, Recording, RecordingSearchResult,
    SearchQuery, SearchResponse,
};
