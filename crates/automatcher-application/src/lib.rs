// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolve loosely written artist names (and an optional track title) to a
//! single catalog artist identifier, or decide that no confident match exists.
//!
//! The pipeline is: [`normalizer`] splits and cleans the input, [`resolver`]
//! runs the track-then-artist lookup strategy against a [`CatalogService`]
//! wrapped in [`ResilientCatalog`], scores candidates with [`similarity`],
//! and memoizes results through the [`CachedQueryExecutor`].

pub mod aliases;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod lookup;
pub mod normalizer;
pub mod query;
pub mod resolver;
pub mod similarity;

pub use aliases::ArtistAliasSet;
pub use cache::{CacheStore, CachedQueryExecutor, MemoryStore, NoopStore};
pub use catalog::{CatalogService, MusicBrainzCatalog};
pub use error::{CatalogError, LookupError, MatcherError, MatcherResult};
pub use lookup::{ResilientCatalog, RetryPolicy};
pub use normalizer::{join_artists, normalize_artists, ArtistInput, TitleInput};
pub use query::escape_for_search_query;
pub use resolver::ArtistMatcher;
pub use similarity::similarity;

pub use automatcher_domain::{ArtistId, CatalogArtist, CatalogTrack, MatchDecision, Scored};
