// SPDX-License-Identifier: GPL-3.0-or-later

//! Artist disambiguation.
//!
//! The resolver runs a fallback chain, stopping at the first stage that yields
//! an artist:
//! 1. Track search by artist and title
//! 2. Track search again with a trailing `(...)` removed from the title
//! 3. Artist search by name alone
//!
//! A stage that finds two different artists above its thresholds is ambiguous;
//! the answer is then `NoMatch` rather than a guess.

use crate::aliases::ArtistAliasSet;
use crate::cache::CachedQueryExecutor;
use crate::catalog::CatalogService;
use crate::error::MatcherResult;
use crate::lookup::{ResilientCatalog, RetryPolicy};
use crate::normalizer::{join_artists, normalize_artists, ArtistInput, TitleInput};
use crate::query::track_search_query;
use crate::similarity::similarity;
use automatcher_config::AppConfig;
use automatcher_domain::{ArtistId, CatalogArtist, MatchDecision};
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::{debug, info};

const TRACK_SEARCH_LIMIT: u32 = 20;
const ARTIST_SEARCH_LIMIT: u32 = 20;

/// Track results scored below this by the catalog end the scan.
const MIN_TRACK_SCORE: u8 = 75;
/// Minimum name similarity for an artist found through a track.
const MIN_TRACK_ARTIST_SIMILARITY: u32 = 75;
/// Artist results scored below this by the catalog end the scan.
const MIN_ARTIST_SCORE: u8 = 50;
/// Minimum name similarity for an artist found by name alone.
const MIN_ARTIST_SIMILARITY: u32 = 85;

lazy_static! {
    static ref PARENTHETICAL_SUFFIX: Regex =
        Regex::new(r"^(.+)\s+\(.+\)$").expect("valid parenthetical regex");
}

/// Outcome of one track-search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackLookup {
    Found(ArtistId),
    NotFound,
    Ambiguous,
}

/// `"Wonderwall (live session)"` becomes `"Wonderwall"`.
fn strip_parenthetical(title: &str) -> Option<String> {
    PARENTHETICAL_SUFFIX
        .captures(title)
        .and_then(|captures| captures.get(1))
        .map(|core| core.as_str().trim().to_string())
        .filter(|core| !core.is_empty())
}

/// Resolves artist credits to catalog artist identifiers.
pub struct ArtistMatcher<C> {
    catalog: ResilientCatalog<C>,
    cache: CachedQueryExecutor,
}

impl<C: CatalogService> ArtistMatcher<C> {
    pub fn new(catalog: ResilientCatalog<C>, cache: CachedQueryExecutor) -> Self {
        Self { catalog, cache }
    }

    /// Wire a catalog with the retry and cache settings from configuration.
    pub fn from_config(catalog: C, config: &AppConfig) -> anyhow::Result<Self> {
        let catalog = ResilientCatalog::new(catalog, RetryPolicy::from_config(&config.network));
        let cache = CachedQueryExecutor::from_config(&config.cache)?;
        Ok(Self::new(catalog, cache))
    }

    pub fn catalog(&self) -> &C {
        self.catalog.inner()
    }

    pub fn cache(&self) -> &CachedQueryExecutor {
        &self.cache
    }

    /// Resolve one or more artist names, optionally helped by a track title.
    ///
    /// Returns `Ok(MatchDecision::NoMatch)` for blank input, masked names
    /// (containing `**`), ambiguity and weak candidates alike. An `Err` means
    /// the catalog could not be reached, not that the artist does not exist.
    ///
    /// # Example
    /// ```no_run
    /// # use automatcher_application::{ArtistMatcher, MusicBrainzCatalog};
    /// # async fn example() -> anyhow::Result<()> {
    /// let config = automatcher_config::load(None)?;
    /// let matcher = ArtistMatcher::from_config(MusicBrainzCatalog::from_config(&config)?, &config)?;
    /// let decision = matcher.resolve_artist("Kate Nash", "Pumpkin Soup").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn resolve_artist(
        &self,
        artists: impl Into<ArtistInput>,
        title: impl Into<TitleInput>,
    ) -> MatcherResult<MatchDecision> {
        let title = title.into().into_title();
        let artists = normalize_artists(artists);

        if artists.is_empty() {
            debug!(target: "matcher", "no artist names given");
            return Ok(MatchDecision::NoMatch);
        }

        let artist = join_artists(&artists);
        if artist.contains("**") {
            info!(target: "matcher", %artist, "artist name is masked, not matching");
            return Ok(MatchDecision::NoMatch);
        }

        let key = format!("artists={} title={}", artist, title.as_deref().unwrap_or(""));
        self.cache
            .cached_call(&key, || self.resolve_uncached(&artist, title.as_deref()))
            .await
    }

    async fn resolve_uncached(
        &self,
        artist: &str,
        title: Option<&str>,
    ) -> MatcherResult<MatchDecision> {
        if let Some(title) = title {
            let mut lookup = self.lookup_by_track(artist, title).await?;

            if lookup == TrackLookup::NotFound {
                if let Some(core_title) = strip_parenthetical(title) {
                    lookup = self.lookup_by_track(artist, &core_title).await?;
                }
            }

            match lookup {
                TrackLookup::Found(id) => return Ok(MatchDecision::Matched(id)),
                TrackLookup::Ambiguous => return Ok(MatchDecision::NoMatch),
                TrackLookup::NotFound => {}
            }
        }

        let key = format!("artist_name={}", artist);
        self.cache
            .cached_call(&key, || self.lookup_by_artist(artist))
            .await
    }

    async fn lookup_by_track(&self, artist: &str, title: &str) -> MatcherResult<TrackLookup> {
        info!(target: "matcher", %artist, %title, "looking up artist by track");

        let query = track_search_query(artist, title);
        let mut results = self.catalog.search_tracks(&query, TRACK_SEARCH_LIMIT).await?;
        results.sort_by_key(|result| Reverse(result.score));

        let mut matched: Option<ArtistId> = None;
        for result in &results {
            if result.score < MIN_TRACK_SCORE {
                break;
            }

            let candidate = &result.entity.artist;
            debug!(
                target: "matcher",
                score = result.score,
                title = %result.entity.title,
                artist = %candidate.name,
                artist_id = %candidate.id,
                "track candidate"
            );

            if matched == Some(candidate.id) {
                continue;
            }

            if self.artist_similarity(candidate, artist).await? < MIN_TRACK_ARTIST_SIMILARITY {
                debug!(target: "matcher", artist = %candidate.name, "artist name too different, skipping");
                continue;
            }

            if matched.is_some() {
                info!(target: "matcher", %artist, %title, "more than one artist scored highly, giving up");
                return Ok(TrackLookup::Ambiguous);
            }
            matched = Some(candidate.id);
        }

        match matched {
            Some(id) => {
                info!(target: "matcher", artist_id = %id, "matched by track");
                Ok(TrackLookup::Found(id))
            }
            None => {
                info!(target: "matcher", %artist, %title, "lookup by track failed");
                Ok(TrackLookup::NotFound)
            }
        }
    }

    async fn lookup_by_artist(&self, name: &str) -> MatcherResult<MatchDecision> {
        info!(target: "matcher", artist = %name, "looking up artist by name");

        let mut results = self.catalog.search_artists(name, ARTIST_SEARCH_LIMIT).await?;
        results.sort_by_key(|result| Reverse(result.score));

        let mut by_similarity: BTreeMap<u32, Vec<ArtistId>> = BTreeMap::new();
        for result in &results {
            if result.score < MIN_ARTIST_SCORE {
                break;
            }

            let similarity = self.artist_similarity(&result.entity, name).await?;
            debug!(
                target: "matcher",
                score = result.score,
                artist = %result.entity.name,
                artist_id = %result.entity.id,
                similarity,
                "artist candidate"
            );
            if similarity == 0 {
                continue;
            }

            let bucket = by_similarity.entry(similarity).or_default();
            if !bucket.contains(&result.entity.id) {
                bucket.push(result.entity.id);
            }
        }

        let Some((&best, candidates)) = by_similarity.iter().next_back() else {
            info!(target: "matcher", artist = %name, "no matches found by name");
            return Ok(MatchDecision::NoMatch);
        };

        if best < MIN_ARTIST_SIMILARITY {
            info!(target: "matcher", artist = %name, best, "closest match is not similar enough");
            return Ok(MatchDecision::NoMatch);
        }

        match candidates.as_slice() {
            [id] => {
                info!(target: "matcher", artist_id = %id, "matched by name");
                Ok(MatchDecision::Matched(*id))
            }
            _ => {
                info!(
                    target: "matcher",
                    artist = %name,
                    best,
                    candidates = candidates.len(),
                    "more than one equally similar artist, giving up"
                );
                Ok(MatchDecision::NoMatch)
            }
        }
    }

    /// Best similarity between `name` and the candidate's name or any alias.
    async fn artist_similarity(&self, candidate: &CatalogArtist, name: &str) -> MatcherResult<u32> {
        let mut best = similarity(&candidate.name, name);
        debug!(target: "matcher", candidate = %candidate.name, %name, similarity = best, "comparing artist");

        if best >= 100 {
            return Ok(best);
        }

        let aliases = self.artist_aliases(candidate.id).await?;
        for alias in aliases.iter() {
            let score = similarity(alias, name);
            debug!(target: "matcher", %alias, %name, similarity = score, "comparing alias");
            best = best.max(score);
        }

        Ok(best)
    }

    async fn artist_aliases(&self, id: ArtistId) -> MatcherResult<ArtistAliasSet> {
        if id.is_various_artists() {
            return Ok(ArtistAliasSet::empty());
        }

        let key = format!("artist_aliases={}", id);
        self.cache
            .cached_call(&key, || self.fetch_aliases(id))
            .await
    }

    async fn fetch_aliases(&self, id: ArtistId) -> MatcherResult<ArtistAliasSet> {
        let artist = self.catalog.get_artist_by_id(id).await?;
        Ok(ArtistAliasSet::for_artist(artist.as_ref()))
    }
}
