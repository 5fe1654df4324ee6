// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::CatalogError;
use crate::query::artist_search_query;
use async_trait::async_trait;
use automatcher_config::AppConfig;
use automatcher_domain::{ArtistId, CatalogArtist, CatalogTrack, Scored, TrackId};
use automatcher_musicbrainz::{
    Artist, MusicBrainzClient, MusicBrainzError, Recording, SearchQuery,
};
use std::sync::Arc;
use tracing::debug;

/// The remote metadata catalog, reduced to the three calls the matcher needs.
///
/// Implementations return ranked results exactly as the service produced them
/// and never retry; retrying is the job of [`crate::ResilientCatalog`].
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Run a prepared (already escaped) track search query.
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Scored<CatalogTrack>>, CatalogError>;

    /// Search artists by a plain name; the implementation builds its own query.
    async fn search_artists(
        &self,
        name: &str,
        limit: u32,
    ) -> Result<Vec<Scored<CatalogArtist>>, CatalogError>;

    /// Fetch one artist with its aliases. `Ok(None)` when the id is unknown.
    async fn get_artist_by_id(&self, id: ArtistId) -> Result<Option<CatalogArtist>, CatalogError>;
}

#[async_trait]
impl<C: CatalogService + ?Sized> CatalogService for Arc<C> {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Scored<CatalogTrack>>, CatalogError> {
        (**self).search_tracks(query, limit).await
    }

    async fn search_artists(
        &self,
        name: &str,
        limit: u32,
    ) -> Result<Vec<Scored<CatalogArtist>>, CatalogError> {
        (**self).search_artists(name, limit).await
    }

    async fn get_artist_by_id(&self, id: ArtistId) -> Result<Option<CatalogArtist>, CatalogError> {
        (**self).get_artist_by_id(id).await
    }
}

/// [`CatalogService`] backed by the MusicBrainz web service.
#[derive(Debug, Clone)]
pub struct MusicBrainzCatalog {
    client: MusicBrainzClient,
}

impl MusicBrainzCatalog {
    pub fn new(client: MusicBrainzClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, MusicBrainzError> {
        let client = MusicBrainzClient::builder()
            .base_url(config.musicbrainz.api_root())
            .timeout(config.network.timeout())
            .rate_limit_interval(config.musicbrainz.rate_limit_interval())
            .proxy(config.network.proxy.clone())
            .build()?;
        Ok(Self::new(client))
    }
}

fn clamp_score(score: Option<u32>) -> u8 {
    score.unwrap_or(0).min(100) as u8
}

fn track_from_recording(recording: Recording) -> Option<Scored<CatalogTrack>> {
    let Some(credited) = recording.primary_artist() else {
        debug!(target: "musicbrainz", recording = %recording.id, "recording without artist credit skipped");
        return None;
    };
    let artist = CatalogArtist::new(ArtistId::from_uuid(credited.id), credited.name.clone());

    Some(Scored::new(
        clamp_score(recording.score),
        CatalogTrack {
            id: TrackId(recording.id),
            title: recording.title,
            artist,
        },
    ))
}

fn catalog_artist(artist: Artist) -> CatalogArtist {
    CatalogArtist::new(ArtistId::from_uuid(artist.id), artist.name)
        .with_aliases(artist.aliases.into_iter().map(|alias| alias.name))
}

#[async_trait]
impl CatalogService for MusicBrainzCatalog {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Scored<CatalogTrack>>, CatalogError> {
        let response = self
            .client
            .search_recordings(SearchQuery::new(query).limit(limit))
            .await?;
        debug!(
            target: "musicbrainz",
            total = response.count,
            returned = response.results.recordings.len(),
            "recording search answered"
        );

        Ok(response
            .results
            .recordings
            .into_iter()
            .filter_map(track_from_recording)
            .collect())
    }

    async fn search_artists(
        &self,
        name: &str,
        limit: u32,
    ) -> Result<Vec<Scored<CatalogArtist>>, CatalogError> {
        let response = self
            .client
            .search_artists(SearchQuery::new(artist_search_query(name)).limit(limit))
            .await?;
        debug!(
            target: "musicbrainz",
            total = response.count,
            returned = response.results.artists.len(),
            "artist search answered"
        );

        Ok(response
            .results
            .artists
            .into_iter()
            .map(|artist| Scored::new(clamp_score(artist.score), catalog_artist(artist)))
            .collect())
    }

    async fn get_artist_by_id(&self, id: ArtistId) -> Result<Option<CatalogArtist>, CatalogError> {
        match self.client.lookup_artist(id.0).await {
            Ok(artist) => Ok(Some(catalog_artist(artist))),
            Err(MusicBrainzError::NotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
