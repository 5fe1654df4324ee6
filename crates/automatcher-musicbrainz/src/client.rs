// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{MusicBrainzError, Result};
use crate::models::{
    Artist, ArtistSearchResult, RecordingSearchResult, SearchQuery, SearchResponse,
};
use crate::throttle::RequestThrottle;
use reqwest::{Client, Proxy, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;
use uuid::Uuid;

const MUSICBRAINZ_API_BASE: &str = "https://musicbrainz.org/ws/2";
const USER_AGENT: &str = concat!(
    "Automatcher/",
    env!("CARGO_PKG_VERSION"),
    " ( https://github.com/automatcher/automatcher )"
);

/// MusicBrainz API client with request throttling.
#[derive(Debug, Clone)]
pub struct MusicBrainzClient {
    client: Client,
    base_url: String,
    throttle: RequestThrottle,
}

impl MusicBrainzClient {
    /// Create a new MusicBrainz client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> MusicBrainzClientBuilder {
        MusicBrainzClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search recordings with a raw Lucene query.
    ///
    /// # Example
    /// ```no_run
    /// # use automatcher_musicbrainz::{MusicBrainzClient, SearchQuery};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let query = SearchQuery::new("artist:(Kate Nash) recording:(Pumpkin Soup)").limit(20);
    /// let response = client.search_recordings(query).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_recordings(
        &self,
        query: SearchQuery,
    ) -> Result<SearchResponse<RecordingSearchResult>> {
        let url = self.search_url("recording", &query)?;
        self.get(url.as_str()).await
    }

    /// Search artists with a raw Lucene query.
    pub async fn search_artists(
        &self,
        query: SearchQuery,
    ) -> Result<SearchResponse<ArtistSearchResult>> {
        let url = self.search_url("artist", &query)?;
        self.get(url.as_str()).await
    }

    /// Look up an artist by MusicBrainz ID, including its aliases.
    ///
    /// # Example
    /// ```no_run
    /// # use automatcher_musicbrainz::MusicBrainzClient;
    /// # use uuid::Uuid;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let mbid = Uuid::parse_str("f82bcf78-5b69-4622-a5ef-73800768d9ac")?; // JAY-Z
    /// let artist = client.lookup_artist(mbid).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lookup_artist(&self, mbid: Uuid) -> Result<Artist> {
        let url = format!("{}/artist/{}?fmt=json&inc=aliases", self.base_url, mbid);
        self.get(&url).await
    }

    fn search_url(&self, entity: &str, query: &SearchQuery) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, entity))
            .map_err(|e| MusicBrainzError::InvalidResponse(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("query", &query.query)
            .append_pair("fmt", "json");

        if let Some(limit) = query.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }

        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.throttle.wait_turn().await;

        trace!(target: "musicbrainz", "GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        debug!(target: "musicbrainz", %status, "response received");

        match status {
            StatusCode::NOT_FOUND => return Err(MusicBrainzError::NotFound(url.to_string())),
            StatusCode::SERVICE_UNAVAILABLE => return Err(MusicBrainzError::RateLimitExceeded),
            status if !status.is_success() => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(MusicBrainzError::ApiError {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        trace!(target: "musicbrainz", "response body: {}", body);

        serde_json::from_str(&body).map_err(|e| {
            MusicBrainzError::InvalidResponse(format!("failed to parse response: {}", e))
        })
    }
}

/// Builder for configuring a MusicBrainz client.
#[derive(Debug)]
pub struct MusicBrainzClientBuilder {
    base_url: String,
    timeout: Duration,
    rate_limit_interval: Duration,
    proxy: Option<String>,
}

impl Default for MusicBrainzClientBuilder {
    fn default() -> Self {
        Self {
            base_url: MUSICBRAINZ_API_BASE.to_string(),
            timeout: Duration::from_secs(15),
            rate_limit_interval: Duration::from_secs(1),
            proxy: None,
        }
    }
}

impl MusicBrainzClientBuilder {
    /// Set the full API root (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set connect and read timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.rate_limit_interval = interval;
        self
    }

    /// Route every request through an HTTP(S) proxy.
    pub fn proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn build(self) -> Result<MusicBrainzClient> {
        let mut builder = Client::builder()
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        if let Some(proxy_url) = &self.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| MusicBrainzError::InvalidProxy {
                url: proxy_url.clone(),
                reason: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        Ok(MusicBrainzClient {
            client: builder.build()?,
            base_url: self.base_url,
            throttle: RequestThrottle::new(self.rate_limit_interval),
        })
    }
}
