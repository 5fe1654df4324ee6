// SPDX-License-Identifier: GPL-3.0-or-later

use crate::catalog::CatalogService;
use crate::error::{CatalogError, LookupError};
use automatcher_config::NetworkConfig;
use automatcher_domain::{ArtistId, CatalogArtist, CatalogTrack, Scored};
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

/// Bounded retry with quadratic backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before retry `n` is `n² × backoff_unit`.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(network: &NetworkConfig) -> Self {
        Self {
            max_retries: network.max_retries,
            backoff_unit: network.backoff_unit(),
        }
    }

    /// Delay slept before the given 1-based retry.
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        self.backoff_unit
            .checked_mul(retry.saturating_pow(2))
            .unwrap_or(Duration::MAX)
    }
}

/// A [`CatalogService`] wrapper that retries failed calls before giving up.
///
/// Every attempt is a fresh call. Once retries are exhausted the last error is
/// returned as [`LookupError::Exhausted`]; it is never turned into "no match".
#[derive(Debug, Clone)]
pub struct ResilientCatalog<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: CatalogService> ResilientCatalog<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Scored<CatalogTrack>>, LookupError> {
        self.with_retry("track search", || self.inner.search_tracks(query, limit))
            .await
    }

    pub async fn search_artists(
        &self,
        name: &str,
        limit: u32,
    ) -> Result<Vec<Scored<CatalogArtist>>, LookupError> {
        self.with_retry("artist search", || self.inner.search_artists(name, limit))
            .await
    }

    pub async fn get_artist_by_id(
        &self,
        id: ArtistId,
    ) -> Result<Option<CatalogArtist>, LookupError> {
        self.with_retry("artist lookup", || self.inner.get_artist_by_id(id))
            .await
    }

    async fn with_retry<T, F, Fut>(
        &self,
        operation: &'static str,
        mut call: F,
    ) -> Result<T, LookupError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let mut attempts = 0;
        let mut total_delay = Duration::ZERO;

        loop {
            attempts += 1;
            let err = match call().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if attempts > self.policy.max_retries {
                error!(
                    target: "lookup",
                    operation,
                    attempts,
                    error = %err,
                    "catalog call exhausted all retry attempts"
                );
                return Err(LookupError::Exhausted {
                    operation,
                    attempts,
                    total_delay,
                    source: err,
                });
            }

            let delay = self.policy.delay_before_retry(attempts);
            warn!(
                target: "lookup",
                operation,
                attempt = attempts,
                error = %err,
                ?delay,
                "catalog call failed, retrying after delay"
            );
            tokio::time::sleep(delay).await;
            total_delay += delay;
        }
    }
}
