// SPDX-License-Identifier: GPL-3.0-or-later

use automatcher_musicbrainz::MusicBrainzError;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a catalog backend for a single call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(String),

    #[error("catalog is rate limiting requests")]
    RateLimited,

    #[error("catalog responded with status {status}: {message}")]
    Service { status: u16, message: String },

    #[error("unusable catalog response: {0}")]
    InvalidResponse(String),
}

impl From<MusicBrainzError> for CatalogError {
    fn from(err: MusicBrainzError) -> Self {
        match err {
            MusicBrainzError::RequestFailed(e) => CatalogError::Transport(e.to_string()),
            MusicBrainzError::RateLimitExceeded => CatalogError::RateLimited,
            MusicBrainzError::InvalidResponse(message) => CatalogError::InvalidResponse(message),
            MusicBrainzError::NotFound(url) => CatalogError::Service {
                status: 404,
                message: url,
            },
            MusicBrainzError::ApiError { status, message } => {
                CatalogError::Service { status, message }
            }
            err @ MusicBrainzError::InvalidProxy { .. } => CatalogError::Transport(err.to_string()),
        }
    }
}

/// A catalog call that kept failing after every retry.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{operation} failed after {attempts} attempts ({total_delay:?} spent in backoff): {source}")]
    Exhausted {
        operation: &'static str,
        attempts: u32,
        total_delay: Duration,
        #[source]
        source: CatalogError,
    },
}

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("cache value for '{key}' could not be serialized: {source}")]
    CacheValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type MatcherResult<T> = Result<T, MatcherError>;
