// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MusicBrainzError>;

#[derive(Debug, Error)]
pub enum MusicBrainzError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("MusicBrainz is throttling requests (503)")]
    RateLimitExceeded,

    #[error("invalid response from MusicBrainz: {0}")]
    InvalidResponse(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("MusicBrainz returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("invalid proxy url '{url}': {reason}")]
    InvalidProxy { url: String, reason: String },
}
