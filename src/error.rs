use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum LinkToolError {
    #[error("Fetch endpoint is not configured")]
    MissingEndpoint,

    #[error("Failed to fetch link data: {0}")]
    FetchError(String),

    #[error("Backend returned status: {0}")]
    BadStatus(u16),

    #[error("Failed to decode backend response: {0}")]
    DecodeError(String),

    #[error("Backend could not resolve the link")]
    Rejected,

    #[error("Backend reported success without metadata")]
    MissingMeta,
}

impl LinkToolError {
    /// Message surfaced through the host's notifier. Transport and decoding
    /// problems all collapse into one generic message; only the two
    /// application-level outcomes get their own wording.
    pub fn user_message(&self) -> &'static str {
        match self {
            LinkToolError::Rejected => "Couldn't get this link data, try another one",
            LinkToolError::MissingMeta => "Wrong response format from the server",
            _ => "Couldn't fetch the link data",
        }
    }

    pub fn log(&self) {
        match self {
            LinkToolError::MissingEndpoint => {
                warn!("Fetch attempted without a configured endpoint");
            }
            LinkToolError::FetchError(e) => {
                error!(error = %e, "Link data fetch failed");
            }
            LinkToolError::BadStatus(status) => {
                warn!(status = %status, "Backend returned a non-success status");
            }
            LinkToolError::DecodeError(e) => {
                error!(error = %e, "Backend response decoding failed");
            }
            LinkToolError::Rejected => {
                warn!("Backend could not resolve the link");
            }
            LinkToolError::MissingMeta => {
                warn!("Backend reported success without metadata");
            }
        }
    }
}
