//! Remote conversion with local fallback
//!
//! A ticket tracker may offer its own Markdown → ADF conversion endpoint. This
//! crate never talks to the network: callers implement [`RemoteConverter`] with
//! whatever HTTP client they use, and [`convert_with_fallback`] drops back to
//! the local converter whenever the remote fails. Both results are treated as
//! equivalent.
//!
//! The wire helpers ([`ConversionRequest`], [`parse_remote_response`],
//! [`error_for_status`]) cover the request and response shapes of the
//! `contentbody/convert/markdown` style endpoint so implementors only have to
//! move bytes.

use crate::formats::adf::parse_adf_value;
use crate::ir::nodes::Document;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of a remote conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("rate limited")]
    RateLimited,
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },
}

/// A networked Markdown → document converter.
pub trait RemoteConverter: Send + Sync {
    fn convert(&self, markdown: &str) -> Result<Document, RemoteError>;
}

/// Request body sent to the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest<'a> {
    pub representation: &'static str,
    pub value: &'a str,
}

impl<'a> ConversionRequest<'a> {
    pub fn markdown(value: &'a str) -> Self {
        ConversionRequest {
            representation: "markdown",
            value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    value: Option<serde_json::Value>,
}

/// Decodes a `{"value": <adf document>}` response body.
pub fn parse_remote_response(body: &str) -> Result<Document, RemoteError> {
    let response: ConversionResponse = serde_json::from_str(body)
        .map_err(|err| RemoteError::MalformedResponse(err.to_string()))?;
    let value = response
        .value
        .ok_or_else(|| RemoteError::MalformedResponse("no ADF content returned".to_string()))?;
    parse_adf_value(value).map_err(|err| RemoteError::MalformedResponse(err.to_string()))
}

/// Maps a non-success HTTP status to the matching error.
pub fn error_for_status(status: u16, body: &str) -> RemoteError {
    match status {
        401 | 403 => RemoteError::Authentication(body.to_string()),
        429 => RemoteError::RateLimited,
        _ => RemoteError::Api {
            status,
            message: body.to_string(),
        },
    }
}

/// Converts through `remote` when given, falling back to [`crate::convert`].
///
/// Blank input returns the empty document without contacting the remote.
pub fn convert_with_fallback(remote: Option<&dyn RemoteConverter>, markdown: &str) -> Document {
    if markdown.trim().is_empty() {
        return Document::empty();
    }
    let Some(remote) = remote else {
        return crate::convert(markdown);
    };
    match remote.convert(markdown) {
        Ok(doc) => {
            debug!("remote conversion succeeded ({} blocks)", doc.blocks.len());
            doc
        }
        Err(err) => {
            warn!("remote conversion failed ({err}), falling back to local conversion");
            crate::convert(markdown)
        }
    }
}
