//! Error handling.

pub use failure::Error;
use failure_derive::Fail;
use hydro_util::impl_from_for_error;
use hydro_util::http::StatusCode;
use hydro_util::rpc::UpstreamError;
use handlebars::RenderError;
use serde_json::Error as JsonError;

/// Error that could occur when processing a request.
#[derive(Fail, Debug)]
pub enum ProxyError {
    /// No route matches the request path.
    #[fail(display = "not found")]
    NotFound,
    /// Fetching from the flood-monitoring API failed.
    ///
    /// Displays as the bare upstream message, since that's what clients see.
    #[fail(display = "{}", _0)]
    Upstream(UpstreamError),
    /// Handlebars rendering error.
    #[fail(display = "handlebars: {}", _0)]
    Hbs(RenderError),
    /// Failed to serialize a response body.
    #[fail(display = "serde_json: {}", _0)]
    Json(JsonError)
}

impl StatusCode for ProxyError {
    fn status_code(&self) -> u16 {
        use self::ProxyError::*;

        match *self {
            NotFound => 404,
            _ => 500
        }
    }
}

impl_from_for_error!(ProxyError,
                     UpstreamError => Upstream,
                     RenderError => Hbs,
                     JsonError => Json);

pub type ProxyResult<T> = ::std::result::Result<T, ProxyError>;
pub type Result<T, E = Error> = ::std::result::Result<T, E>;
