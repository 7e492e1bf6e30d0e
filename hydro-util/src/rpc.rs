//! Fetching JSON documents from upstream HTTP APIs.

use reqwest::blocking::Client;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;
use serde_json::Value;
use failure_derive::Fail;
use std::fmt::Display;
use std::time::Duration;
use log::*;

use crate::impl_from_for_error;

/// An error encountered while talking to an upstream API.
///
/// The display string is what gets reported to clients, so it always
/// includes the underlying cause.
#[derive(Debug, Fail)]
pub enum UpstreamError {
    /// The upstream returned a non-2xx status.
    #[fail(display = "{} {} for url: {}", code, reason, url)]
    Status {
        /// The HTTP status code returned.
        code: u16,
        /// Canonical reason phrase for the status, if any.
        reason: String,
        /// The URL that was requested.
        url: String
    },
    /// The body wasn't valid JSON.
    #[fail(display = "invalid JSON from upstream: {}", _0)]
    Json(JsonError),
    /// reqwest error (connection failures, timeouts, ...).
    #[fail(display = "{}", _0)]
    Reqwest(ReqwestError)
}
impl_from_for_error!(UpstreamError,
                     ReqwestError => Reqwest,
                     JsonError => Json);

/// A blocking JSON client bound to one upstream base URL.
#[derive(Clone)]
pub struct JsonRpc {
    pub base_url: String,
    pub user_agent: String,
    pub name: &'static str,
    pub cli: Client
}
impl JsonRpc {
    /// Make a new client; every request made through it gives up after `timeout`.
    pub fn new(ua: String, name: &'static str, base_url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let cli = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            user_agent: ua,
            name, base_url, cli
        })
    }
    /// GET `url` (relative to the base URL) and parse the body as JSON.
    ///
    /// Makes exactly one attempt.
    pub fn get_json<T>(&self, url: T) -> Result<Value, UpstreamError> where T: Display {
        let url = format!("{}{}", self.base_url, url);
        debug!("RPC ({}): GET {}", self.name, url);
        let resp = self.cli.get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent as &str)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;
        let status = resp.status();
        debug!("RPC ({}): response code {}", self.name, status.as_u16());
        if !status.is_success() {
            warn!("RPC ({}): request failed ({}): {}", self.name, status.as_u16(), url);
            Err(UpstreamError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
                url
            })?
        }
        let text = resp.text()?;
        let ret: Value = serde_json::from_str(&text)?;
        Ok(ret)
    }
}
