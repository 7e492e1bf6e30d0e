//! Standard configuration module.

use serde_derive::Deserialize;
use hydro_util::{ConfigExt, crate_name};

/// `hydro-proxy` configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Address to listen on.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Base URL of the flood-monitoring API, without a trailing slash.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,
    /// How long to wait for the upstream before giving up, in seconds.
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
    /// How long API responses stay cached, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Label language for the station listing page (`en` or `zh`).
    #[serde(default = "default_locale")]
    pub locale: String
}

fn default_listen() -> String {
    "127.0.0.1:5000".into()
}
fn default_upstream_base_url() -> String {
    "https://environment.data.gov.uk/flood-monitoring".into()
}
fn default_upstream_timeout_secs() -> u64 {
    10
}
fn default_cache_ttl_secs() -> u64 {
    900
}
fn default_locale() -> String {
    "en".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            upstream_base_url: default_upstream_base_url(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            locale: default_locale()
        }
    }
}

impl ConfigExt for Config {
    fn crate_name() -> &'static str {
        crate_name!()
    }
}
