//! The bits of the flood-monitoring API we consume.

use hydro_util::rpc::{JsonRpc, UpstreamError};
use hydro_util::user_agent;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;

pub struct FloodApi {
    rpc: JsonRpc
}

/// Pull the `items` list out of a list-endpoint response.
fn items(mut doc: Value) -> Value {
    match doc.get_mut("items") {
        Some(items) => items.take(),
        None => Value::Array(vec![])
    }
}

impl FloodApi {
    pub fn new(cfg: &Config) -> Result<Self, UpstreamError> {
        let timeout = Duration::from_secs(cfg.upstream_timeout_secs);
        let rpc = JsonRpc::new(user_agent!(), "flood-monitoring", cfg.upstream_base_url.clone(), timeout)?;
        Ok(Self { rpc })
    }
    /// Every station, in full view.
    pub fn stations(&self) -> Result<Value, UpstreamError> {
        let doc = self.rpc.get_json("/id/stations?_view=full")?;
        Ok(items(doc))
    }
    /// The full upstream document describing one station.
    pub fn station(&self, id: &str) -> Result<Value, UpstreamError> {
        self.rpc.get_json(format!("/id/stations/{}.json", id))
    }
    /// Readings for a station taken at or after `since`, in upstream `_sorted` order.
    pub fn readings(&self, id: &str, since: &str) -> Result<Value, UpstreamError> {
        let doc = self.rpc.get_json(format!("/id/stations/{}/readings?since={}&_sorted", id, since))?;
        Ok(items(doc))
    }
}
