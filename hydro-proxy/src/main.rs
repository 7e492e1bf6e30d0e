//! A caching proxy in front of the Environment Agency flood-monitoring API.
//!
//! Serves the raw station list, station details and recent readings as
//! JSON (cached for `cache_ttl_secs`), plus an uncached HTML listing of
//! every station.

pub mod errors;
pub mod config;
pub mod cache;
pub mod ctx;
pub mod locale;
pub mod stations;
pub mod tmpl;
pub mod templates;
pub mod upstream;
pub mod window;

#[cfg(test)]
mod tests;

use log::*;
use hydro_util::ConfigExt;

use crate::config::Config;
use crate::ctx::App;
use crate::errors::*;

fn main() -> Result<()> {
    hydro_util::setup_logging()?;
    info!("hydro-proxy starting");
    info!("loading config");
    let cfg = Config::load()?;
    info!("upstream = {}, cache TTL = {}s, locale = {}", cfg.upstream_base_url, cfg.cache_ttl_secs, cfg.locale);
    info!("initialising Handlebars");
    let hbs = tmpl::handlebars_init()?;
    let srv = App::new(&cfg, hbs)?;
    hydro_util::http::start_server(&cfg.listen, srv)
}
