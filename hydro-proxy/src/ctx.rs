//! Main server context.

use handlebars::Handlebars;
use rouille::{Request, Response, router};
use serde_json::{json, Value};
use std::time::Duration;
use log::*;
use hydro_util::http::{HttpServer, StatusCode};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::errors::*;
use crate::locale::Locale;
use crate::stations::project_stations;
use crate::tmpl::TemplateContext;
use crate::upstream::FloodApi;
use crate::window::Period;

/// Query string with its pairs in sorted order, so that parameter order
/// doesn't split the cache.
fn sorted_query(raw: &str) -> String {
    let mut pairs = raw.split('&')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>();
    pairs.sort_unstable();
    pairs.join("&")
}

pub struct App {
    hbs: Handlebars<'static>,
    api: FloodApi,
    cache: ResponseCache,
    cache_ttl: Duration,
    locale: Locale
}
impl App {
    pub fn new(cfg: &Config, hbs: Handlebars<'static>) -> Result<Self> {
        let api = FloodApi::new(cfg)?;
        let locale = Locale::from_code(&cfg.locale)
            .unwrap_or_else(|| {
                warn!("Unsupported locale {:?}, using English", cfg.locale);
                Locale::default()
            });
        Ok(App {
            hbs, api, locale,
            cache: ResponseCache::new(),
            cache_ttl: Duration::from_secs(cfg.cache_ttl_secs)
        })
    }
    /// Serve a JSON document from the cache, fetching it on a miss.
    fn cached_json<F>(&self, key: &str, fetch: F) -> ProxyResult<Response> where F: FnOnce() -> ProxyResult<Value> {
        let body = self.cache.get_or_compute(key, self.cache_ttl, || -> ProxyResult<String> {
            let doc = fetch()?;
            Ok(serde_json::to_string(&doc)?)
        })?;
        Ok(Response::from_data("application/json", body))
    }
    fn locale_for(&self, req: &Request) -> Locale {
        req.get_param("lang")
            .and_then(|l| Locale::from_code(&l))
            .unwrap_or(self.locale)
    }
    fn index(&self, req: &Request) -> ProxyResult<Response> {
        use crate::templates::index::{IndexView, StationView};

        let locale = self.locale_for(req);
        let (stations, error) = match self.api.stations() {
            Ok(items) => {
                let items = items.as_array().map(Vec::as_slice).unwrap_or(&[]);
                let stations = project_stations(items)
                    .into_iter()
                    .map(StationView::from)
                    .collect::<Vec<_>>();
                (stations, String::new())
            },
            Err(e) => {
                warn!("Fetching station list failed: {}", e);
                (vec![], format!("{}: {}", locale.labels().fetch_failed, e))
            }
        };
        TemplateContext::new("index", locale, IndexView { error, stations })
            .render(&self.hbs)
    }
}
impl HttpServer for App {
    type Error = ProxyError;

    fn on_request(&self, req: &Request) -> ProxyResult<Response> {
        router!(req,
            (GET) (/) => {
                self.index(req)
            },
            (GET) (/api/stations) => {
                self.cached_json(&req.url(), || Ok(self.api.stations()?))
            },
            (GET) (/api/station/{id: String}) => {
                self.cached_json(&req.url(), || Ok(self.api.station(&id)?))
            },
            (GET) (/api/readings/{id: String}) => {
                let period = Period::from_token(req.get_param("period").as_deref());
                let key = format!("{}?{}", req.url(), sorted_query(req.raw_query_string()));
                self.cached_json(&key, || Ok(self.api.readings(&id, &period.since())?))
            },
            _ => {
                Err(ProxyError::NotFound)
            }
        )
    }
    fn error_response(&self, req: &Request, err: &ProxyError) -> Response {
        use crate::templates::not_found::NotFoundView;

        let sc = err.status_code();
        if req.url().starts_with("/api/") {
            return Response::json(&json!({ "error": err.to_string() }))
                .with_status_code(sc);
        }
        let rendered = match *err {
            ProxyError::NotFound => {
                TemplateContext::new("not_found", self.locale_for(req), NotFoundView {
                    uri: req.url()
                }).render(&self.hbs)
            },
            _ => Ok(Response::text(format!("error: {}\n", err)))
        };
        match rendered {
            Ok(r) => r.with_status_code(sc),
            Err(e) => {
                error!("Rendering error response failed: {}", e);
                Response::text("Something's catastrophically broken!")
                    .with_status_code(500)
            }
        }
    }
}
