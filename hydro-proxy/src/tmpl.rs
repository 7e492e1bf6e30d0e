//! Templating engine stuff.

use serde::Serialize;
use std::borrow::Cow;
use handlebars::Handlebars;
use rouille::Response;
use serde_derive::Serialize;
use log::*;

use crate::errors::*;
use crate::locale::{Labels, Locale};

#[derive(Serialize)]
pub struct TemplateContext<'a, T> where T: Serialize {
    pub template: &'static str,
    pub title: Cow<'a, str>,
    pub lang: &'static str,
    pub labels: &'static Labels,
    pub body: T
}
impl<'a, T> TemplateContext<'a, T> where T: Serialize {
    pub fn new(template: &'static str, locale: Locale, body: T) -> Self {
        let labels = locale.labels();
        TemplateContext {
            template,
            title: labels.title.into(),
            lang: locale.html_lang(),
            labels,
            body
        }
    }
    pub fn render(self, hbs: &Handlebars<'_>) -> ProxyResult<Response> {
        match hbs.render(self.template, &self) {
            Ok(d) => Ok(Response::html(d)),
            Err(e) => {
                warn!("Failed to render template: {}", e);
                Err(e)?
            }
        }
    }
}
struct Partial {
    name: &'static str,
    content: &'static str
}
macro_rules! partial {
    ($name:expr) => {
        Partial {
            name: $name,
            content: include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name, ".html.hbs"))
        }
    }
}

// *** Instructions for adding a new page or partial ***
// - 1. Create templates/NAME.html.hbs (and src/templates/NAME.rs for a page's view).
// - 2. Add partial!("NAME") to PAGES or PARTIALS below.
// - 3. Increment the array length.
static PARTIALS: [Partial; 2] = [
    partial!("header"),
    partial!("footer")
];
static PAGES: [Partial; 2] = [
    partial!("index"),
    partial!("not_found")
];
pub fn handlebars_init() -> Result<Handlebars<'static>> {
    let mut hbs = Handlebars::new();
    hbs.set_strict_mode(true);
    for partial in PARTIALS.iter() {
        hbs.register_partial(partial.name, partial.content)?;
    }
    for page in PAGES.iter() {
        hbs.register_template_string(page.name, page.content)?;
    }
    Ok(hbs)
}
