//! HTML templates, compiled once at startup.
//!
//! Template sources live next to the crate in `templates/` and are embedded at
//! build time. They are plain minijinja (Jinja2) with HTML auto-escaping; values
//! that are already markup (highlighted code, rendered Markdown, analytics,
//! stylesheets) are passed as safe strings.

use minijinja::{Environment, Value};
use serde::Serialize;

pub const BASE: &str = "base.html";
pub const DOCUMENT: &str = "document.html";
pub const READER: &str = "reader.html";
pub const ERROR: &str = "error.html";
pub const INDEX: &str = "index.html";

const SOURCES: [(&str, &str); 5] = [
    (BASE, include_str!("../../../templates/base.html")),
    (DOCUMENT, include_str!("../../../templates/document.html")),
    (READER, include_str!("../../../templates/reader.html")),
    (ERROR, include_str!("../../../templates/error.html")),
    (INDEX, include_str!("../../../templates/index.html")),
];

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compile every page template. `analytics` is injected verbatim into all pages.
    pub fn load(analytics: &str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in SOURCES {
            env.add_template(name, source)?;
        }
        env.add_global("analytics", Value::from_safe_string(analytics.to_string()));

        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn every_template_compiles() {
        let templates = Templates::load("").unwrap();
        for (name, _) in SOURCES {
            assert!(templates.env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn analytics_is_not_escaped() {
        let templates = Templates::load("<script>track()</script>").unwrap();
        let page = templates.render(INDEX, context! {}).unwrap();
        assert!(page.contains("<script>track()</script>"));
    }

    #[test]
    fn plain_values_are_escaped() {
        let templates = Templates::load("").unwrap();
        let page = templates
            .render(ERROR, context! { status => "400 Bad Request", error => "<b>bad</b>" })
            .unwrap();
        assert!(page.contains("&lt;b&gt;bad"));
        assert!(!page.contains("<b>bad"));
    }
}
