use std::fmt::Write as _;

use axum::http::StatusCode;

use super::html::{document, escape_html};
use super::{RenderedPage, TemplateRegistry};

/// Home page of the platform's own site, listing the available layouts.
pub fn render_marketing_home(registry: &TemplateRegistry, preview_enabled: bool) -> RenderedPage {
    let title = "School websites, ready in a day";
    let mut body = String::from("<main class=\"marketing\">\n");
    writeln!(body, "<h1>{}</h1>", escape_html(title)).expect("write heading");
    body.push_str(
        "<p>Pick a template, connect your domain, and publish your school's news, results and admissions.</p>\n",
    );
    body.push_str("<ul class=\"templates\">\n");
    for slug in registry.slugs() {
        let name = registry
            .get(slug)
            .map(|template| template.name())
            .unwrap_or(slug);
        if preview_enabled {
            writeln!(
                body,
                "<li><a href=\"/demo/{}\">{}</a></li>",
                escape_html(slug),
                escape_html(name)
            )
            .expect("write template link");
        } else {
            writeln!(body, "<li>{}</li>", escape_html(name)).expect("write template name");
        }
    }
    body.push_str("</ul>\n</main>");

    RenderedPage {
        status: StatusCode::OK,
        title: title.to_string(),
        html: document(title, "marketing", &body),
    }
}
