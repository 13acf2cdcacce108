//! Full-screen notices shown instead of a tenant site.

use axum::http::StatusCode;

use super::html::{document, escape_html};
use super::RenderedPage;
use crate::tenant::view_model::SchoolProfile;

fn notice(status: StatusCode, kind: &str, title: &str, paragraphs: &[String]) -> RenderedPage {
    let mut body = format!(
        "<main class=\"notice notice-{}\">\n<h1>{}</h1>\n",
        escape_html(kind),
        escape_html(title)
    );
    for paragraph in paragraphs {
        body.push_str("<p>");
        body.push_str(paragraph);
        body.push_str("</p>\n");
    }
    body.push_str("</main>");

    RenderedPage {
        status,
        title: title.to_string(),
        html: document(title, "notice", &body),
    }
}

fn school_label(school: &SchoolProfile) -> String {
    if school.name.is_empty() {
        "This school".to_string()
    } else {
        escape_html(&school.name)
    }
}

pub fn fetch_failed(detail: &str) -> RenderedPage {
    let mut paragraphs =
        vec!["We couldn't load this site right now. Please try again later.".to_string()];
    if !detail.is_empty() {
        paragraphs.push(format!("<small>{}</small>", escape_html(detail)));
    }
    notice(
        StatusCode::SERVICE_UNAVAILABLE,
        "error",
        "We'll be right back",
        &paragraphs,
    )
}

pub fn not_set_up(detail: &str) -> RenderedPage {
    let mut paragraphs = vec![
        "This site isn't set up yet. The school is still preparing its content.".to_string(),
    ];
    if !detail.is_empty() {
        paragraphs.push(escape_html(detail));
    }
    notice(StatusCode::OK, "empty", "Coming soon", &paragraphs)
}

pub fn loading() -> RenderedPage {
    notice(
        StatusCode::OK,
        "idle",
        "Loading",
        &["The school's content is on its way.".to_string()],
    )
}

pub fn not_configured(host: &str) -> RenderedPage {
    notice(
        StatusCode::NOT_FOUND,
        "unconfigured",
        "Domain not configured",
        &[
            format!(
                "<strong>{}</strong> is not connected to a school website.",
                escape_html(host)
            ),
            "If you manage this domain, contact the platform team to finish the setup.".to_string(),
        ],
    )
}

pub fn unknown_template(slug: &str) -> RenderedPage {
    notice(
        StatusCode::NOT_FOUND,
        "template",
        "Template not found",
        &[format!(
            "No site template is registered under <code>{}</code>.",
            escape_html(slug)
        )],
    )
}

pub fn subscription_inactive(school: &SchoolProfile) -> RenderedPage {
    notice(
        StatusCode::PAYMENT_REQUIRED,
        "inactive",
        "Site unavailable",
        &[
            format!("{}'s website is temporarily unavailable.", school_label(school)),
            "Please contact the school office for more information.".to_string(),
        ],
    )
}

pub fn subscription_expired(school: &SchoolProfile) -> RenderedPage {
    let mut paragraphs = vec![format!(
        "The subscription has expired for {}'s website.",
        school_label(school)
    )];
    if school.payment_url.is_empty() {
        paragraphs.push("School administrators can renew from the platform dashboard.".to_string());
    } else {
        paragraphs.push(format!(
            "School administrators can <a href=\"{}\">renew the subscription</a> to restore access.",
            escape_html(&school.payment_url)
        ));
    }
    notice(
        StatusCode::PAYMENT_REQUIRED,
        "expired",
        "Subscription expired",
        &paragraphs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_escapes_host() {
        let page = not_configured("<script>.example");
        assert_eq!(page.status, StatusCode::NOT_FOUND);
        assert!(page.html.contains("&lt;script&gt;.example"));
        assert!(!page.html.contains("<script>"));
    }

    #[test]
    fn expired_without_payment_link_points_to_dashboard() {
        let page = subscription_expired(&SchoolProfile::default());
        assert!(page.html.contains("This school"));
        assert!(page.html.contains("dashboard"));
    }
}
