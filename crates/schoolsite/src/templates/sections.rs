//! Section markup shared by the site templates.

use std::fmt::Write as _;

use super::html::escape_html;
use crate::tenant::view_model::{
    AcademicResult, Achievement, AdmissionStep, Announcement, HeroMedia, HomepageSection,
    MediaItem, Personnel, SchoolEvent, SchoolIdentity, SchoolProfile, Statistic,
};
use crate::tenant::Listed;

/// Active items ordered by `display_order`; ties keep payload order.
pub fn visible<T: Listed>(items: &[T]) -> Vec<&T> {
    let mut shown: Vec<&T> = items.iter().filter(|item| item.is_active()).collect();
    shown.sort_by_key(|item| item.display_order());
    shown
}

/// Section keys in display order, falling back to `default_order` when the
/// school has not configured any.
pub(crate) fn section_order<'a>(
    sections: &'a [HomepageSection],
    default_order: &[&'a str],
) -> Vec<(&'a str, &'a str)> {
    let configured = visible(sections);
    if configured.is_empty() {
        return default_order.iter().map(|key| (*key, "")).collect();
    }
    configured
        .into_iter()
        .map(|section| (section.section_key.as_str(), section.title.as_str()))
        .collect()
}

fn heading_or<'a>(title: &'a str, fallback: &'a str) -> &'a str {
    if title.trim().is_empty() {
        fallback
    } else {
        title
    }
}

fn open_section(html: &mut String, key: &str, title: &str) {
    writeln!(
        html,
        "<section id=\"{}\" class=\"section section-{}\">\n<h2>{}</h2>",
        escape_html(key),
        escape_html(key),
        escape_html(title)
    )
    .expect("write section heading");
}

pub(crate) fn grace_banner(school: &SchoolProfile, days_remaining: i64) -> String {
    let mut html = String::new();
    let day_label = if days_remaining == 1 { "day" } else { "days" };
    write!(
        html,
        "<aside class=\"renewal-banner\" role=\"status\">The subscription for this site has lapsed. \
         It stays online for {days_remaining} more {day_label}."
    )
    .expect("write grace banner");
    if !school.payment_url.is_empty() {
        write!(
            html,
            " <a href=\"{}\">Renew now</a>",
            escape_html(&school.payment_url)
        )
        .expect("write renewal link");
    }
    html.push_str("</aside>\n");
    html
}

pub(crate) fn header(school: &SchoolProfile, identity: &SchoolIdentity) -> String {
    let mut html = String::from("<header class=\"site-header\">\n");
    if !school.logo_url.is_empty() {
        writeln!(
            html,
            "<img class=\"logo\" src=\"{}\" alt=\"{}\">",
            escape_html(&school.logo_url),
            escape_html(&school.name)
        )
        .expect("write logo");
    }
    writeln!(html, "<h1>{}</h1>", escape_html(&school.name)).expect("write school name");
    if !identity.motto.is_empty() {
        writeln!(html, "<p class=\"motto\">{}</p>", escape_html(&identity.motto))
            .expect("write motto");
    }
    html.push_str("</header>\n");
    html
}

pub(crate) fn hero(items: &[HeroMedia]) -> String {
    let slides = visible(items);
    if slides.is_empty() {
        return String::new();
    }
    let mut html = String::from("<section id=\"hero\" class=\"hero\">\n");
    for slide in slides {
        html.push_str("<figure class=\"hero-slide\">");
        if slide.media_type == "video" {
            write!(html, "<video src=\"{}\" autoplay muted loop></video>", escape_html(&slide.media_url))
                .expect("write hero video");
        } else {
            write!(
                html,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&slide.media_url),
                escape_html(&slide.title)
            )
            .expect("write hero image");
        }
        write!(html, "<figcaption><strong>{}</strong>", escape_html(&slide.title))
            .expect("write hero title");
        if !slide.subtitle.is_empty() {
            write!(html, " <span>{}</span>", escape_html(&slide.subtitle)).expect("write subtitle");
        }
        if !slide.cta_label.is_empty() && !slide.cta_url.is_empty() {
            write!(
                html,
                " <a class=\"cta\" href=\"{}\">{}</a>",
                escape_html(&slide.cta_url),
                escape_html(&slide.cta_label)
            )
            .expect("write call to action");
        }
        html.push_str("</figcaption></figure>\n");
    }
    html.push_str("</section>\n");
    html
}

pub(crate) fn about(identity: &SchoolIdentity, title: &str) -> String {
    if identity.vision.is_empty() && identity.mission.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    open_section(&mut html, "about", heading_or(title, "About us"));
    for (label, value) in [("Vision", &identity.vision), ("Mission", &identity.mission)] {
        if !value.is_empty() {
            writeln!(html, "<h3>{label}</h3>\n<p>{}</p>", escape_html(value)).expect("write identity");
        }
    }
    html.push_str("</section>\n");
    html
}

pub(crate) fn statistics(items: &[Statistic], title: &str) -> String {
    let stats = visible(items);
    if stats.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    open_section(&mut html, "statistics", heading_or(title, "At a glance"));
    html.push_str("<dl class=\"stats\">\n");
    for stat in stats {
        writeln!(
            html,
            "<div><dt>{}</dt><dd>{}{}</dd></div>",
            escape_html(&stat.label),
            format_number(stat.value),
            escape_html(&stat.suffix)
        )
        .expect("write statistic");
    }
    html.push_str("</dl>\n</section>\n");
    html
}

pub(crate) fn announcements(items: &[Announcement], title: &str) -> String {
    let mut notices = visible(items);
    if notices.is_empty() {
        return String::new();
    }
    // Pinned notices lead; the sort is stable so display order holds within each group.
    notices.sort_by_key(|notice| !notice.is_pinned);
    let mut html = String::new();
    open_section(&mut html, "announcements", heading_or(title, "Announcements"));
    html.push_str("<ul class=\"notices\">\n");
    for notice in notices {
        write!(html, "<li><h3>{}</h3>", escape_html(&notice.title)).expect("write notice title");
        if !notice.published_on.is_empty() {
            write!(html, "<time>{}</time>", escape_html(&notice.published_on)).expect("write notice date");
        }
        if !notice.body.is_empty() {
            write!(html, "<p>{}</p>", escape_html(&notice.body)).expect("write notice body");
        }
        if !notice.link_url.is_empty() {
            write!(html, "<a href=\"{}\">Read more</a>", escape_html(&notice.link_url))
                .expect("write notice link");
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</section>\n");
    html
}

pub(crate) fn results(items: &[AcademicResult], title: &str) -> String {
    let rows = visible(items);
    if rows.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    open_section(&mut html, "results", heading_or(title, "Academic results"));
    html.push_str(
        "<table>\n<thead><tr><th>Year</th><th>Examination</th><th>Appeared</th><th>Pass %</th><th>Topper</th></tr></thead>\n<tbody>\n",
    );
    for row in rows {
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} {}</td></tr>",
            row.year,
            escape_html(&row.exam),
            row.students_appeared,
            format_number(row.pass_percentage),
            escape_html(&row.topper_name),
            escape_html(&row.topper_score)
        )
        .expect("write result row");
    }
    html.push_str("</tbody>\n</table>\n</section>\n");
    html
}

pub(crate) fn achievements(items: &[Achievement], title: &str) -> String {
    let entries = visible(items);
    if entries.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    open_section(&mut html, "achievements", heading_or(title, "Achievements"));
    for entry in entries {
        html.push_str("<article class=\"achievement\">");
        if !entry.image_url.is_empty() {
            write!(
                html,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&entry.image_url),
                escape_html(&entry.title)
            )
            .expect("write achievement image");
        }
        write!(
            html,
            "<h3>{}</h3><p>{}</p>",
            escape_html(&entry.title),
            escape_html(&entry.description)
        )
        .expect("write achievement");
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");
    html
}

pub(crate) fn personnel(items: &[Personnel], title: &str) -> String {
    let people = visible(items);
    if people.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    open_section(&mut html, "personnel", heading_or(title, "Our people"));
    for person in people {
        html.push_str("<article class=\"person\">");
        if !person.photo_url.is_empty() {
            write!(
                html,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&person.photo_url),
                escape_html(&person.name)
            )
            .expect("write portrait");
        }
        write!(
            html,
            "<h3>{}</h3><p class=\"role\">{}</p>",
            escape_html(&person.name),
            escape_html(&person.role)
        )
        .expect("write person");
        if !person.qualification.is_empty() {
            write!(html, "<p class=\"qualification\">{}</p>", escape_html(&person.qualification))
                .expect("write qualification");
        }
        if !person.bio.is_empty() {
            write!(html, "<p>{}</p>", escape_html(&person.bio)).expect("write bio");
        }
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");
    html
}

pub(crate) fn events(items: &[SchoolEvent], title: &str) -> String {
    let upcoming = visible(items);
    if upcoming.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    open_section(&mut html, "events", heading_or(title, "Events"));
    html.push_str("<ul class=\"events\">\n");
    for event in upcoming {
        let dates = if event.ends_on.is_empty() || event.ends_on == event.starts_on {
            escape_html(&event.starts_on)
        } else {
            format!("{} – {}", escape_html(&event.starts_on), escape_html(&event.ends_on))
        };
        write!(html, "<li><h3>{}</h3><time>{}</time>", escape_html(&event.title), dates)
            .expect("write event");
        if !event.location.is_empty() {
            write!(html, "<p class=\"location\">{}</p>", escape_html(&event.location))
                .expect("write location");
        }
        if !event.description.is_empty() {
            write!(html, "<p>{}</p>", escape_html(&event.description)).expect("write description");
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</section>\n");
    html
}

pub(crate) fn gallery(items: &[MediaItem], title: &str) -> String {
    let media = visible(items);
    if media.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    open_section(&mut html, "gallery", heading_or(title, "Gallery"));
    html.push_str("<div class=\"gallery\">\n");
    for item in media {
        if item.media_type == "video" {
            writeln!(
                html,
                "<video src=\"{}\" controls title=\"{}\"></video>",
                escape_html(&item.media_url),
                escape_html(&item.title)
            )
            .expect("write gallery video");
        } else {
            writeln!(
                html,
                "<img src=\"{}\" alt=\"{}\" data-album=\"{}\">",
                escape_html(&item.media_url),
                escape_html(&item.title),
                escape_html(&item.album)
            )
            .expect("write gallery image");
        }
    }
    html.push_str("</div>\n</section>\n");
    html
}

pub(crate) fn admissions(items: &[AdmissionStep], school: &SchoolProfile, title: &str) -> String {
    let steps = visible(items);
    if steps.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    open_section(&mut html, "admissions", heading_or(title, "Admissions"));
    html.push_str("<ol class=\"admission-steps\">\n");
    for step in steps {
        writeln!(
            html,
            "<li value=\"{}\"><h3>{}</h3><p>{}</p></li>",
            step.step_number,
            escape_html(&step.title),
            escape_html(&step.description)
        )
        .expect("write admission step");
    }
    html.push_str("</ol>\n");
    if !school.payment_url.is_empty() {
        writeln!(
            html,
            "<p><a class=\"cta\" href=\"{}\">Pay fees online</a></p>",
            escape_html(&school.payment_url)
        )
        .expect("write payment link");
    }
    html.push_str("</section>\n");
    html
}

pub(crate) fn contact(school: &SchoolProfile, title: &str) -> String {
    let mut html = String::new();
    open_section(&mut html, "contact", heading_or(title, "Contact"));
    html.push_str("<address>\n");
    let locality: Vec<&str> = [school.city.as_str(), school.state.as_str(), school.postal_code.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    for line in [school.address.clone(), locality.join(", ")] {
        if !line.is_empty() {
            writeln!(html, "{}<br>", escape_html(&line)).expect("write address line");
        }
    }
    if !school.phone.is_empty() {
        writeln!(
            html,
            "<a href=\"tel:{}\">{}</a><br>",
            escape_html(&school.phone.replace(' ', "")),
            escape_html(&school.phone)
        )
        .expect("write phone");
    }
    if !school.email.is_empty() {
        writeln!(
            html,
            "<a href=\"mailto:{}\">{}</a>",
            escape_html(&school.email),
            escape_html(&school.email)
        )
        .expect("write email");
    }
    html.push_str("</address>\n</section>\n");
    html
}

pub(crate) fn main_open(layout: &str, path: &str) -> String {
    format!(
        "<main class=\"{}\" data-path=\"{}\">\n",
        escape_html(layout),
        escape_html(path)
    )
}

pub(crate) fn footer(school: &SchoolProfile) -> String {
    format!(
        "<footer class=\"site-footer\"><p>&copy; {}</p></footer>\n",
        escape_html(&school.name)
    )
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}
