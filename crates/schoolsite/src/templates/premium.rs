use std::fmt::Write as _;

use super::html::escape_html;
use super::sections;
use super::{SiteContext, SiteTemplate};

/// Full layout with every section plus a leadership message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PremiumTemplate;

impl SiteTemplate for PremiumTemplate {
    fn slug(&self) -> &'static str {
        "template_premium"
    }

    fn name(&self) -> &'static str {
        "Premium"
    }

    fn render(&self, site: &SiteContext<'_>) -> String {
        let model = site.model;
        let mut html = sections::header(&model.school, &model.identity);
        html.push_str(&sections::main_open("premium", site.path));
        html.push_str(&sections::hero(&model.hero_media));

        if let Some(head) = sections::visible(&model.personnel).first() {
            if !model.identity.mission.is_empty() {
                writeln!(
                    html,
                    "<blockquote class=\"leader-message\"><p>{}</p><cite>{}, {}</cite></blockquote>",
                    escape_html(&model.identity.mission),
                    escape_html(&head.name),
                    escape_html(&head.role)
                )
                .expect("write leadership message");
            }
        }

        html.push_str(&sections::about(&model.identity, "Our philosophy"));
        html.push_str(&sections::statistics(&model.statistics, "By the numbers"));
        html.push_str(&sections::results(&model.academic_results, "Board results"));
        html.push_str(&sections::achievements(&model.achievements, "Hall of fame"));
        html.push_str(&sections::personnel(&model.personnel, "Leadership & faculty"));
        html.push_str(&sections::announcements(&model.announcements, "Notice board"));
        html.push_str(&sections::events(&model.events, "Calendar"));
        html.push_str(&sections::gallery(&model.media_library, "Campus life"));
        html.push_str(&sections::admissions(&model.admission_steps, &model.school, "Join us"));
        html.push_str(&sections::contact(&model.school, "Visit us"));
        html.push_str("</main>\n");
        html.push_str(&sections::footer(&model.school));
        html
    }
}
