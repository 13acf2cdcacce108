use super::sections::{self, section_order};
use super::{SiteContext, SiteTemplate};

const DEFAULT_ORDER: &[&str] = &[
    "hero",
    "about",
    "announcements",
    "results",
    "achievements",
    "personnel",
    "events",
    "gallery",
    "admissions",
    "contact",
];

/// Single-column layout that follows the school's configured section order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicTemplate;

impl SiteTemplate for ClassicTemplate {
    fn slug(&self) -> &'static str {
        "template_classic"
    }

    fn name(&self) -> &'static str {
        "Classic"
    }

    fn render(&self, site: &SiteContext<'_>) -> String {
        let model = site.model;
        let mut html = sections::header(&model.school, &model.identity);
        html.push_str(&sections::main_open("classic", site.path));
        for (key, title) in section_order(&model.homepage_sections, DEFAULT_ORDER) {
            let block = match key {
                "hero" => sections::hero(&model.hero_media),
                "about" => sections::about(&model.identity, title),
                "statistics" => sections::statistics(&model.statistics, title),
                "announcements" => sections::announcements(&model.announcements, title),
                "results" => sections::results(&model.academic_results, title),
                "achievements" => sections::achievements(&model.achievements, title),
                "personnel" => sections::personnel(&model.personnel, title),
                "events" => sections::events(&model.events, title),
                "gallery" => sections::gallery(&model.media_library, title),
                "admissions" => sections::admissions(&model.admission_steps, &model.school, title),
                "contact" => sections::contact(&model.school, title),
                _ => String::new(),
            };
            html.push_str(&block);
        }
        html.push_str("</main>\n");
        html.push_str(&sections::footer(&model.school));
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::view_model::{HomepageSection, TenantViewModel};
    use crate::tenant::{SubscriptionCheckResult, SubscriptionStatus};

    #[test]
    fn follows_configured_section_order() {
        let mut model = TenantViewModel::default();
        model.school.name = "Order Test School".to_string();
        model.school.address = "1 Main Road".to_string();
        model.identity.vision = "Curiosity".to_string();
        model.homepage_sections = vec![
            HomepageSection {
                section_key: "contact".to_string(),
                title: "Reach us".to_string(),
                display_order: 1,
                is_active: true,
                ..HomepageSection::default()
            },
            HomepageSection {
                section_key: "about".to_string(),
                display_order: 2,
                is_active: true,
                ..HomepageSection::default()
            },
        ];
        let site = SiteContext {
            model: &model,
            subscription: SubscriptionCheckResult {
                status: SubscriptionStatus::Active,
                is_access_allowed: true,
                days_remaining: None,
            },
            path: "/",
        };

        let html = ClassicTemplate.render(&site);
        let contact = html.find("Reach us").expect("contact rendered");
        let about = html.find("Curiosity").expect("about rendered");
        assert!(contact < about);
    }
}
