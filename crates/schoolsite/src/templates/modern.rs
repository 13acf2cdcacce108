use super::sections;
use super::{SiteContext, SiteTemplate};

/// Card layout: hero and figures up front, news and events side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModernTemplate;

impl SiteTemplate for ModernTemplate {
    fn slug(&self) -> &'static str {
        "template_modern"
    }

    fn name(&self) -> &'static str {
        "Modern"
    }

    fn render(&self, site: &SiteContext<'_>) -> String {
        let model = site.model;
        let mut html = sections::header(&model.school, &model.identity);
        html.push_str(&sections::main_open("modern", site.path));
        html.push_str(&sections::hero(&model.hero_media));
        html.push_str(&sections::statistics(&model.statistics, ""));
        html.push_str("<div class=\"grid two-up\">\n");
        html.push_str(&sections::announcements(&model.announcements, "Latest news"));
        html.push_str(&sections::events(&model.events, "What's on"));
        html.push_str("</div>\n");
        html.push_str(&sections::about(&model.identity, ""));
        html.push_str(&sections::results(&model.academic_results, ""));
        html.push_str(&sections::admissions(&model.admission_steps, &model.school, ""));
        html.push_str(&sections::contact(&model.school, ""));
        html.push_str("</main>\n");
        html.push_str(&sections::footer(&model.school));
        html
    }
}
