//! Stable view-model consumed by the site templates.
//!
//! Building is total: missing tables or fields fall back to empty values, and
//! rows are passed through in payload order with inactive entries kept. Hiding
//! and ordering belong to the templates.

use serde::Serialize;

use super::rows::{flag, integer, number, text, Row, RowSet, TableKey};

/// A collection item mapped from one row of its table.
pub trait FromRow: Sized {
    const TABLE: TableKey;

    fn from_row(row: &Row) -> Self;
}

/// Display hints shared by every repeated section.
pub trait Listed {
    fn is_active(&self) -> bool;
    fn display_order(&self) -> i64;
}

macro_rules! listed {
    ($($ty:ty),+ $(,)?) => {
        $(impl Listed for $ty {
            fn is_active(&self) -> bool {
                self.is_active
            }

            fn display_order(&self) -> i64 {
                self.display_order
            }
        })+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchoolProfile {
    pub name: String,
    pub short_name: String,
    pub logo_url: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub template_id: String,
    pub payment_url: String,
    pub is_active: bool,
    pub expiration_date: String,
    pub grace_period_days: i64,
}

impl FromRow for SchoolProfile {
    const TABLE: TableKey = TableKey::School;

    fn from_row(row: &Row) -> Self {
        Self {
            name: text(row, "name"),
            short_name: text(row, "short_name"),
            logo_url: text(row, "logo_url"),
            email: text(row, "email"),
            phone: text(row, "phone"),
            address: text(row, "address"),
            city: text(row, "city"),
            state: text(row, "state"),
            postal_code: text(row, "postal_code"),
            template_id: text(row, "template_id"),
            payment_url: text(row, "payment_url"),
            is_active: flag(row, "is_active"),
            expiration_date: text(row, "expiration_date"),
            grace_period_days: integer(row, "grace_period_days"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchoolIdentity {
    pub vision: String,
    pub mission: String,
    pub motto: String,
}

impl FromRow for SchoolIdentity {
    const TABLE: TableKey = TableKey::Identity;

    fn from_row(row: &Row) -> Self {
        Self {
            vision: text(row, "vision"),
            mission: text(row, "mission"),
            motto: text(row, "motto"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeroMedia {
    pub title: String,
    pub subtitle: String,
    pub media_url: String,
    pub media_type: String,
    pub cta_label: String,
    pub cta_url: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for HeroMedia {
    const TABLE: TableKey = TableKey::HeroMedia;

    fn from_row(row: &Row) -> Self {
        Self {
            title: text(row, "title"),
            subtitle: text(row, "subtitle"),
            media_url: text(row, "media_url"),
            media_type: text(row, "media_type"),
            cta_label: text(row, "cta_label"),
            cta_url: text(row, "cta_url"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Announcement {
    pub title: String,
    pub body: String,
    pub published_on: String,
    pub link_url: String,
    pub is_pinned: bool,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for Announcement {
    const TABLE: TableKey = TableKey::Announcements;

    fn from_row(row: &Row) -> Self {
        Self {
            title: text(row, "title"),
            body: text(row, "body"),
            published_on: text(row, "published_on"),
            link_url: text(row, "link_url"),
            is_pinned: flag(row, "is_pinned"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AcademicResult {
    pub year: i64,
    pub exam: String,
    pub students_appeared: i64,
    pub pass_percentage: f64,
    pub topper_name: String,
    pub topper_score: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for AcademicResult {
    const TABLE: TableKey = TableKey::AcademicResults;

    fn from_row(row: &Row) -> Self {
        Self {
            year: integer(row, "year"),
            exam: text(row, "exam"),
            students_appeared: integer(row, "students_appeared"),
            pass_percentage: number(row, "pass_percentage"),
            topper_name: text(row, "topper_name"),
            topper_score: text(row, "topper_score"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub achieved_on: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for Achievement {
    const TABLE: TableKey = TableKey::Achievements;

    fn from_row(row: &Row) -> Self {
        Self {
            title: text(row, "title"),
            description: text(row, "description"),
            image_url: text(row, "image_url"),
            achieved_on: text(row, "achieved_on"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Personnel {
    pub name: String,
    pub role: String,
    pub qualification: String,
    pub photo_url: String,
    pub bio: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for Personnel {
    const TABLE: TableKey = TableKey::Personnel;

    fn from_row(row: &Row) -> Self {
        Self {
            name: text(row, "name"),
            role: text(row, "role"),
            qualification: text(row, "qualification"),
            photo_url: text(row, "photo_url"),
            bio: text(row, "bio"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistic {
    pub label: String,
    pub value: f64,
    pub suffix: String,
    pub icon: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for Statistic {
    const TABLE: TableKey = TableKey::Statistics;

    fn from_row(row: &Row) -> Self {
        Self {
            label: text(row, "label"),
            value: number(row, "value"),
            suffix: text(row, "suffix"),
            icon: text(row, "icon"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaItem {
    pub title: String,
    pub media_url: String,
    pub media_type: String,
    pub album: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for MediaItem {
    const TABLE: TableKey = TableKey::MediaLibrary;

    fn from_row(row: &Row) -> Self {
        Self {
            title: text(row, "title"),
            media_url: text(row, "media_url"),
            media_type: text(row, "media_type"),
            album: text(row, "album"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchoolEvent {
    pub title: String,
    pub description: String,
    pub starts_on: String,
    pub ends_on: String,
    pub location: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for SchoolEvent {
    const TABLE: TableKey = TableKey::Events;

    fn from_row(row: &Row) -> Self {
        Self {
            title: text(row, "title"),
            description: text(row, "description"),
            starts_on: text(row, "starts_on"),
            ends_on: text(row, "ends_on"),
            location: text(row, "location"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdmissionStep {
    pub step_number: i64,
    pub title: String,
    pub description: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for AdmissionStep {
    const TABLE: TableKey = TableKey::AdmissionSteps;

    fn from_row(row: &Row) -> Self {
        Self {
            step_number: integer(row, "step_number"),
            title: text(row, "title"),
            description: text(row, "description"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomepageSection {
    pub section_key: String,
    pub title: String,
    pub subtitle: String,
    pub display_order: i64,
    pub is_active: bool,
}

impl FromRow for HomepageSection {
    const TABLE: TableKey = TableKey::HomepageSections;

    fn from_row(row: &Row) -> Self {
        Self {
            section_key: text(row, "section_key"),
            title: text(row, "title"),
            subtitle: text(row, "subtitle"),
            display_order: integer(row, "display_order"),
            is_active: flag(row, "is_active"),
        }
    }
}

listed!(
    HeroMedia,
    Announcement,
    AcademicResult,
    Achievement,
    Personnel,
    Statistic,
    MediaItem,
    SchoolEvent,
    AdmissionStep,
    HomepageSection,
);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TenantViewModel {
    pub school: SchoolProfile,
    pub identity: SchoolIdentity,
    pub hero_media: Vec<HeroMedia>,
    pub announcements: Vec<Announcement>,
    pub academic_results: Vec<AcademicResult>,
    pub achievements: Vec<Achievement>,
    pub personnel: Vec<Personnel>,
    pub statistics: Vec<Statistic>,
    pub media_library: Vec<MediaItem>,
    pub events: Vec<SchoolEvent>,
    pub admission_steps: Vec<AdmissionStep>,
    pub homepage_sections: Vec<HomepageSection>,
}

/// Maps API rows into the view-model. First `school`/`identity` row wins.
pub fn build_view_model(rows: &RowSet) -> TenantViewModel {
    TenantViewModel {
        school: singleton(rows),
        identity: singleton(rows),
        hero_media: collect(rows),
        announcements: collect(rows),
        academic_results: collect(rows),
        achievements: collect(rows),
        personnel: collect(rows),
        statistics: collect(rows),
        media_library: collect(rows),
        events: collect(rows),
        admission_steps: collect(rows),
        homepage_sections: collect(rows),
    }
}

fn singleton<T: FromRow + Default>(rows: &RowSet) -> T {
    rows.first(T::TABLE).map(T::from_row).unwrap_or_default()
}

fn collect<T: FromRow>(rows: &RowSet) -> Vec<T> {
    rows.rows(T::TABLE).map(T::from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn groups(value: Value) -> RowSet {
        let groups: Vec<Map<String, Value>> =
            serde_json::from_value(value).expect("array of row groups");
        RowSet::from_groups(groups).expect("known tables")
    }

    #[test]
    fn empty_input_yields_defaults() {
        let model = build_view_model(&RowSet::new());
        assert_eq!(model, TenantViewModel::default());
        assert!(model.events.is_empty());
        assert!(model.personnel.is_empty());
        assert_eq!(model.school.name, "");
        assert!(!model.school.is_active);
    }

    #[test]
    fn first_school_row_wins() {
        let model = build_view_model(&groups(json!([
            {"school": {"name": "Crescent Matriculation", "is_active": true, "grace_period_days": "7"}},
            {"school": {"name": "Impostor", "is_active": false}},
            {"identity": {"motto": "Learn to serve"}},
            {"identity": {"motto": "Ignored"}}
        ])));

        assert_eq!(model.school.name, "Crescent Matriculation");
        assert!(model.school.is_active);
        assert_eq!(model.school.grace_period_days, 7);
        assert_eq!(model.identity.motto, "Learn to serve");
    }

    #[test]
    fn collections_keep_order_and_inactive_rows() {
        let model = build_view_model(&groups(json!([
            {"personnel": {"name": "Principal", "display_order": 2, "is_active": true}},
            {"personnel": {"name": "Retired", "display_order": 1, "is_active": false}},
            {"statistics": {"label": "Students", "value": "1200", "suffix": "+"}}
        ])));

        let names: Vec<&str> = model.personnel.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Principal", "Retired"]);
        assert!(!model.personnel[1].is_active);
        assert_eq!(model.statistics[0].value, 1200.0);
        assert!(model.events.is_empty());
    }
}
