use crate::activity::{CanonicalActivity, tag_matches};

/// Source-app filter value meaning "every app".
pub const ALL_APPS: &str = "全部";

pub fn is_all_apps(app: &str) -> bool {
    let app = app.trim();
    app == ALL_APPS || app.eq_ignore_ascii_case("all")
}

/// Page selected from a URL fragment such as `#Bank`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute {
    Home,
    Category(String),
}

impl PageRoute {
    /// Unknown, empty, or `home` fragments all land on the home page.
    pub fn from_fragment(fragment: &str, known_pages: &[String]) -> Self {
        let tag = fragment.trim().trim_start_matches('#');
        if tag.is_empty() || tag == "home" || !known_pages.iter().any(|p| p == tag) {
            Self::Home
        } else {
            Self::Category(tag.to_string())
        }
    }
}

/// Read-only queries over one snapshot of activities. Results keep the
/// snapshot's relative order.
#[derive(Debug, Clone, Copy)]
pub struct ActivityQuery<'a> {
    activities: &'a [CanonicalActivity],
    lenient: bool,
}

impl<'a> ActivityQuery<'a> {
    pub fn new(activities: &'a [CanonicalActivity], lenient: bool) -> Self {
        Self {
            activities,
            lenient,
        }
    }

    pub fn all(&self) -> Vec<&'a CanonicalActivity> {
        self.activities.iter().collect()
    }

    pub fn by_category(&self, tag: &str) -> Vec<&'a CanonicalActivity> {
        self.activities
            .iter()
            .filter(|a| self.has_tag(a, tag))
            .collect()
    }

    /// Activities carrying both tags.
    pub fn by_category_and_subcategory(
        &self,
        tag: &str,
        sub_tag: &str,
    ) -> Vec<&'a CanonicalActivity> {
        self.activities
            .iter()
            .filter(|a| self.has_tag(a, tag) && self.has_tag(a, sub_tag))
            .collect()
    }

    pub fn by_source_app(&self, tag: &str, app: &str) -> Vec<&'a CanonicalActivity> {
        if is_all_apps(app) {
            return self.by_category(tag);
        }
        let app = app.trim();
        self.activities
            .iter()
            .filter(|a| self.has_tag(a, tag) && a.source_app.trim() == app)
            .collect()
    }

    /// Distinct trimmed source apps within `tag`, first-seen order.
    pub fn distinct_source_apps(&self, tag: &str) -> Vec<&'a str> {
        let mut apps: Vec<&'a str> = Vec::new();
        for activity in self.by_category(tag) {
            let app = activity.source_app.trim();
            if !app.is_empty() && !apps.contains(&app) {
                apps.push(app);
            }
        }
        apps
    }

    pub fn for_route(&self, route: &PageRoute) -> Vec<&'a CanonicalActivity> {
        match route {
            PageRoute::Home => self.all(),
            PageRoute::Category(tag) => self.by_category(tag),
        }
    }

    fn has_tag(&self, activity: &CanonicalActivity, tag: &str) -> bool {
        if activity.has_category(tag) {
            return true;
        }
        if !self.lenient {
            return false;
        }
        let hit = activity
            .categories
            .iter()
            .any(|c| tag_matches(c, tag, true));
        if hit {
            tracing::warn!(
                id = activity.id.as_str(),
                tag,
                categories = ?activity.categories,
                "tag matched only after case folding; snapshot may predate normalization"
            );
        }
        hit
    }
}
