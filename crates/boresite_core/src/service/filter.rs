//! Client-side filters over project and borehole snapshots.

use crate::model::borehole::{Borehole, BoreholeStatus};
use crate::model::project::{Project, ProjectStatus};

/// Project list filter. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    /// Case-insensitive substring over name, client and location.
    pub text: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if self.status.is_some_and(|status| status != project.status) {
            return false;
        }
        match normalized_needle(self.text.as_deref()) {
            None => true,
            Some(needle) => [
                Some(project.name.as_str()),
                project.client.as_deref(),
                project.location_description.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| contains_ignore_case(field, &needle)),
        }
    }
}

/// Borehole list filter. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoreholeFilter {
    pub status: Option<BoreholeStatus>,
    /// Case-insensitive substring over code, name and notes.
    pub text: Option<String>,
}

impl BoreholeFilter {
    pub fn matches(&self, borehole: &Borehole) -> bool {
        if self.status.is_some_and(|status| status != borehole.status) {
            return false;
        }
        match normalized_needle(self.text.as_deref()) {
            None => true,
            Some(needle) => [
                Some(borehole.code.as_str()),
                borehole.name.as_deref(),
                Some(borehole.notes.as_str()),
            ]
            .into_iter()
            .flatten()
            .any(|field| contains_ignore_case(field, &needle)),
        }
    }
}

fn normalized_needle(text: Option<&str>) -> Option<String> {
    text.map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::ProjectFilter;
    use crate::model::project::{CoordinateSystem, Project, ProjectStatus};
    use uuid::Uuid;

    fn project(name: &str, client: Option<&str>, status: ProjectStatus) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            client: client.map(str::to_string),
            location_description: None,
            coordinate_system: CoordinateSystem::Wgs84,
            status,
            boreholes: Vec::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn blank_text_matches_everything() {
        let filter = ProjectFilter {
            status: None,
            text: Some("   ".to_string()),
        };
        assert!(filter.matches(&project("Any", None, ProjectStatus::Archived)));
    }

    #[test]
    fn text_matches_client_case_insensitively() {
        let filter = ProjectFilter {
            status: None,
            text: Some("ACME".to_string()),
        };
        assert!(filter.matches(&project("Wharf", Some("Acme Ltd"), ProjectStatus::Active)));
        assert!(!filter.matches(&project("Wharf", Some("Other"), ProjectStatus::Active)));
    }

    #[test]
    fn status_and_text_must_both_match() {
        let filter = ProjectFilter {
            status: Some(ProjectStatus::Active),
            text: Some("wharf".to_string()),
        };
        assert!(!filter.matches(&project("Wharf", None, ProjectStatus::Archived)));
    }
}
