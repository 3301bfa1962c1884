//! Aggregate figures for the admin dashboard.

use std::collections::BTreeMap;

use super::{Project, ProjectStatus};

/// Number of projects recorded for one sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorCount {
    pub sector: String,
    pub count: u64,
}

/// Dashboard totals over every stored project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub total: u64,
    pub completed: u64,
    /// Percentage of completed projects rounded to one decimal place.
    pub completion_rate: f64,
    /// Sorted by sector name.
    pub sectors: Vec<SectorCount>,
}

impl ProjectSummary {
    /// Build the summary from a project listing.
    ///
    /// # Examples
    /// ```
    /// use saarthi_backend::domain::ProjectSummary;
    ///
    /// let summary = ProjectSummary::from_projects(&[]);
    /// assert_eq!(summary.total, 0);
    /// assert_eq!(summary.completion_rate, 0.0);
    /// ```
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut sectors: BTreeMap<&str, u64> = BTreeMap::new();
        let mut completed = 0_u64;
        for project in projects {
            *sectors.entry(project.sector.as_ref()).or_default() += 1;
            if project.status == ProjectStatus::Completed {
                completed += 1;
            }
        }

        let total = projects.len() as u64;
        let completion_rate = if total == 0 {
            0.0
        } else {
            (completed as f64 * 1000.0 / total as f64).round() / 10.0
        };

        Self {
            total,
            completed,
            completion_rate,
            sectors: sectors
                .into_iter()
                .map(|(sector, count)| SectorCount {
                    sector: sector.to_owned(),
                    count,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AccountId, NewProject, ProjectDraft, ProjectDraftParts, ProjectId,
    };
    use chrono::Utc;
    use rstest::rstest;

    fn project(sector: &str, status: &str) -> Project {
        let draft = ProjectDraft::try_from_parts(ProjectDraftParts {
            project_name: Some("P"),
            sector: Some(sector),
            status: Some(status),
            village_name: Some("V"),
            ..Default::default()
        })
        .expect("valid draft");
        NewProject {
            id: ProjectId::random(),
            draft,
            image_url: None,
            created_by: AccountId::random(),
            created_at: Utc::now(),
        }
        .into_project()
    }

    #[rstest]
    fn counts_sectors_in_name_order() {
        let projects = vec![
            project("Water", "Completed"),
            project("Health", "Ongoing"),
            project("Water", "Ongoing"),
        ];
        let summary = ProjectSummary::from_projects(&projects);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.completion_rate, 33.3);
        assert_eq!(
            summary.sectors,
            vec![
                SectorCount {
                    sector: "Health".into(),
                    count: 1
                },
                SectorCount {
                    sector: "Water".into(),
                    count: 2
                },
            ]
        );
    }

    #[rstest]
    #[case(&["Completed", "Completed"], 100.0)]
    #[case(&["Completed", "Ongoing", "Ongoing"], 33.3)]
    #[case(&["Completed", "Completed", "Ongoing"], 66.7)]
    fn completion_rate_rounds_to_one_decimal(#[case] statuses: &[&str], #[case] expected: f64) {
        let projects: Vec<_> = statuses.iter().map(|s| project("Roads", s)).collect();
        assert_eq!(ProjectSummary::from_projects(&projects).completion_rate, expected);
    }
}
