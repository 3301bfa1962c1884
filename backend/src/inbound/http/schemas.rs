//! Wire representations of domain values.
//!
//! Domain types stay free of serde naming decisions; these bodies fix the
//! snake_case JSON shape shared by every endpoint and carry the OpenAPI
//! schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Account, Project, ProjectSummary, Role, SectorCount};

/// Public account fields. Password hashes never leave the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccountBody {
    pub id: Uuid,
    #[schema(example = "Asha Devi")]
    pub name: String,
    #[schema(example = "asha@example.org")]
    pub email: String,
    #[schema(value_type = String, example = "officer")]
    pub role: Role,
}

impl From<&Account> for AccountBody {
    fn from(account: &Account) -> Self {
        Self {
            id: *account.id.as_uuid(),
            name: account.name.to_string(),
            email: account.email.to_string(),
            role: account.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectBody {
    pub id: Uuid,
    #[schema(example = "Community well")]
    pub project_name: String,
    #[schema(example = "Water")]
    pub sector: String,
    #[schema(example = "Ongoing")]
    pub status: String,
    #[schema(example = "Rampur")]
    pub village_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[schema(example = "/uploads/0f8fad5bd9cb469fa16570867728950e.jpg")]
    pub image_url: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for ProjectBody {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id.as_uuid(),
            project_name: project.project_name.to_string(),
            sector: project.sector.to_string(),
            status: project.status.as_str().to_owned(),
            village_name: project.village_name.to_string(),
            latitude: project.coordinates.map(|c| c.latitude()),
            longitude: project.coordinates.map(|c| c.longitude()),
            image_url: project.image_url.as_ref().map(|url| url.as_ref().to_owned()),
            created_by: *project.created_by.as_uuid(),
            created_at: project.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectorCountBody {
    pub sector: String,
    pub count: u64,
}

impl From<&SectorCount> for SectorCountBody {
    fn from(value: &SectorCount) -> Self {
        Self {
            sector: value.sector.clone(),
            count: value.count,
        }
    }
}

/// Admin dashboard totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryBody {
    pub total: u64,
    pub completed: u64,
    /// Percentage with one decimal place.
    #[schema(example = 33.3)]
    pub completion_rate: f64,
    pub sectors: Vec<SectorCountBody>,
}

impl From<&ProjectSummary> for SummaryBody {
    fn from(summary: &ProjectSummary) -> Self {
        Self {
            total: summary.total,
            completed: summary.completed,
            completion_rate: summary.completion_rate,
            sectors: summary.sectors.iter().map(SectorCountBody::from).collect(),
        }
    }
}
