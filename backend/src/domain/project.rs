//! Project records submitted by field officers.
//!
//! Raw form values arrive as optional strings (multipart text parts). The
//! constructors here trim, parse and cross-check them so adapters only ever
//! persist a consistent [`ProjectDraft`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{AccountId, Error};

/// Maximum characters accepted for any project text field.
pub const PROJECT_TEXT_MAX: usize = 200;

/// Validation failures for project payloads and identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectValidationError {
    MissingField(&'static str),
    TooLong { field: &'static str, max: usize },
    UnknownStatus,
    InvalidNumber(&'static str),
    OutOfRange { field: &'static str, value: f64 },
    /// Exactly one of latitude/longitude was supplied.
    PartialCoordinates,
    InvalidId,
}

impl ProjectValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field)
            | Self::TooLong { field, .. }
            | Self::InvalidNumber(field)
            | Self::OutOfRange { field, .. } => field,
            Self::UnknownStatus => "status",
            Self::PartialCoordinates => "latitude",
            Self::InvalidId => "id",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::TooLong { .. } => "too_long",
            Self::UnknownStatus => "unknown_status",
            Self::InvalidNumber(_) => "invalid_number",
            Self::OutOfRange { .. } => "out_of_range",
            Self::PartialCoordinates => "partial_coordinates",
            Self::InvalidId => "invalid_id",
        }
    }
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::UnknownStatus => write!(f, "status must be one of Ongoing or Completed"),
            Self::InvalidNumber(field) => write!(f, "{field} must be a number"),
            Self::OutOfRange { field, value } => write!(f, "{field} {value} is out of range"),
            Self::PartialCoordinates => {
                write!(f, "latitude and longitude must be supplied together")
            }
            Self::InvalidId => write!(f, "project id must be a valid UUID"),
        }
    }
}

impl std::error::Error for ProjectValidationError {}

impl From<ProjectValidationError> for Error {
    fn from(value: ProjectValidationError) -> Self {
        Error::invalid_field(value.field(), value.code(), value.to_string())
    }
}

/// Server-assigned project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for ProjectId {
    type Err = ProjectValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ProjectValidationError::InvalidId)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn text_field(field: &'static str, raw: Option<&str>) -> Result<String, ProjectValidationError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ProjectValidationError::MissingField(field));
    }
    if trimmed.chars().count() > PROJECT_TEXT_MAX {
        return Err(ProjectValidationError::TooLong {
            field,
            max: PROJECT_TEXT_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

macro_rules! text_newtype {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl AsRef<str>) -> Result<Self, ProjectValidationError> {
                text_field($field, Some(raw.as_ref())).map(Self)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_newtype!(
    /// Human-readable project title.
    ProjectName,
    "project_name"
);
text_newtype!(
    /// Development sector such as `Water` or `Health`. Free text; the
    /// frontend offers a fixed list.
    Sector,
    "sector"
);
text_newtype!(
    /// Village the project is located in. Matched exactly by the
    /// top-completed query.
    VillageName,
    "village_name"
);

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Ongoing,
    Completed,
}

impl ProjectStatus {
    /// Wire and storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ProjectValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            _ => Err(ProjectValidationError::UnknownStatus),
        }
    }
}

/// GPS position; latitude and longitude always travel together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ProjectValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ProjectValidationError::OutOfRange {
                field: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ProjectValidationError::OutOfRange {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse an optional pair of form values. Blank strings count as absent.
    ///
    /// # Examples
    /// ```
    /// use saarthi_backend::domain::Coordinates;
    ///
    /// assert_eq!(Coordinates::parse_pair(Some(""), None), Ok(None));
    /// assert!(Coordinates::parse_pair(Some("12.9"), None).is_err());
    /// let both = Coordinates::parse_pair(Some("12.9"), Some("77.6")).unwrap();
    /// assert!(both.is_some());
    /// ```
    pub fn parse_pair(
        latitude: Option<&str>,
        longitude: Option<&str>,
    ) -> Result<Option<Self>, ProjectValidationError> {
        fn present(raw: Option<&str>) -> Option<&str> {
            raw.map(str::trim).filter(|value| !value.is_empty())
        }
        match (present(latitude), present(longitude)) {
            (None, None) => Ok(None),
            (Some(lat), Some(lon)) => {
                let lat = parse_number("latitude", lat)?;
                let lon = parse_number("longitude", lon)?;
                Self::new(lat, lon).map(Some)
            }
            _ => Err(ProjectValidationError::PartialCoordinates),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ProjectValidationError> {
    raw.parse::<f64>()
        .map_err(|_| ProjectValidationError::InvalidNumber(field))
}

/// Public URL path of a stored project photo, e.g. `/uploads/<file>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw form values for creating or updating a project.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectDraftParts<'a> {
    pub project_name: Option<&'a str>,
    pub sector: Option<&'a str>,
    pub status: Option<&'a str>,
    pub village_name: Option<&'a str>,
    pub latitude: Option<&'a str>,
    pub longitude: Option<&'a str>,
}

/// Validated project fields supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub project_name: ProjectName,
    pub sector: Sector,
    pub status: ProjectStatus,
    pub village_name: VillageName,
    pub coordinates: Option<Coordinates>,
}

impl ProjectDraft {
    pub fn try_from_parts(parts: ProjectDraftParts<'_>) -> Result<Self, ProjectValidationError> {
        let project_name = ProjectName(text_field("project_name", parts.project_name)?);
        let sector = Sector(text_field("sector", parts.sector)?);
        let status = match parts.status.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse()?,
            None => return Err(ProjectValidationError::MissingField("status")),
        };
        let village_name = VillageName(text_field("village_name", parts.village_name)?);
        let coordinates = Coordinates::parse_pair(parts.latitude, parts.longitude)?;

        Ok(Self {
            project_name,
            sector,
            status,
            village_name,
            coordinates,
        })
    }
}

/// Stored project record.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub project_name: ProjectName,
    pub sector: Sector,
    pub status: ProjectStatus,
    pub village_name: VillageName,
    pub coordinates: Option<Coordinates>,
    pub image_url: Option<ImageUrl>,
    pub created_by: AccountId,
    pub created_at: DateTime<Utc>,
}

/// Project row handed to a repository for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub id: ProjectId,
    pub draft: ProjectDraft,
    pub image_url: Option<ImageUrl>,
    pub created_by: AccountId,
    pub created_at: DateTime<Utc>,
}

impl NewProject {
    pub fn into_project(self) -> Project {
        let ProjectDraft {
            project_name,
            sector,
            status,
            village_name,
            coordinates,
        } = self.draft;
        Project {
            id: self.id,
            project_name,
            sector,
            status,
            village_name,
            coordinates,
            image_url: self.image_url,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

/// Replacement values for an existing project. `image_url: None` keeps the
/// stored photo.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectUpdate {
    pub draft: ProjectDraft,
    pub image_url: Option<ImageUrl>,
}

impl ProjectUpdate {
    /// Apply the update to `project` in place.
    pub fn apply_to(&self, project: &mut Project) {
        let draft = self.draft.clone();
        project.project_name = draft.project_name;
        project.sector = draft.sector;
        project.status = draft.status;
        project.village_name = draft.village_name;
        project.coordinates = draft.coordinates;
        if let Some(url) = &self.image_url {
            project.image_url = Some(url.clone());
        }
    }
}
