//! Diesel row structs. Internal to the persistence layer; repositories
//! convert them to domain types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, projects};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub project_name: String,
    pub sector: String,
    pub status: String,
    pub village_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: Uuid,
    pub project_name: &'a str,
    pub sector: &'a str,
    pub status: &'a str,
    pub village_name: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<&'a str>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Changeset for project updates. `treat_none_as_null` makes cleared
/// coordinates write NULL. `image_url` is not part of the changeset; the
/// repository sets it only when a new photo was stored.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects, treat_none_as_null = true)]
pub(crate) struct ProjectChangeset<'a> {
    pub project_name: &'a str,
    pub sector: &'a str,
    pub status: &'a str,
    pub village_name: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
