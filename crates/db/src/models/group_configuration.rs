//! Group configuration rows.

use sqlx::types::Json;
use sqlx::FromRow;
use studio_core::group_configuration::{Group, GroupConfiguration};
use studio_core::types::{DbId, Timestamp};

/// A row from the `group_configurations` table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupConfigurationRow {
    pub course_id: DbId,
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub version: i32,
    pub groups_json: Json<Vec<Group>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<GroupConfigurationRow> for GroupConfiguration {
    fn from(row: GroupConfigurationRow) -> Self {
        GroupConfiguration {
            id: row.id,
            name: row.name,
            description: row.description,
            version: row.version,
            groups: row.groups_json.0,
        }
    }
}
