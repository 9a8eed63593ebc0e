//! Group configuration payload parsing, validation, and normalization.
//!
//! A group configuration partitions a course's learners into named groups.
//! Clients post loosely-typed JSON; [`GroupConfigurationPayload::parse`]
//! turns it into a validated payload, and
//! [`GroupConfigurationPayload::normalize`] turns that into the stored
//! [`GroupConfiguration`] (server-assigned id, stamped versions, numbered
//! groups). Both steps are pure.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
   Scheme constants
   -------------------------------------------------------------------------- */

/// Scheme version stamped on every configuration.
pub const CONFIGURATION_SCHEME_VERSION: i32 = 1;

/// Scheme version stamped on every group.
pub const GROUP_SCHEME_VERSION: i32 = 1;

/// A configuration with fewer groups than this is invalid.
pub const MIN_GROUPS: usize = 2;

/// Groups synthesized when a create payload omits `groups`.
pub const DEFAULT_GROUP_NAMES: [&str; 2] = ["Group A", "Group B"];

/// Maximum length for configuration and group names.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length for a configuration description.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/* --------------------------------------------------------------------------
   Stored entities
   -------------------------------------------------------------------------- */

/// A single group within a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub version: i32,
}

/// A validated, normalized group configuration as stored and returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfiguration {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub version: i32,
    pub groups: Vec<Group>,
}

/* --------------------------------------------------------------------------
   Client payloads
   -------------------------------------------------------------------------- */

/// A group as supplied by the client. The id may be omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPayload {
    pub id: Option<i64>,
    pub name: String,
}

/// A validated create/update body.
///
/// `groups` is `None` when the client omitted it; any `version` fields in the
/// body are dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConfigurationPayload {
    pub id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub groups: Option<Vec<GroupPayload>>,
}

impl GroupConfigurationPayload {
    /// Parse and validate a raw request body.
    ///
    /// Checks run in a fixed order so the first failure reported is stable:
    /// well-formed JSON object, `name`, `groups`, `id`, then `description`.
    pub fn parse(body: &[u8]) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| CoreError::Validation(format!("invalid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Validate an already-decoded JSON value.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let obj = value.as_object().ok_or_else(|| {
            CoreError::Validation("invalid JSON: expected an object".to_string())
        })?;

        let name = parse_name(obj)?;
        let groups = parse_groups(obj.get("groups"))?;
        let id = parse_configuration_id(obj.get("id"))?;
        let description = parse_description(obj.get("description"))?;

        Ok(Self {
            id,
            name,
            description,
            groups,
        })
    }

    /// Build the stored configuration under the given id.
    ///
    /// Stamps scheme versions, synthesizes the default groups when none were
    /// supplied, and numbers groups that arrived without an id.
    pub fn normalize(self, id: DbId) -> GroupConfiguration {
        let groups = self.groups.unwrap_or_else(default_groups);
        GroupConfiguration {
            id,
            name: self.name,
            description: self.description,
            version: CONFIGURATION_SCHEME_VERSION,
            groups: assign_group_ids(groups),
        }
    }
}

/// The two placeholder groups used when a payload omits `groups`.
pub fn default_groups() -> Vec<GroupPayload> {
    DEFAULT_GROUP_NAMES
        .iter()
        .map(|name| GroupPayload {
            id: None,
            name: (*name).to_string(),
        })
        .collect()
}

/// Number groups in listed order.
///
/// Explicit ids are kept. Each group without one takes the smallest
/// non-negative id not yet in use, so an all-implicit list becomes `0..N`.
/// Explicit ids must already be unique (enforced by [`parse_groups`]).
pub fn assign_group_ids(groups: Vec<GroupPayload>) -> Vec<Group> {
    let mut used: BTreeSet<i64> = groups.iter().filter_map(|g| g.id).collect();
    let mut candidate = 0_i64;

    groups
        .into_iter()
        .map(|g| {
            let id = match g.id {
                Some(id) => id,
                None => {
                    while used.contains(&candidate) {
                        candidate += 1;
                    }
                    used.insert(candidate);
                    candidate
                }
            };
            Group {
                id,
                name: g.name,
                version: GROUP_SCHEME_VERSION,
            }
        })
        .collect()
}

/* --------------------------------------------------------------------------
   Field parsers
   -------------------------------------------------------------------------- */

fn parse_name(obj: &Map<String, Value>) -> Result<String, CoreError> {
    let name = match obj.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => {
            return Err(CoreError::Validation(
                "must have name of the configuration".to_string(),
            ))
        }
    };
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Configuration name too long: {} chars (max {MAX_NAME_LEN})",
            name.chars().count()
        )));
    }
    Ok(name)
}

fn parse_groups(value: Option<&Value>) -> Result<Option<Vec<GroupPayload>>, CoreError> {
    let items = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(CoreError::Validation(
                "groups must be a list".to_string(),
            ))
        }
    };

    if items.len() < MIN_GROUPS {
        return Err(CoreError::Validation(format!(
            "must have at least {MIN_GROUPS} groups, got {}",
            items.len()
        )));
    }

    let mut seen = BTreeSet::new();
    let mut groups = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let group = parse_group(index, item)?;
        if let Some(id) = group.id {
            if !seen.insert(id) {
                return Err(CoreError::Validation(format!(
                    "duplicate group id {id}"
                )));
            }
        }
        groups.push(group);
    }
    Ok(Some(groups))
}

fn parse_group(index: usize, item: &Value) -> Result<GroupPayload, CoreError> {
    let obj = item.as_object().ok_or_else(|| {
        CoreError::Validation(format!("group {index} must be an object"))
    })?;

    let name = match obj.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => {
            return Err(CoreError::Validation(format!(
                "group {index} must have a name"
            )))
        }
    };
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Group name too long: {} chars (max {MAX_NAME_LEN})",
            name.chars().count()
        )));
    }

    let id = match obj.get("id") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_i64().ok_or_else(|| {
            CoreError::Validation(format!("group {index} id must be an integer"))
        })?),
    };

    Ok(GroupPayload { id, name })
}

/// Accepts integers and numeric strings; the value is only a hint on create.
fn parse_configuration_id(value: Option<&Value>) -> Result<Option<DbId>, CoreError> {
    let not_numeric = || CoreError::Validation("configuration id must be numeric".to_string());
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(not_numeric),
        Some(Value::String(s)) => s.trim().parse::<DbId>().map(Some).map_err(|_| not_numeric()),
        Some(_) => Err(not_numeric()),
    }
}

fn parse_description(value: Option<&Value>) -> Result<Option<String>, CoreError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.chars().count() > MAX_DESCRIPTION_LEN => Err(CoreError::Validation(
            format!(
                "Description too long: {} chars (max {MAX_DESCRIPTION_LEN})",
                s.chars().count()
            ),
        )),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CoreError::Validation(
            "description must be a string".to_string(),
        )),
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
