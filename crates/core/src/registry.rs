//! Per-course group configuration registry.
//!
//! The registry is the course-level aggregate: it owns the configurations of
//! one course together with the explicit `next_id` counter. Ids are handed
//! out from the counter only, never derived from the entries present, so an
//! id is never reused after a configuration is removed.

use crate::error::CoreError;
use crate::group_configuration::{GroupConfiguration, GroupConfigurationPayload};
use crate::types::DbId;

/// First id handed out in a fresh course.
pub const FIRST_CONFIGURATION_ID: DbId = 1;

const ENTITY: &str = "GroupConfiguration";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConfigurationRegistry {
    next_id: DbId,
    configurations: Vec<GroupConfiguration>,
}

impl Default for GroupConfigurationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupConfigurationRegistry {
    /// An empty registry for a new course.
    pub fn new() -> Self {
        Self {
            next_id: FIRST_CONFIGURATION_ID,
            configurations: Vec::new(),
        }
    }

    /// Rebuild a registry from persisted state.
    ///
    /// The counter is raised past the highest stored id if it somehow lags.
    pub fn from_parts(next_id: DbId, mut configurations: Vec<GroupConfiguration>) -> Self {
        configurations.sort_by_key(|c| c.id);
        let floor = configurations
            .last()
            .map(|c| c.id + 1)
            .unwrap_or(FIRST_CONFIGURATION_ID);
        Self {
            next_id: next_id.max(floor),
            configurations,
        }
    }

    /// The id the next created configuration will receive.
    pub fn next_id(&self) -> DbId {
        self.next_id
    }

    /// All configurations, ordered by id.
    pub fn configurations(&self) -> &[GroupConfiguration] {
        &self.configurations
    }

    pub fn get(&self, id: DbId) -> Option<&GroupConfiguration> {
        self.configurations.iter().find(|c| c.id == id)
    }

    /// Add a configuration under the next sequential id.
    ///
    /// Any id carried by the payload is ignored.
    pub fn create(&mut self, payload: GroupConfigurationPayload) -> &GroupConfiguration {
        let id = self.next_id;
        self.next_id += 1;
        self.configurations.push(payload.normalize(id));
        // Ids only grow, so pushing keeps the list ordered.
        &self.configurations[self.configurations.len() - 1]
    }

    /// Overwrite an existing configuration.
    ///
    /// The payload must carry the same id as the addressed configuration and
    /// an explicit `groups` list. Unknown ids are rejected without touching
    /// the registry.
    pub fn update(
        &mut self,
        id: DbId,
        payload: GroupConfigurationPayload,
    ) -> Result<&GroupConfiguration, CoreError> {
        let index = self
            .configurations
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

        match payload.id {
            None => {
                return Err(CoreError::Validation(
                    "must have id of the configuration".to_string(),
                ))
            }
            Some(body_id) if body_id != id => {
                return Err(CoreError::Validation(format!(
                    "configuration id {body_id} does not match addressed id {id}"
                )))
            }
            Some(_) => {}
        }

        // Only create falls back to the default groups.
        if payload.groups.is_none() {
            return Err(CoreError::Validation(
                "must have groups of the configuration".to_string(),
            ));
        }

        self.configurations[index] = payload.normalize(id);
        Ok(&self.configurations[index])
    }

    /// Remove a configuration. The counter is left untouched.
    pub fn remove(&mut self, id: DbId) -> Result<GroupConfiguration, CoreError> {
        let index = self
            .configurations
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        Ok(self.configurations.remove(index))
    }
}
