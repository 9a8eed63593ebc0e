//! Video component models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::error::CoreError;
use studio_core::handout::{HandoutRef, HandoutSlot, PendingChange, PENDING_CLEAR, PENDING_REPLACE};
use studio_core::types::{DbId, Timestamp};

/// A row from `video_components`, joined with the metadata of its live and
/// pending handout assets.
#[derive(Debug, Clone, FromRow)]
pub struct VideoComponentRow {
    pub id: DbId,
    pub course_id: DbId,
    pub display_name: String,
    pub handout_asset_id: Option<DbId>,
    pub handout_filename: Option<String>,
    pub handout_mime_type: Option<String>,
    pub pending_handout_action: Option<String>,
    pub pending_handout_asset_id: Option<DbId>,
    pub pending_filename: Option<String>,
    pub pending_mime_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VideoComponentRow {
    /// Rebuild the handout slot from the stored columns.
    pub fn handout_slot(&self) -> Result<HandoutSlot, CoreError> {
        let live = handout_ref(
            self.handout_asset_id,
            &self.handout_filename,
            &self.handout_mime_type,
        );

        let pending = match self.pending_handout_action.as_deref() {
            None => None,
            Some(PENDING_CLEAR) => Some(PendingChange::Clear),
            Some(PENDING_REPLACE) => {
                let handout = handout_ref(
                    self.pending_handout_asset_id,
                    &self.pending_filename,
                    &self.pending_mime_type,
                )
                .ok_or_else(|| {
                    CoreError::Internal(format!(
                        "video component {} has a pending replace without an asset",
                        self.id
                    ))
                })?;
                Some(PendingChange::Replace(handout))
            }
            Some(other) => {
                return Err(CoreError::Internal(format!(
                    "video component {} has unknown pending handout action '{other}'",
                    self.id
                )))
            }
        };

        Ok(HandoutSlot::new(live, pending))
    }
}

fn handout_ref(
    asset_id: Option<DbId>,
    filename: &Option<String>,
    mime_type: &Option<String>,
) -> Option<HandoutRef> {
    match (asset_id, filename, mime_type) {
        (Some(id), Some(filename), Some(mime_type)) => {
            Some(HandoutRef::new(id, filename.clone(), mime_type.clone()))
        }
        _ => None,
    }
}

/// API representation of a video component and its handout slot.
#[derive(Debug, Clone, Serialize)]
pub struct VideoComponent {
    pub id: DbId,
    pub course_id: DbId,
    pub display_name: String,
    /// The saved handout learners can download.
    pub handout: Option<HandoutRef>,
    /// The handout as shown in the editor, including unsaved changes.
    pub editor_handout: Option<HandoutRef>,
    pub has_pending_changes: bool,
    pub is_handout_button_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VideoComponent {
    pub fn from_parts(row: &VideoComponentRow, slot: &HandoutSlot) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            display_name: row.display_name.clone(),
            handout: slot.live().cloned(),
            editor_handout: slot.editor().cloned(),
            has_pending_changes: slot.has_pending_changes(),
            is_handout_button_visible: slot.is_handout_button_visible(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<VideoComponentRow> for VideoComponent {
    type Error = CoreError;

    fn try_from(row: VideoComponentRow) -> Result<Self, Self::Error> {
        let slot = row.handout_slot()?;
        Ok(Self::from_parts(&row, &slot))
    }
}

/// DTO for creating a video component.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideoComponent {
    pub display_name: String,
}
