//! Handout slot of a video component.
//!
//! A slot holds at most one *live* handout (what learners download) and at
//! most one *pending* change made in the editor. The editor shows the
//! pending state when there is one and the live state otherwise. `save`
//! folds the pending change into live; `discard` drops it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// URL prefix under which stored assets are served.
pub const ASSET_URL_PREFIX: &str = "/api/v1/assets";

/// Maximum length for a stored handout filename.
pub const MAX_FILENAME_LEN: usize = 255;

/// Persisted tag for [`PendingChange::Replace`].
pub const PENDING_REPLACE: &str = "replace";

/// Persisted tag for [`PendingChange::Clear`].
pub const PENDING_CLEAR: &str = "clear";

/// Public URL of a stored asset.
pub fn asset_url(asset_id: DbId) -> String {
    format!("{ASSET_URL_PREFIX}/{asset_id}")
}

/// A reference to an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoutRef {
    pub asset_id: DbId,
    pub filename: String,
    pub mime_type: String,
    pub url: String,
}

impl HandoutRef {
    pub fn new(asset_id: DbId, filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            asset_id,
            filename: filename.into(),
            mime_type: mime_type.into(),
            url: asset_url(asset_id),
        }
    }
}

/// An editor change not yet saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Replace(HandoutRef),
    Clear,
}

impl PendingChange {
    /// Tag stored alongside the pending asset id.
    pub fn kind(&self) -> &'static str {
        match self {
            PendingChange::Replace(_) => PENDING_REPLACE,
            PendingChange::Clear => PENDING_CLEAR,
        }
    }

    pub fn asset_id(&self) -> Option<DbId> {
        match self {
            PendingChange::Replace(handout) => Some(handout.asset_id),
            PendingChange::Clear => None,
        }
    }
}

/// Which download link to look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandoutView {
    /// The saved handout shown to learners.
    #[default]
    Live,
    /// The editor's handout, including unsaved changes.
    Editor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandoutSlot {
    live: Option<HandoutRef>,
    pending: Option<PendingChange>,
}

impl HandoutSlot {
    pub fn new(live: Option<HandoutRef>, pending: Option<PendingChange>) -> Self {
        Self { live, pending }
    }

    pub fn live(&self) -> Option<&HandoutRef> {
        self.live.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.pending.as_ref()
    }

    /// The handout as the editor currently shows it.
    pub fn editor(&self) -> Option<&HandoutRef> {
        match &self.pending {
            Some(PendingChange::Replace(handout)) => Some(handout),
            Some(PendingChange::Clear) => None,
            None => self.live.as_ref(),
        }
    }

    pub fn reference(&self, view: HandoutView) -> Option<&HandoutRef> {
        match view {
            HandoutView::Live => self.live(),
            HandoutView::Editor => self.editor(),
        }
    }

    pub fn has_pending_changes(&self) -> bool {
        self.pending.is_some()
    }

    /// Learners see a download button only when a live handout exists.
    pub fn is_handout_button_visible(&self) -> bool {
        self.live.is_some()
    }

    /// Replace the editor's handout, whatever it was.
    pub fn upload(&mut self, handout: HandoutRef) {
        self.pending = Some(PendingChange::Replace(handout));
    }

    /// Remove the editor's handout.
    pub fn clear(&mut self) {
        self.pending = if self.live.is_some() {
            Some(PendingChange::Clear)
        } else {
            None
        };
    }

    /// Commit the pending change. Returns `true` if the live handout changed.
    pub fn save(&mut self) -> bool {
        match self.pending.take() {
            Some(PendingChange::Replace(handout)) => {
                let changed = self.live.as_ref() != Some(&handout);
                self.live = Some(handout);
                changed
            }
            Some(PendingChange::Clear) => self.live.take().is_some(),
            None => false,
        }
    }

    /// Drop the pending change. Returns `true` if there was one.
    pub fn discard(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

/// Validate an uploaded filename and reduce it to its final path component.
pub fn sanitize_filename(raw: &str) -> Result<String, CoreError> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(CoreError::Validation(
            "Uploaded file must have a name".to_string(),
        ));
    }
    if name.chars().count() > MAX_FILENAME_LEN {
        return Err(CoreError::Validation(format!(
            "Filename too long: {} chars (max {MAX_FILENAME_LEN})",
            name.chars().count()
        )));
    }
    Ok(name.to_string())
}

/// Result of fetching a handout link: `(reachable, mime type matches)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownloadCheck {
    pub reachable: bool,
    pub mime_matches: bool,
}

impl DownloadCheck {
    /// No link to follow, or the request never got a response.
    pub const UNREACHABLE: Self = Self {
        reachable: false,
        mime_matches: false,
    };

    /// Classify an HTTP response. Statuses below 400 count as reachable.
    pub fn from_response(status: u16, content_type: Option<&str>, expected_mime: &str) -> Self {
        let expected = mime_essence(expected_mime);
        Self {
            reachable: status < 400,
            mime_matches: content_type
                .map(|ct| mime_essence(ct).eq_ignore_ascii_case(expected))
                .unwrap_or(false),
        }
    }

    pub fn as_tuple(self) -> (bool, bool) {
        (self.reachable, self.mime_matches)
    }
}

/// The `type/subtype` part of a content type, without parameters.
pub fn mime_essence(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
}
