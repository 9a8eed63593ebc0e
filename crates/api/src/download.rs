//! Handout download checker.
//!
//! [`HandoutDownloader`] reads a video's handout links from the API and
//! follows them over HTTP, reporting whether the link answered and whether
//! the served content type matches what was uploaded. Transport failures are
//! folded into [`DownloadCheck::UNREACHABLE`] rather than surfaced as errors.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde::Deserialize;
use studio_core::handout::{DownloadCheck, HandoutRef, HandoutView};
use studio_core::types::DbId;

/// Name of the session cookie forwarded with download requests.
pub const SESSION_COOKIE: &str = "sessionid";

/// HTTP request timeout for a single fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Failure to read the video component that holds the handout links.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The underlying HTTP request failed (network, DNS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Video lookup returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// The handout-related fields of a video component.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoHandouts {
    pub handout: Option<HandoutRef>,
    pub editor_handout: Option<HandoutRef>,
    pub has_pending_changes: bool,
    pub is_handout_button_visible: bool,
}

impl VideoHandouts {
    pub fn reference(&self, view: HandoutView) -> Option<&HandoutRef> {
        match view {
            HandoutView::Live => self.handout.as_ref(),
            HandoutView::Editor => self.editor_handout.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// HandoutDownloader
// ---------------------------------------------------------------------------

/// Follows handout links against a running studio server.
#[derive(Debug, Clone)]
pub struct HandoutDownloader {
    client: reqwest::Client,
    base_url: String,
    session_id: Option<String>,
}

impl HandoutDownloader {
    /// Create a checker for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: None,
        })
    }

    /// Forward `sessionid=<id>` with every request.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Absolute URL for a server-relative href. Absolute hrefs pass through.
    pub fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{href}", self.base_url)
        } else {
            format!("{}/{href}", self.base_url)
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.session_id {
            Some(id) => request.header(COOKIE, format!("{SESSION_COOKIE}={id}")),
            None => request,
        }
    }

    /// Fetch the handout fields of a video component.
    pub async fn video_handouts(
        &self,
        course_key: &str,
        video_id: DbId,
    ) -> Result<VideoHandouts, DownloadError> {
        let url = self.absolute_url(&format!("/api/v1/courses/{course_key}/videos/{video_id}"));
        let response = self.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DownloadError::HttpStatus(response.status().as_u16()));
        }
        let envelope: Envelope<VideoHandouts> = response.json().await?;
        Ok(envelope.data)
    }

    /// Whether learners see a handout download button.
    pub async fn is_handout_button_visible(
        &self,
        course_key: &str,
        video_id: DbId,
    ) -> Result<bool, DownloadError> {
        Ok(self
            .video_handouts(course_key, video_id)
            .await?
            .is_handout_button_visible)
    }

    /// Follow the handout link of `view` and compare its content type.
    ///
    /// A video with no handout in that view reports `(false, false)` without
    /// issuing a download request.
    pub async fn download_handout(
        &self,
        course_key: &str,
        video_id: DbId,
        view: HandoutView,
        expected_mime: &str,
    ) -> Result<DownloadCheck, DownloadError> {
        let handouts = self.video_handouts(course_key, video_id).await?;
        let href = handouts.reference(view).map(|h| h.url.as_str());
        Ok(self.download(href, expected_mime).await)
    }

    /// Fetch `href` and classify the response.
    pub async fn download(&self, href: Option<&str>, expected_mime: &str) -> DownloadCheck {
        let Some(href) = href else {
            return DownloadCheck::UNREACHABLE;
        };
        let url = self.absolute_url(href);

        match self.get(&url).send().await {
            Ok(response) => {
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok());
                let check = DownloadCheck::from_response(
                    response.status().as_u16(),
                    content_type,
                    expected_mime,
                );
                tracing::debug!(
                    url,
                    reachable = check.reachable,
                    mime_matches = check.mime_matches,
                    "Checked handout link",
                );
                check
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Handout link unreachable");
                DownloadCheck::UNREACHABLE
            }
        }
    }
}
