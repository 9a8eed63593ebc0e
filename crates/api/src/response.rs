//! Shared response envelope types for API handlers.
//!
//! Collection and resource responses use a `{ "data": ... }` envelope.
//! Group configuration create/update/get return the configuration itself so
//! editors can post it straight back.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
