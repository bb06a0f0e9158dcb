//! Members endpoint client.
//!
//! Performs the network IO for `LoadMembersCommand`. No egui or state
//! plumbing lives here; callers map the result into state.

use thiserror::Error;

use crate::http::{self, HttpError};
use crate::members::model::{Member, MemberPayload};

#[derive(Debug, Error)]
pub enum MembersApiError {
    #[error("request failed: {0}")]
    Transport(#[from] HttpError),

    #[error("members endpoint returned status {0}")]
    Status(u16),

    #[error("failed to decode members payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, MembersApiError>;

/// GET the members array and map every element to a [`Member`].
pub async fn fetch_members(url: &str) -> ApiResult<Vec<Member>> {
    let fetched = http::get(url, "application/json").await?;
    if !fetched.is_ok() {
        return Err(MembersApiError::Status(fetched.status));
    }

    let payloads: Vec<MemberPayload> = fetched.decode()?;
    Ok(payloads.into_iter().map(Member::from).collect())
}
