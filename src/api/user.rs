//! Identity check against the surat backend.

use super::client::ApiClient;
use super::error::{read_envelope, ApiError};
use super::types::UserResponse;

/// Fetch the profile of the user the stored token belongs to.
///
/// GET /api/users/current. A rejected or missing token surfaces as the
/// backend's error payload; the session gate treats any failure as
/// "not logged in".
pub async fn get_current_user(client: &ApiClient) -> Result<UserResponse, ApiError> {
    let response = client.get("/api/users/current").await?;
    read_envelope::<UserResponse>(response).await?.into_data()
}
