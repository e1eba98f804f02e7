//! Session gate for protected commands.
//!
//! Mirrors the web client's protected-route behavior: each entry evaluates
//! the identity check exactly once, persists the profile fields on success,
//! and treats every failure the same way -- the user is not logged in. The
//! failure detail is discarded; there is no retry and no timeout beyond what
//! the HTTP client already applies.

pub mod store;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::types::UserResponse;
use crate::api::user;
use store::{ProfileStore, StoredProfile};

/// Render states of the gate. `Loading` only exists before evaluation;
/// the other two are terminal for a given entry.
#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Loading,
    Authenticated(UserResponse),
    Unauthenticated,
}

/// Trait abstracting the identity check for testability.
///
/// In production, `ApiClient` implements this via GET /api/users/current.
/// In tests, a mock implementation controls success/failure behavior.
#[allow(async_fn_in_trait)]
pub trait IdentitySource {
    async fn current_user(&self) -> Result<UserResponse, ApiError>;
}

impl IdentitySource for ApiClient {
    async fn current_user(&self) -> Result<UserResponse, ApiError> {
        user::get_current_user(self).await
    }
}

/// One protected-entry evaluation.
pub struct SessionGate {
    state: GateState,
}

impl SessionGate {
    /// A fresh gate, not yet evaluated.
    pub fn new() -> Self {
        Self {
            state: GateState::Loading,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Issue the identity check and settle into a terminal state.
    ///
    /// On success the four profile fields are persisted to the store and the
    /// gate resolves `Authenticated`. On any failure -- rejected token,
    /// transport error, or a store that cannot persist -- the gate resolves
    /// `Unauthenticated`.
    pub async fn evaluate<I, S>(&mut self, identity: &I, store: &S) -> &GateState
    where
        I: IdentitySource,
        S: ProfileStore,
    {
        self.state = match identity.current_user().await {
            Ok(user) => {
                let profile = StoredProfile::from_user(&user);
                match store.store_profile(&profile) {
                    Ok(()) => GateState::Authenticated(user),
                    Err(e) => {
                        log::warn!("Failed to persist profile fields: {}", e);
                        GateState::Unauthenticated
                    }
                }
            }
            Err(_) => GateState::Unauthenticated,
        };
        &self.state
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::store::{ProfileStore, StoreError, StoredProfile};
    use super::*;
    use crate::api::types::{BagianResponse, KelompokResponse};

    // ── Mocks ────────────────────────────────────────────────────────────

    /// Identity source with a preconfigured outcome.
    struct FixedIdentity {
        outcome: Result<UserResponse, String>,
    }

    impl IdentitySource for FixedIdentity {
        async fn current_user(&self) -> Result<UserResponse, ApiError> {
            match &self.outcome {
                Ok(user) => Ok(user.clone()),
                Err(message) => Err(ApiError::Server(message.clone())),
            }
        }
    }

    /// In-memory store recording what the gate persisted.
    struct RecordingStore {
        stored: Mutex<Option<StoredProfile>>,
        fail: bool,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                stored: Mutex::new(None),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                stored: Mutex::new(None),
                fail: true,
            }
        }

        fn stored(&self) -> Option<StoredProfile> {
            self.stored.lock().unwrap().clone()
        }
    }

    impl ProfileStore for RecordingStore {
        fn store_profile(&self, profile: &StoredProfile) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::OperationFailed("store unavailable".to_string()));
            }
            *self.stored.lock().unwrap() = Some(profile.clone());
            Ok(())
        }

        fn clear_profile(&self) -> Result<(), StoreError> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    fn make_user() -> UserResponse {
        UserResponse {
            id_user: 42,
            nama_user: "Budi Santoso".to_string(),
            bagian: BagianResponse {
                nama_bagian: "Sekretariat".to_string(),
            },
            kelompok: KelompokResponse {
                nama_kelompok: "Kelompok A".to_string(),
            },
        }
    }

    // ── Tests ────────────────────────────────────────────────────────────

    #[test]
    fn test_new_gate_is_loading() {
        let gate = SessionGate::new();
        assert_eq!(*gate.state(), GateState::Loading);
    }

    #[tokio::test]
    async fn test_success_authenticates_and_stores_four_fields() {
        let identity = FixedIdentity {
            outcome: Ok(make_user()),
        };
        let store = RecordingStore::new();
        let mut gate = SessionGate::new();

        let state = gate.evaluate(&identity, &store).await;
        assert!(matches!(state, GateState::Authenticated(user) if user.id_user == 42));

        let stored = store.stored().expect("profile should be persisted");
        assert_eq!(stored.id_user, "42");
        assert_eq!(stored.nama_user, "Budi Santoso");
        assert_eq!(stored.nama_bagian, "Sekretariat");
        assert_eq!(stored.nama_kelompok, "Kelompok A");
    }

    #[tokio::test]
    async fn test_rejected_identity_check_stores_nothing() {
        let identity = FixedIdentity {
            outcome: Err("Unauthorized".to_string()),
        };
        let store = RecordingStore::new();
        let mut gate = SessionGate::new();

        let state = gate.evaluate(&identity, &store).await;
        assert_eq!(*state, GateState::Unauthenticated);
        assert!(store.stored().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_resolves_unauthenticated() {
        let identity = FixedIdentity {
            outcome: Ok(make_user()),
        };
        let store = RecordingStore::failing();
        let mut gate = SessionGate::new();

        let state = gate.evaluate(&identity, &store).await;
        assert_eq!(*state, GateState::Unauthenticated);
        assert!(store.stored().is_none());
    }

    #[test]
    fn test_profile_projection_from_user() {
        let profile = StoredProfile::from_user(&make_user());
        assert_eq!(
            profile,
            StoredProfile {
                id_user: "42".to_string(),
                nama_user: "Budi Santoso".to_string(),
                nama_bagian: "Sekretariat".to_string(),
                nama_kelompok: "Kelompok A".to_string(),
            }
        );
    }
}
