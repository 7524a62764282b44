//! Session form state — navigation position plus every captured answer,
//! persisted through the session-store port on each mutation.

use crate::store::{SessionStore, session_keys};

use super::model::{FormData, PackageInfo};
use super::schema::TOTAL_STEPS;

/// In-progress state for one onboarding session.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub current_step: u8,
    pub total_steps: u8,
    pub form_data: FormData,
    pub package_info: PackageInfo,
}

impl FormState {
    /// Fresh state at step 1 for a package selection.
    pub fn new(package_info: PackageInfo) -> Self {
        Self {
            current_step: 1,
            total_steps: TOTAL_STEPS,
            form_data: FormData::new(),
            package_info,
        }
    }

    /// Rebuild state from the store, merging any persisted snapshot over
    /// the fresh defaults. Corrupt snapshots are dropped with a warning
    /// rather than failing the session.
    pub async fn restore(store: &dyn SessionStore, session: &str, package_info: PackageInfo) -> Self {
        let mut state = Self::new(package_info);

        match store.get(session, session_keys::FORM_DATA).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(data) => state.form_data = data,
                Err(e) => tracing::warn!(session, "Discarding unreadable form snapshot: {e}"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(session, "Failed to read form snapshot: {e}"),
        }

        match store.get(session, session_keys::CURRENT_STEP).await {
            Ok(Some(raw)) => {
                if let Ok(step) = raw.parse::<u8>() {
                    state.current_step = step;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(session, "Failed to read saved step: {e}"),
        }

        state
    }

    /// Persist the snapshot: the JSON-encoded form data and the
    /// string-encoded step. Fire-and-forget — failures are logged, never
    /// surfaced to the user.
    pub async fn persist(&self, store: &dyn SessionStore, session: &str) {
        match serde_json::to_string(&self.form_data) {
            Ok(json) => {
                if let Err(e) = store.set(session, session_keys::FORM_DATA, &json).await {
                    tracing::warn!(session, "Failed to persist form data: {e}");
                }
            }
            Err(e) => tracing::warn!(session, "Failed to serialize form data: {e}"),
        }
        if let Err(e) = store
            .set(
                session,
                session_keys::CURRENT_STEP,
                &self.current_step.to_string(),
            )
            .await
        {
            tracing::warn!(session, "Failed to persist current step: {e}");
        }
    }

    /// Wipe the persisted snapshot and reset to step 1. Used after a
    /// successful submission and on explicit reset.
    pub async fn clear(&mut self, store: &dyn SessionStore, session: &str) {
        if let Err(e) = store.clear(session).await {
            tracing::warn!(session, "Failed to clear session: {e}");
        }
        self.form_data.clear();
        self.current_step = 1;
    }
}
