//! Session-storage port — the engine persists through this trait and
//! never touches a concrete backend.

use async_trait::async_trait;

use crate::error::StoreError;

/// Keys used for session persistence.
pub mod session_keys {
    /// Key for the JSON-encoded form data mapping.
    pub const FORM_DATA: &str = "form_data";
    /// Key for the string-encoded current step number.
    pub const CURRENT_STEP: &str = "current_step";
}

/// Backend-agnostic session store. Each session holds a small set of
/// string-keyed string values, cleared as a unit on successful submission.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value for a session, `None` when unset.
    async fn get(&self, session: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value for a session.
    async fn set(&self, session: &str, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove every value stored for a session.
    async fn clear(&self, session: &str) -> Result<(), StoreError>;
}
