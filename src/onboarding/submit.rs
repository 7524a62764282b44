//! Submission relay — serializes the captured form into a multipart
//! payload and POSTs it to the external form-relay endpoint.

use std::collections::HashSet;

use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use tokio::sync::Mutex;

use crate::config::RelayConfig;
use crate::error::SubmitError;

use super::model::{FieldValue, text_field};
use super::state::FormState;

/// Sender name used when the client left the name field empty.
pub const DEFAULT_FROM_NAME: &str = "BlueNode Client";

/// Name carried to the confirmation page when none was captured.
pub const FALLBACK_CLIENT_NAME: &str = "valued client";

/// Owns the relay HTTP client and the per-session in-flight guard.
pub struct SubmissionController {
    client: reqwest::Client,
    config: RelayConfig,
    in_flight: Mutex<HashSet<String>>,
}

impl SubmissionController {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Whether a submission is currently outstanding for this session.
    pub async fn is_in_flight(&self, session: &str) -> bool {
        self.in_flight.lock().await.contains(session)
    }

    /// Claim the in-flight slot. Returns false when one is already held,
    /// in which case the caller must treat the submit as a no-op.
    pub async fn begin(&self, session: &str) -> bool {
        self.in_flight.lock().await.insert(session.to_string())
    }

    /// Release the in-flight slot, restoring the submit affordance.
    pub async fn finish(&self, session: &str) {
        self.in_flight.lock().await.remove(session);
    }

    /// Issue the single relay POST. One attempt; the only cancellation is
    /// the request's own timeout.
    pub async fn send(&self, state: &FormState) -> Result<(), SubmitError> {
        let form = self.build_form(state)?;
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(SubmitError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(package = %state.package_info.package, "Onboarding submission relayed");
            return Ok(());
        }

        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str())
                    .map(String::from)
            });
        tracing::error!(status = %status, detail = ?detail, "Form relay rejected submission");
        Err(SubmitError::Relay {
            status: status.as_u16(),
            detail,
        })
    }

    /// The confirmation URL for a successful submission, with the
    /// client's name and package as percent-encoded query parameters.
    pub fn redirect_url(&self, state: &FormState) -> Result<String, SubmitError> {
        let name =
            text_field(&state.form_data, "fullName").unwrap_or(FALLBACK_CLIENT_NAME);
        reqwest::Url::parse_with_params(
            &self.config.thank_you_url,
            &[("name", name), ("package", state.package_info.package.key())],
        )
        .map(|url| url.to_string())
        .map_err(|e| SubmitError::Transport(e.to_string()))
    }

    fn build_form(&self, state: &FormState) -> Result<Form, SubmitError> {
        let mut form = Form::new();
        for (name, value) in payload_fields(state) {
            form = form.text(name, value);
        }
        for (name, value) in &state.form_data {
            if let FieldValue::File { file } = value {
                let part = Part::bytes(file.data.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.content_type)
                    .map_err(|e| SubmitError::Transport(e.to_string()))?;
                form = form.part(name.clone(), part);
            }
        }
        form = form.text(
            "access_key",
            self.config.access_key.expose_secret().to_string(),
        );
        Ok(form)
    }
}

/// The text fields of the relay payload: every captured answer (booleans
/// as Yes/No, files excluded — they travel as file parts) plus the
/// package context and the derived email fields.
pub fn payload_fields(state: &FormState) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for (name, value) in &state.form_data {
        match value {
            FieldValue::Text { value } => fields.push((name.clone(), value.clone())),
            FieldValue::Flag { value } => fields.push((
                name.clone(),
                if *value { "Yes" } else { "No" }.to_string(),
            )),
            FieldValue::File { .. } => {}
        }
    }

    let display_name = state.package_info.package.display_name();
    fields.push(("package".to_string(), state.package_info.package.key().to_string()));
    fields.push((
        "packageType".to_string(),
        state.package_info.package_type.key().to_string(),
    ));
    fields.push(("packageDisplayName".to_string(), display_name.to_string()));
    fields.push((
        "subject".to_string(),
        format!("New Client Onboarding: {display_name}"),
    ));
    fields.push((
        "from_name".to_string(),
        text_field(&state.form_data, "fullName")
            .unwrap_or(DEFAULT_FROM_NAME)
            .to_string(),
    ));
    fields
}
