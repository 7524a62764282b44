//! FormEngine — coordinates navigation, validation, capture and
//! submission for every onboarding session.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::error::{Error, Result};
use crate::store::SessionStore;

use super::capture::capture_step;
use super::model::{FieldValue, FileUpload, PackageInfo, PackageQuery, StepInput};
use super::schema::{FieldKind, FieldSpec, FormSchema, LOGO_FIELD};
use super::state::FormState;
use super::steps::{next_visible_step, previous_visible_step};
use super::submit::SubmissionController;
use super::validate::{
    FieldError, InlineCheck, ValidationRules, validate_field_inline, validate_logo, validate_step,
};
use super::view::{AUTOSAVE_INDICATOR_MS, StepView, build_step_view};

/// Result of a forward navigation attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavOutcome {
    Moved { view: StepView },
    Invalid { errors: Vec<FieldError> },
}

/// Result of a submission attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Relayed successfully; the page should navigate to `redirect_url`.
    Redirect { redirect_url: String },
    /// The final step failed validation; nothing was sent.
    Invalid { errors: Vec<FieldError> },
    /// A submission is already outstanding for this session; no-op.
    InFlight,
    /// The relay call failed; state is intact and the user may retry.
    Failed {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

/// Acknowledgement of a capture, driving the "Saved" indicator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CaptureAck {
    pub saved: bool,
    pub indicator_ms: u64,
}

impl CaptureAck {
    fn saved() -> Self {
        Self {
            saved: true,
            indicator_ms: AUTOSAVE_INDICATOR_MS,
        }
    }
}

/// Result of a logo upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UploadOutcome {
    Stored {
        file_name: String,
        size_kb: f64,
        ack: CaptureAck,
    },
    Rejected {
        errors: Vec<FieldError>,
    },
}

/// The multi-step form engine. One instance serves every session; each
/// call loads the session's state from the store, acts, and persists.
pub struct FormEngine {
    store: Arc<dyn SessionStore>,
    schema: FormSchema,
    rules: ValidationRules,
    submitter: SubmissionController,
    /// Package context per session — the stand-in for the entry URL's
    /// query string, which REST calls after `open` no longer carry.
    sessions: RwLock<HashMap<String, PackageInfo>>,
}

impl FormEngine {
    pub fn new(store: Arc<dyn SessionStore>, relay: RelayConfig) -> Self {
        Self {
            store,
            schema: FormSchema::standard(),
            rules: ValidationRules::new(),
            submitter: SubmissionController::new(relay),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start (or re-enter) the form for a package selection. Returns the
    /// new session id and the first step's view.
    pub async fn open(&self, query: &PackageQuery) -> (String, StepView) {
        let session = Uuid::new_v4().to_string();
        let info = query.resolve();
        self.sessions.write().await.insert(session.clone(), info);

        let mut state = FormState::restore(self.store.as_ref(), &session, info).await;
        let current_step = state.current_step;
        let view = self.show_step(&mut state, &session, current_step).await;
        (session, view)
    }

    /// Current view for an existing session, re-resolving any step
    /// condition (a restored step may have become invisible).
    pub async fn resume(&self, session: &str) -> Result<StepView> {
        let mut state = self.load(session).await?;
        let current_step = state.current_step;
        Ok(self.show_step(&mut state, session, current_step).await)
    }

    /// Validate, capture and advance to the next visible step.
    pub async fn next_step(&self, session: &str, input: &StepInput) -> Result<NavOutcome> {
        let mut state = self.load(session).await?;

        let errors = validate_step(
            &self.rules,
            &self.schema,
            state.current_step,
            &state.package_info,
            &state.form_data,
            input,
        );
        if !errors.is_empty() {
            return Ok(NavOutcome::Invalid { errors });
        }

        let fields = self
            .schema
            .step_fields(state.current_step, &state.form_data, input);
        capture_step(&fields, input, &mut state.form_data);
        state.persist(self.store.as_ref(), session).await;

        let next = next_visible_step(&state.package_info, state.current_step);
        let view = if next != state.current_step {
            self.show_step(&mut state, session, next).await
        } else {
            self.view_of(&state)
        };
        Ok(NavOutcome::Moved { view })
    }

    /// Move back to the previous visible step. No validation, no capture.
    pub async fn previous_step(&self, session: &str) -> Result<StepView> {
        let mut state = self.load(session).await?;
        let prev = previous_visible_step(&state.package_info, state.current_step);
        if prev != state.current_step {
            Ok(self.show_step(&mut state, session, prev).await)
        } else {
            Ok(self.view_of(&state))
        }
    }

    /// Jump straight to a step — the summary's edit links. Data captured
    /// elsewhere is untouched.
    pub async fn go_to_step(&self, session: &str, step: u8) -> Result<StepView> {
        if self.schema.step(step).is_none() {
            return Err(Error::UnknownStep(step));
        }
        let mut state = self.load(session).await?;
        Ok(self.show_step(&mut state, session, step).await)
    }

    /// Debounced autosave: capture the active step's input as-is.
    pub async fn capture(&self, session: &str, input: &StepInput) -> Result<CaptureAck> {
        let mut state = self.load(session).await?;
        let fields = self
            .schema
            .step_fields(state.current_step, &state.form_data, input);
        capture_step(&fields, input, &mut state.form_data);
        state.persist(self.store.as_ref(), session).await;
        Ok(CaptureAck::saved())
    }

    /// Attach the logo upload, rejecting files the form would refuse.
    pub async fn attach_logo(&self, session: &str, upload: FileUpload) -> Result<UploadOutcome> {
        let mut state = self.load(session).await?;
        if let Some(error) = validate_logo(&upload) {
            return Ok(UploadOutcome::Rejected {
                errors: vec![error],
            });
        }
        let file_name = upload.file_name.clone();
        let size_kb = (upload.size() as f64 / 1024.0 * 10.0).round() / 10.0;
        state
            .form_data
            .insert(LOGO_FIELD.to_string(), FieldValue::File { file: upload });
        state.persist(self.store.as_ref(), session).await;
        Ok(UploadOutcome::Stored {
            file_name,
            size_kb,
            ack: CaptureAck::saved(),
        })
    }

    /// Drop a previously attached logo.
    pub async fn remove_logo(&self, session: &str) -> Result<CaptureAck> {
        let mut state = self.load(session).await?;
        state.form_data.remove(LOGO_FIELD);
        state.persist(self.store.as_ref(), session).await;
        Ok(CaptureAck::saved())
    }

    /// Discard everything captured for a session and start over at
    /// step 1.
    pub async fn reset(&self, session: &str) -> Result<StepView> {
        let mut state = self.load(session).await?;
        state.clear(self.store.as_ref(), session).await;
        Ok(self.view_of(&state))
    }

    /// Advisory single-field check for blur/debounce decoration.
    pub async fn check_field(&self, session: &str, name: &str, value: &str) -> Result<InlineCheck> {
        self.package_info(session).await?;
        let spec = self
            .schema
            .field_spec(name)
            .unwrap_or_else(|| unknown_field(name));
        Ok(validate_field_inline(
            &self.rules,
            spec.kind,
            spec.required,
            value,
        ))
    }

    /// Validate the final step and relay the submission.
    ///
    /// A second call while one is outstanding is a no-op. On success the
    /// session snapshot is wiped and the confirmation redirect returned;
    /// on failure state stays intact so the user can retry.
    pub async fn submit(&self, session: &str, input: &StepInput) -> Result<SubmitOutcome> {
        let mut state = self.load(session).await?;

        if self.submitter.is_in_flight(session).await {
            return Ok(SubmitOutcome::InFlight);
        }

        let errors = validate_step(
            &self.rules,
            &self.schema,
            state.current_step,
            &state.package_info,
            &state.form_data,
            input,
        );
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Invalid { errors });
        }

        let fields = self
            .schema
            .step_fields(state.current_step, &state.form_data, input);
        capture_step(&fields, input, &mut state.form_data);
        state.persist(self.store.as_ref(), session).await;

        if !self.submitter.begin(session).await {
            return Ok(SubmitOutcome::InFlight);
        }
        let result = self.submitter.send(&state).await;
        self.submitter.finish(session).await;

        match result {
            Ok(()) => {
                let redirect_url = self.submitter.redirect_url(&state)?;
                state.clear(self.store.as_ref(), session).await;
                Ok(SubmitOutcome::Redirect { redirect_url })
            }
            Err(error) => {
                let detail = error.detail().map(str::to_string);
                Ok(SubmitOutcome::Failed {
                    message: error.to_string(),
                    detail,
                })
            }
        }
    }

    async fn package_info(&self, session: &str) -> Result<PackageInfo> {
        self.sessions
            .read()
            .await
            .get(session)
            .copied()
            .ok_or_else(|| Error::UnknownSession(session.to_string()))
    }

    async fn load(&self, session: &str) -> Result<FormState> {
        let info = self.package_info(session).await?;
        Ok(FormState::restore(self.store.as_ref(), session, info).await)
    }

    fn view_of(&self, state: &FormState) -> StepView {
        build_step_view(
            &self.schema,
            &state.package_info,
            &state.form_data,
            state.current_step,
        )
    }

    /// Display `requested`, redirecting off steps whose condition the
    /// package contradicts: toward the nearest visible neighbour in the
    /// direction of travel, staying put when redirecting would be a
    /// no-op. Persists the transition.
    async fn show_step(&self, state: &mut FormState, session: &str, requested: u8) -> StepView {
        match self.resolve_target(state, requested) {
            Some(target) => {
                state.current_step = target;
                state.persist(self.store.as_ref(), session).await;
                self.view_of(state)
            }
            None => self.view_of(state),
        }
    }

    fn resolve_target(&self, state: &FormState, requested: u8) -> Option<u8> {
        let mut target = requested;
        loop {
            let Some(spec) = self.schema.step(target) else {
                return Some(target);
            };
            match spec.condition {
                Some(condition) if !condition.holds(&state.package_info) => {
                    let candidate = if target > state.current_step {
                        next_visible_step(&state.package_info, target)
                    } else {
                        previous_visible_step(&state.package_info, target)
                    };
                    if candidate == target {
                        return None;
                    }
                    target = candidate;
                }
                _ => return Some(target),
            }
        }
    }
}

fn unknown_field(name: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: name.to_string(),
        kind: FieldKind::Text,
        required: false,
    }
}
