//! Render model for one step — everything the form page needs to draw
//! the current state, kept free of any actual rendering.

use serde::{Deserialize, Serialize};

use super::model::{FormData, PackageInfo};
use super::schema::{DomainSection, FormSchema, domain_section};
use super::steps::visible_steps;
use super::summary::{Summary, generate_summary};

/// Glyph shown on completed progress entries.
pub const COMPLETED_GLYPH: &str = "✓";

/// How long the autosave indicator stays visible, in milliseconds.
pub const AUTOSAVE_INDICATOR_MS: u64 = 2000;

/// Busy-indicator messages shown while a submission is in flight, with
/// per-message display durations in milliseconds.
pub const LOADING_SEQUENCE: [(&str, u64); 5] = [
    ("Validating your information...", 800),
    ("Preparing your application...", 1200),
    ("Uploading files...", 1500),
    ("Sending to server...", 2000),
    ("Almost done...", 1500),
];

/// State of one progress-sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    Active,
    Completed,
    Upcoming,
}

/// One visible entry in the progress sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Global step number.
    pub step: u8,
    /// 1-based position within the visible sequence.
    pub position: u8,
    /// What the entry's badge shows: the position, or a checkmark once
    /// the step is behind the user.
    pub display: String,
    pub state: ProgressState,
}

/// Which navigation affordances the current step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavButtons {
    pub show_previous: bool,
    pub show_next: bool,
    pub show_submit: bool,
}

/// Client-side directives that accompany every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEffects {
    /// Move accessibility focus to the step heading.
    pub focus_heading: bool,
    /// Scroll the viewport back to the form container.
    pub scroll_to_form: bool,
}

/// A submission busy-indicator message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingMessage {
    pub text: String,
    pub duration_ms: u64,
}

/// The full render model for the active step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub step: u8,
    pub title: String,
    pub progress: Vec<ProgressEntry>,
    pub nav: NavButtons,
    /// Domain/hosting panel to show — only on step 6.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_section: Option<DomainSection>,
    /// Review recap — only on the final step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    /// Busy-indicator sequence — only where submit is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_messages: Option<Vec<LoadingMessage>>,
    pub effects: ViewEffects,
}

/// Build the render model for `step` given the session's package and
/// captured data.
pub fn build_step_view(
    schema: &FormSchema,
    info: &PackageInfo,
    data: &FormData,
    step: u8,
) -> StepView {
    let steps = visible_steps(info);
    let current_index = steps.iter().position(|&s| s == step);

    let progress = steps
        .iter()
        .enumerate()
        .map(|(index, &number)| {
            let position = (index + 1) as u8;
            let state = match current_index {
                Some(current) if index == current => ProgressState::Active,
                Some(current) if index < current => ProgressState::Completed,
                _ => ProgressState::Upcoming,
            };
            let display = match state {
                ProgressState::Completed => COMPLETED_GLYPH.to_string(),
                _ => position.to_string(),
            };
            ProgressEntry {
                step: number,
                position,
                display,
                state,
            }
        })
        .collect();

    let is_first = current_index == Some(0);
    let is_last = current_index == Some(steps.len() - 1);
    let nav = NavButtons {
        show_previous: !is_first,
        show_next: !is_last,
        show_submit: is_last,
    };

    let title = schema
        .step(step)
        .map(|s| s.title.to_string())
        .unwrap_or_default();

    StepView {
        step,
        title,
        progress,
        nav,
        domain_section: (step == 6).then(|| domain_section(info)),
        summary: (step == 9).then(|| generate_summary(info, data)),
        loading_messages: is_last.then(|| {
            LOADING_SEQUENCE
                .iter()
                .map(|(text, duration_ms)| LoadingMessage {
                    text: text.to_string(),
                    duration_ms: *duration_ms,
                })
                .collect()
        }),
        effects: ViewEffects {
            focus_heading: true,
            scroll_to_form: true,
        },
    }
}
