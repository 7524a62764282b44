//! The multi-step onboarding form.
//!
//! Pure decision logic (step visibility, validation, capture, summary,
//! payload assembly) lives in the submodules; `engine` coordinates them
//! per session and `routes` exposes the thin REST adapter the static
//! site talks to.

pub mod capture;
pub mod engine;
pub mod model;
pub mod routes;
pub mod schema;
pub mod state;
pub mod steps;
pub mod submit;
pub mod summary;
pub mod validate;
pub mod view;

pub use engine::{CaptureAck, FormEngine, NavOutcome, SubmitOutcome, UploadOutcome};
pub use model::{
    FieldValue, FileUpload, FormData, InputValue, Package, PackageInfo, PackageQuery, PackageType,
    StepInput,
};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use state::FormState;
pub use validate::{FieldError, InlineCheck, ValidationRules};
pub use view::StepView;
