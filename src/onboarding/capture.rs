//! Data capture — coercing a step's live input into captured form data.

use super::model::{FieldValue, FormData, InputValue, StepInput};
use super::schema::{FieldKind, FieldSpec};

/// Write a step's input values into the form data.
///
/// Checkboxes land as flags, radio groups as the checked member's value
/// only (an unset group leaves the prior value untouched), and everything
/// else as raw text. Files are attached through the upload path and left
/// alone here. Inputs absent from the payload are skipped.
pub fn capture_step(fields: &[FieldSpec], input: &StepInput, data: &mut FormData) {
    for field in fields {
        match field.kind {
            FieldKind::Checkbox => {
                if let Some(InputValue::Flag { checked }) = input.get(&field.name) {
                    data.insert(field.name.clone(), FieldValue::flag(*checked));
                }
            }
            FieldKind::Radio => {
                if let Some(InputValue::Choice {
                    selected: Some(value),
                }) = input.get(&field.name)
                {
                    data.insert(field.name.clone(), FieldValue::text(value.clone()));
                }
            }
            FieldKind::File => {}
            _ => {
                if let Some(InputValue::Text { value }) = input.get(&field.name) {
                    data.insert(field.name.clone(), FieldValue::text(value.clone()));
                }
            }
        }
    }
}
