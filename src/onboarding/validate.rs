//! Validation rules and step-level validation.
//!
//! The predicates are pure; step validation composes them over the live
//! input and returns field-scoped errors without touching captured state.
//! Inline validation applies the same predicates to a single field for
//! blur/debounce decoration and never gates navigation.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::model::{FileUpload, FormData, InputValue, PackageInfo, StepInput, text_field};
use super::schema::{FieldKind, FormSchema, LOGO_FIELD, visible_domain_fields};

/// Maximum logo size in megabytes.
pub const LOGO_MAX_MB: u64 = 5;

/// Allowed logo file extensions.
pub const LOGO_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".svg"];

/// Allowed MIME types for the logo upload.
pub const ALLOWED_MIME_TYPES: [&str; 4] =
    ["image/png", "image/jpeg", "image/jpg", "image/svg+xml"];

/// A field-scoped validation error. Transient: recomputed on every pass,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The validation predicates, with their regexes compiled once.
#[derive(Debug)]
pub struct ValidationRules {
    email: Regex,
    phone_charset: Regex,
    domain: Regex,
    email_name: Regex,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self {
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap(),
            phone_charset: Regex::new(r"^[\d\s+\-()]+$").unwrap(),
            // Hostname labels with a letters-only TLD of length >= 2,
            // e.g. example.com, my-site.co.za, business.org.
            domain: Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z]{2,})+$")
                .unwrap(),
            // Mailbox prefix: letters, numbers, dots, hyphens, underscores,
            // e.g. info, hello, support.team, john_doe.
            email_name: Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._-]*[a-zA-Z0-9]$|^[a-zA-Z0-9]$")
                .unwrap(),
        }
    }

    /// `local@domain.tld` shape, no whitespace around the `@`.
    pub fn email(&self, value: &str) -> bool {
        self.email.is_match(value)
    }

    /// Digits, spaces, `+`, `-` and parentheses only, with at least ten
    /// digits once everything else is stripped.
    pub fn phone(&self, value: &str) -> bool {
        self.phone_charset.is_match(value)
            && value.chars().filter(|c| c.is_ascii_digit()).count() >= 10
    }

    /// Non-empty after trimming.
    pub fn required(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Hostname-shaped, empty passing through (optional field).
    pub fn domain(&self, value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        self.domain.is_match(value.trim())
    }

    /// Mailbox prefix shape, empty passing through.
    pub fn email_name(&self, value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        self.email_name.is_match(value.trim())
    }

    /// File within the size cap; no file is always valid.
    pub fn file_size(file: Option<&FileUpload>, max_mb: u64) -> bool {
        match file {
            Some(f) => f.size() as u64 <= max_mb * 1024 * 1024,
            None => true,
        }
    }

    /// File name carries one of the allowed extensions.
    pub fn file_type(file: Option<&FileUpload>, extensions: &[&str]) -> bool {
        match file {
            Some(f) => {
                let name = f.file_name.to_lowercase();
                extensions.iter().any(|ext| name.ends_with(ext))
            }
            None => true,
        }
    }

    /// File's declared MIME type is in the allow-list.
    pub fn file_mime(file: Option<&FileUpload>, mime_types: &[&str]) -> bool {
        match file {
            Some(f) => mime_types.contains(&f.content_type.as_str()),
            None => true,
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate the logo upload. First failing check wins.
pub fn validate_logo(file: &FileUpload) -> Option<FieldError> {
    let file = Some(file);
    if !ValidationRules::file_size(file, LOGO_MAX_MB) {
        Some(FieldError::new(LOGO_FIELD, "File size must be less than 5MB"))
    } else if !ValidationRules::file_type(file, &LOGO_EXTENSIONS) {
        Some(FieldError::new(
            LOGO_FIELD,
            "Only PNG, JPG, and SVG files are allowed",
        ))
    } else if !ValidationRules::file_mime(file, &ALLOWED_MIME_TYPES) {
        Some(FieldError::new(
            LOGO_FIELD,
            "Invalid file type. Please upload a valid image file.",
        ))
    } else {
        None
    }
}

/// Validate the active step against its live input.
///
/// Returns every field error found; an empty list means the step may
/// advance. Captured state is never mutated here.
pub fn validate_step(
    rules: &ValidationRules,
    schema: &FormSchema,
    step: u8,
    info: &PackageInfo,
    data: &FormData,
    input: &StepInput,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let fields = schema.step_fields(step, data, input);

    for field in fields.iter().filter(|f| f.required) {
        match field.kind {
            FieldKind::Radio => {
                let chosen = matches!(
                    input.get(&field.name),
                    Some(InputValue::Choice { selected: Some(_) })
                );
                if !chosen {
                    errors.push(FieldError::new(&field.name, "Please select an option"));
                }
            }
            FieldKind::Checkbox => {
                let checked = matches!(
                    input.get(&field.name),
                    Some(InputValue::Flag { checked: true })
                );
                if !checked {
                    errors.push(FieldError::new(&field.name, "This field is required"));
                }
            }
            FieldKind::File => {}
            _ => {
                let value = input.text(&field.name);
                if !ValidationRules::required(value) {
                    errors.push(FieldError::new(&field.name, "This field is required"));
                } else if field.kind == FieldKind::Email && !rules.email(value) {
                    errors.push(FieldError::new(
                        &field.name,
                        "Please enter a valid email address",
                    ));
                } else if field.kind == FieldKind::Tel && !rules.phone(value) {
                    errors.push(FieldError::new(
                        &field.name,
                        "Please enter a valid phone number",
                    ));
                }
            }
        }
    }

    // The captured logo is re-checked on every pass.
    if let Some(file) = data.get(LOGO_FIELD).and_then(|v| v.as_file()) {
        if let Some(err) = validate_logo(file) {
            errors.push(err);
        }
    }

    if step == 6 {
        let has_domain = match input.get("hasDomain") {
            Some(InputValue::Choice { selected }) => selected.as_deref(),
            _ => text_field(data, "hasDomain"),
        };
        for name in visible_domain_fields(info, has_domain) {
            let live = input.text(name);
            let value = if live.is_empty() {
                text_field(data, name).unwrap_or("")
            } else {
                live
            };
            if !value.is_empty() && !rules.domain(value) {
                errors.push(FieldError::new(
                    name,
                    "Please enter a valid domain (e.g., example.co.za)",
                ));
            }
        }
    }

    if step == 7 {
        for (name, value) in &input.values {
            if !name.starts_with("emailName") {
                continue;
            }
            if let InputValue::Text { value } = value {
                if !value.is_empty() && !rules.email_name(value) {
                    errors.push(FieldError::new(
                        name,
                        "Invalid email name. Use only letters, numbers, dots, hyphens, or underscores.",
                    ));
                }
            }
        }
    }

    // Page count is capped by the package wherever it surfaces.
    let live_pages = input.text("numberOfPages");
    let pages = if live_pages.is_empty() {
        text_field(data, "numberOfPages").unwrap_or("")
    } else {
        live_pages
    };
    if let Ok(count) = pages.trim().parse::<u32>() {
        if count > info.max_pages {
            errors.push(FieldError::new(
                "numberOfPages",
                format!("Your package allows up to {} pages", info.max_pages),
            ));
        }
    }

    if step == 8 {
        let terms_missing = fields.iter().any(|f| {
            f.required
                && f.kind == FieldKind::Checkbox
                && !matches!(input.get(&f.name), Some(InputValue::Flag { checked: true }))
        });
        if terms_missing {
            errors.push(FieldError::new(
                "terms",
                "You must accept all terms to continue",
            ));
        }
    }

    errors
}

/// Outcome of an advisory single-field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InlineCheck {
    /// Field is filled and passes; decorate as success.
    Valid,
    /// Field fails; decorate with the message.
    Invalid { message: String },
    /// Optional field left empty; clear any decoration.
    Cleared,
}

/// Advisory validation for one field, mirroring the blur/debounce checks.
/// Never gates navigation.
pub fn validate_field_inline(
    rules: &ValidationRules,
    kind: FieldKind,
    required: bool,
    value: &str,
) -> InlineCheck {
    if !required && value.trim().is_empty() {
        return InlineCheck::Cleared;
    }
    if required && !ValidationRules::required(value) {
        return InlineCheck::Invalid {
            message: "This field is required".to_string(),
        };
    }
    let message = match kind {
        FieldKind::Email if !value.is_empty() && !rules.email(value) => {
            Some("Please enter a valid email address (e.g., you@example.com)")
        }
        FieldKind::Tel if !value.is_empty() && !rules.phone(value) => {
            Some("Please enter a valid phone number (at least 10 digits)")
        }
        FieldKind::Domain if !value.is_empty() && !rules.domain(value) => {
            Some("Please enter a valid domain (e.g., example.co.za)")
        }
        FieldKind::EmailName if !value.is_empty() && !rules.email_name(value) => {
            Some("Only letters, numbers, dots, hyphens, and underscores allowed")
        }
        _ => None,
    };
    match message {
        Some(message) => InlineCheck::Invalid {
            message: message.to_string(),
        },
        None => InlineCheck::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{FieldValue, Package, PackageType};

    fn rules() -> ValidationRules {
        ValidationRules::new()
    }

    fn website_info() -> PackageInfo {
        PackageInfo {
            package: Package::BasicWebsite,
            package_type: PackageType::WebsiteOnly,
            max_pages: 3,
        }
    }

    #[test]
    fn email_shapes() {
        let r = rules();
        assert!(r.email("a@b.com"));
        assert!(r.email("first.last@sub.domain.org"));
        assert!(!r.email("a@b"));
        assert!(!r.email("a @b.com"));
        assert!(!r.email("a@ b.com"));
        assert!(!r.email(""));
    }

    #[test]
    fn phone_shapes() {
        let r = rules();
        assert!(r.phone("(012) 345-6789"));
        assert!(r.phone("+27 82 123 4567"));
        assert!(!r.phone("123"));
        assert!(!r.phone("012345x6789"));
        assert!(!r.phone(""));
    }

    #[test]
    fn required_trims_whitespace() {
        assert!(ValidationRules::required("x"));
        assert!(!ValidationRules::required(""));
        assert!(!ValidationRules::required("   "));
    }

    #[test]
    fn domain_shapes() {
        let r = rules();
        assert!(r.domain("example.co.za"));
        assert!(r.domain("my-site.org"));
        assert!(r.domain(""));
        assert!(!r.domain("-bad-.com"));
        assert!(!r.domain("bad-.com"));
        assert!(!r.domain("nodot"));
        assert!(!r.domain("numbers.123"));
    }

    #[test]
    fn email_name_shapes() {
        let r = rules();
        assert!(r.email_name("info"));
        assert!(r.email_name("support.team"));
        assert!(r.email_name("john_doe"));
        assert!(r.email_name("a"));
        assert!(r.email_name(""));
        assert!(!r.email_name(".info"));
        assert!(!r.email_name("info."));
        assert!(!r.email_name("in fo"));
    }

    fn logo(name: &str, mime: &str, size: usize) -> FileUpload {
        FileUpload {
            file_name: name.to_string(),
            content_type: mime.to_string(),
            data: vec![0; size],
        }
    }

    #[test]
    fn file_checks_pass_without_a_file() {
        assert!(ValidationRules::file_size(None, LOGO_MAX_MB));
        assert!(ValidationRules::file_type(None, &LOGO_EXTENSIONS));
        assert!(ValidationRules::file_mime(None, &ALLOWED_MIME_TYPES));
    }

    #[test]
    fn logo_validation_order() {
        let oversized = logo("logo.png", "image/png", 6 * 1024 * 1024);
        assert_eq!(
            validate_logo(&oversized).unwrap().message,
            "File size must be less than 5MB"
        );

        let wrong_ext = logo("logo.gif", "image/png", 100);
        assert_eq!(
            validate_logo(&wrong_ext).unwrap().message,
            "Only PNG, JPG, and SVG files are allowed"
        );

        let wrong_mime = logo("logo.png", "image/gif", 100);
        assert_eq!(
            validate_logo(&wrong_mime).unwrap().message,
            "Invalid file type. Please upload a valid image file."
        );

        let fine = logo("Logo.PNG", "image/png", 100);
        assert!(validate_logo(&fine).is_none());
    }

    #[test]
    fn step_one_requires_contact_fields() {
        let schema = FormSchema::standard();
        let mut input = StepInput::default();
        input.set_text("fullName", "Thandi M");
        input.set_text("email", "not-an-email");
        input.set_text("phone", "123");

        let errors = validate_step(
            &rules(),
            &schema,
            1,
            &website_info(),
            &FormData::new(),
            &input,
        );
        let by_field = |f: &str| {
            errors
                .iter()
                .find(|e| e.field == f)
                .map(|e| e.message.as_str())
        };
        assert_eq!(by_field("email"), Some("Please enter a valid email address"));
        assert_eq!(by_field("phone"), Some("Please enter a valid phone number"));
        assert_eq!(by_field("fullName"), None);
    }

    #[test]
    fn radio_group_needs_a_choice() {
        let schema = FormSchema::standard();
        let mut input = StepInput::default();
        input.set_choice("websiteType", None);
        input.set_choice("primaryGoal", Some("leads"));
        input.set_text("numberOfPages", "2");

        let errors = validate_step(
            &rules(),
            &schema,
            3,
            &website_info(),
            &FormData::new(),
            &input,
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "websiteType");
        assert_eq!(errors[0].message, "Please select an option");
    }

    #[test]
    fn page_count_capped_by_package() {
        let schema = FormSchema::standard();
        let mut input = StepInput::default();
        input.set_choice("websiteType", Some("business"));
        input.set_choice("primaryGoal", Some("leads"));
        input.set_text("numberOfPages", "5");

        let errors = validate_step(
            &rules(),
            &schema,
            3,
            &website_info(),
            &FormData::new(),
            &input,
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Your package allows up to 3 pages");

        // Non-numeric counts never trip the cap.
        input.set_text("numberOfPages", "several");
        assert!(
            validate_step(&rules(), &schema, 3, &website_info(), &FormData::new(), &input)
                .is_empty()
        );
    }

    #[test]
    fn captured_logo_is_rechecked() {
        let schema = FormSchema::standard();
        let mut data = FormData::new();
        data.insert(
            LOGO_FIELD.to_string(),
            FieldValue::File {
                file: logo("logo.bmp", "image/bmp", 100),
            },
        );
        let mut input = StepInput::default();
        input.set_text("fullName", "T");
        input.set_text("email", "t@b.com");
        input.set_text("phone", "0123456789");

        let errors = validate_step(&rules(), &schema, 1, &website_info(), &data, &input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, LOGO_FIELD);
    }

    #[test]
    fn domain_checked_only_when_visible() {
        let schema = FormSchema::standard();
        let email_info = PackageInfo {
            package: Package::EmailSetup,
            package_type: PackageType::EmailOnly,
            max_pages: 3,
        };

        let mut input = StepInput::default();
        input.set_choice("hasDomain", Some("yes"));
        input.set_text("emailDomain", "-bad-.com");
        // A bad value in a field the current panel hides must not block.
        input.set_text("hostingDomainName", "also -bad-");

        let errors = validate_step(&rules(), &schema, 6, &email_info, &FormData::new(), &input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "emailDomain");
        assert_eq!(
            errors[0].message,
            "Please enter a valid domain (e.g., example.co.za)"
        );

        input.set_text("emailDomain", "example.co.za");
        assert!(
            validate_step(&rules(), &schema, 6, &email_info, &FormData::new(), &input).is_empty()
        );
    }

    #[test]
    fn mailbox_names_validated_and_required() {
        let schema = FormSchema::standard();
        let mut input = StepInput::default();
        input.set_text("numberOfMailboxes", "2");
        input.set_text("emailName1", "in fo");
        // emailName2 missing entirely.

        let errors = validate_step(
            &rules(),
            &schema,
            7,
            &website_info(),
            &FormData::new(),
            &input,
        );
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"emailName1"));
        assert!(fields.contains(&"emailName2"));
        assert!(
            errors
                .iter()
                .any(|e| e.message.starts_with("Invalid email name"))
        );
    }

    #[test]
    fn terms_step_requires_every_checkbox() {
        let schema = FormSchema::standard();
        let mut input = StepInput::default();
        input.set_flag("agreeTerms", true);
        input.set_flag("agreePrivacy", false);

        let errors = validate_step(
            &rules(),
            &schema,
            8,
            &website_info(),
            &FormData::new(),
            &input,
        );
        assert!(
            errors
                .iter()
                .any(|e| e.field == "terms"
                    && e.message == "You must accept all terms to continue")
        );

        input.set_flag("agreePrivacy", true);
        input.set_flag("agreeDeposit", true);
        assert!(
            validate_step(&rules(), &schema, 8, &website_info(), &FormData::new(), &input)
                .is_empty()
        );
    }

    #[test]
    fn inline_optional_empty_clears() {
        assert_eq!(
            validate_field_inline(&rules(), FieldKind::Domain, false, ""),
            InlineCheck::Cleared
        );
    }

    #[test]
    fn inline_messages() {
        let r = rules();
        assert_eq!(
            validate_field_inline(&r, FieldKind::Email, true, "nope"),
            InlineCheck::Invalid {
                message: "Please enter a valid email address (e.g., you@example.com)".to_string()
            }
        );
        assert_eq!(
            validate_field_inline(&r, FieldKind::Tel, true, "12"),
            InlineCheck::Invalid {
                message: "Please enter a valid phone number (at least 10 digits)".to_string()
            }
        );
        assert_eq!(
            validate_field_inline(&r, FieldKind::EmailName, false, "in fo"),
            InlineCheck::Invalid {
                message: "Only letters, numbers, dots, hyphens, and underscores allowed".to_string()
            }
        );
        assert_eq!(
            validate_field_inline(&r, FieldKind::Text, true, "fine"),
            InlineCheck::Valid
        );
    }
}
