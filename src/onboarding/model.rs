//! Data models for the onboarding form: package selection, captured
//! field values, and the live input payloads sent by the form pages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Service package selected before entering the form.
///
/// Parsed from the `package` URL parameter; unrecognized keys fall back to
/// the default `basic-website`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Package {
    BasicWebsite,
    StandardWebsite,
    HostingOnly,
    StarterBundle,
    EmailSetup,
    Custom,
}

impl Package {
    /// The URL/query key for this package.
    pub fn key(&self) -> &'static str {
        match self {
            Self::BasicWebsite => "basic-website",
            Self::StandardWebsite => "standard-website",
            Self::HostingOnly => "hosting-only",
            Self::StarterBundle => "starter-bundle",
            Self::EmailSetup => "email-setup",
            Self::Custom => "custom",
        }
    }

    /// Parse a query-parameter value, defaulting on unknown keys.
    pub fn from_param(value: &str) -> Self {
        match value {
            "basic-website" => Self::BasicWebsite,
            "standard-website" => Self::StandardWebsite,
            "hosting-only" => Self::HostingOnly,
            "starter-bundle" => Self::StarterBundle,
            "email-setup" => Self::EmailSetup,
            "custom" => Self::Custom,
            _ => Self::default(),
        }
    }

    /// Human-facing package name used in the summary, the generated email
    /// subject, and the page header.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BasicWebsite => "Basic Website",
            Self::StandardWebsite => "Standard Website",
            Self::HostingOnly => "Starter Online Bundle (Hosting Only)",
            Self::StarterBundle => "Starter Website + Hosting",
            Self::EmailSetup => "Email Setup",
            Self::Custom => "Custom Package",
        }
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::BasicWebsite
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Delivery type accompanying the package selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageType {
    WebsiteOnly,
    WebsiteHosting,
    EmailOnly,
    StarterBundle,
    Custom,
}

impl PackageType {
    pub fn key(&self) -> &'static str {
        match self {
            Self::WebsiteOnly => "website-only",
            Self::WebsiteHosting => "website-hosting",
            Self::EmailOnly => "email-only",
            Self::StarterBundle => "starter-bundle",
            Self::Custom => "custom",
        }
    }

    /// Parse a query-parameter value. Unknown types map to `Custom`,
    /// which renders the fallback domain section.
    pub fn from_param(value: &str) -> Self {
        match value {
            "website-only" => Self::WebsiteOnly,
            "website-hosting" => Self::WebsiteHosting,
            "email-only" => Self::EmailOnly,
            "starter-bundle" => Self::StarterBundle,
            _ => Self::Custom,
        }
    }
}

impl Default for PackageType {
    fn default() -> Self {
        Self::WebsiteOnly
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Package context for one session, set once from the entry URL and
/// immutable for the session's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub package: Package,
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub max_pages: u32,
}

impl Default for PackageInfo {
    fn default() -> Self {
        Self {
            package: Package::default(),
            package_type: PackageType::default(),
            max_pages: 3,
        }
    }
}

/// Raw query parameters from the entry URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageQuery {
    pub package: Option<String>,
    #[serde(rename = "type")]
    pub package_type: Option<String>,
    pub pages: Option<String>,
}

impl PackageQuery {
    /// Resolve the query into package context, applying defaults.
    pub fn resolve(&self) -> PackageInfo {
        PackageInfo {
            package: self
                .package
                .as_deref()
                .map(Package::from_param)
                .unwrap_or_default(),
            package_type: self
                .package_type
                .as_deref()
                .map(PackageType::from_param)
                .unwrap_or_default(),
            max_pages: self
                .pages
                .as_deref()
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(3),
        }
    }
}

/// An uploaded file held as an opaque handle in the form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl FileUpload {
    /// File size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A captured answer: raw text, a checkbox flag, or a file handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldValue {
    Text { value: String },
    Flag { value: bool },
    File { file: FileUpload },
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn flag(value: bool) -> Self {
        Self::Flag { value }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileUpload> {
        match self {
            Self::File { file } => Some(file),
            _ => None,
        }
    }
}

/// All captured answers, keyed by field name.
pub type FormData = BTreeMap<String, FieldValue>;

/// Non-empty text value for a field, treating blank strings as absent the
/// way the summary and submission payload do.
pub fn text_field<'a>(data: &'a FormData, name: &str) -> Option<&'a str> {
    data.get(name)
        .and_then(FieldValue::as_text)
        .filter(|v| !v.is_empty())
}

/// Checkbox state for a field, unset meaning unchecked.
pub fn flag_field(data: &FormData, name: &str) -> bool {
    data.get(name).and_then(FieldValue::as_flag).unwrap_or(false)
}

/// Live value of one input as sent by the form page. Radio groups send
/// their checked member (or nothing), checkboxes their checked state,
/// everything else raw text. Files arrive through the upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputValue {
    Text { value: String },
    Flag { checked: bool },
    Choice { selected: Option<String> },
}

/// The active step's live input values, keyed by field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepInput {
    #[serde(default)]
    pub values: BTreeMap<String, InputValue>,
}

impl StepInput {
    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.values.get(name)
    }

    /// Text value of an input, empty when absent or not text.
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(InputValue::Text { value }) => value,
            _ => "",
        }
    }

    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(
            name.into(),
            InputValue::Text {
                value: value.into(),
            },
        );
    }

    pub fn set_flag(&mut self, name: impl Into<String>, checked: bool) {
        self.values.insert(name.into(), InputValue::Flag { checked });
    }

    pub fn set_choice(&mut self, name: impl Into<String>, selected: Option<&str>) {
        self.values.insert(
            name.into(),
            InputValue::Choice {
                selected: selected.map(String::from),
            },
        );
    }
}
