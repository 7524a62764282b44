//! Static inventory of the form's nine steps.
//!
//! The schema is the engine's stand-in for the form markup: which fields
//! each step owns, which are required, and which step-level conditions
//! gate display. Step 7's mailbox-name rows are generated from the
//! mailbox count rather than declared statically.

use serde::{Deserialize, Serialize};

use super::model::{FormData, Package, PackageInfo, PackageType, StepInput, text_field};

/// Total number of steps in the global ordering.
pub const TOTAL_STEPS: u8 = 9;

/// Field name of the logo upload.
pub const LOGO_FIELD: &str = "logoUpload";

/// Upper bound on generated mailbox-name rows.
const MAX_MAILBOXES: u32 = 50;

/// What kind of input a field is, which decides capture coercion and the
/// type-specific validation applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
    Number,
    Radio,
    Checkbox,
    Domain,
    EmailName,
    File,
}

/// One field of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required,
        }
    }
}

/// Display condition attached to a step. Contradicted conditions make
/// `show_step` redirect to the nearest visible neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCondition {
    /// Website production steps — skipped for packages without a website.
    RequiresWebsite,
    /// The email-setup step. Its visibility is decided by the resolver,
    /// so the condition itself never vetoes display.
    EmailSetup,
}

impl StepCondition {
    pub fn holds(&self, info: &PackageInfo) -> bool {
        match self {
            Self::EmailSetup => true,
            Self::RequiresWebsite => {
                !matches!(info.package, Package::EmailSetup | Package::HostingOnly)
                    && info.package_type != PackageType::EmailOnly
            }
        }
    }
}

/// One step of the form.
#[derive(Debug, Clone)]
pub struct StepSpec {
    pub number: u8,
    pub title: &'static str,
    pub condition: Option<StepCondition>,
    fields: Vec<FieldSpec>,
}

/// The whole form: nine steps in fixed global order.
#[derive(Debug, Clone)]
pub struct FormSchema {
    steps: Vec<StepSpec>,
}

impl FormSchema {
    /// The onboarding form as served by the marketing site.
    pub fn standard() -> Self {
        use FieldKind::*;

        let step = |number, title, condition, fields| StepSpec {
            number,
            title,
            condition,
            fields,
        };

        Self {
            steps: vec![
                step(
                    1,
                    "Your Details",
                    None,
                    vec![
                        FieldSpec::new("fullName", "Full Name", Text, true),
                        FieldSpec::new("businessName", "Business Name", Text, false),
                        FieldSpec::new("email", "Email Address", Email, true),
                        FieldSpec::new("phone", "Phone Number", Tel, true),
                    ],
                ),
                step(
                    2,
                    "Package & Add-ons",
                    None,
                    vec![
                        FieldSpec::new("selectedPackage", "Selected Package", Text, false),
                        FieldSpec::new("emailSetup", "Email Setup", Checkbox, false),
                        FieldSpec::new("additionalMailboxes", "Additional Mailboxes", Checkbox, false),
                        FieldSpec::new("addonMaintenance", "Website Maintenance", Checkbox, false),
                        FieldSpec::new("addonDNS", "DNS Management", Checkbox, false),
                        FieldSpec::new("addonSEO", "SEO Starter Boost", Checkbox, false),
                        FieldSpec::new("addonWhatsApp", "WhatsApp Button", Checkbox, false),
                        FieldSpec::new("addonPrioritySupport", "Priority Support", Checkbox, false),
                    ],
                ),
                step(
                    3,
                    "Website Basics",
                    Some(StepCondition::RequiresWebsite),
                    vec![
                        FieldSpec::new("websiteType", "Website Type", Radio, true),
                        FieldSpec::new("primaryGoal", "Primary Goal", Radio, true),
                        FieldSpec::new("numberOfPages", "Number of Pages", Number, false),
                    ],
                ),
                step(
                    4,
                    "Design Preferences",
                    Some(StepCondition::RequiresWebsite),
                    vec![
                        FieldSpec::new("colorPreference", "Color Preference", Text, false),
                        FieldSpec::new("stylePreference", "Style", Radio, false),
                        FieldSpec::new(LOGO_FIELD, "Logo", File, false),
                    ],
                ),
                step(
                    5,
                    "Content & Copy",
                    Some(StepCondition::RequiresWebsite),
                    vec![
                        FieldSpec::new("contentReady", "Content Status", Radio, true),
                        FieldSpec::new("contentNotes", "Content Notes", TextArea, false),
                    ],
                ),
                step(
                    6,
                    "Domain & Hosting",
                    None,
                    vec![
                        FieldSpec::new("hasDomain", "Do you already own a domain?", Radio, false),
                        FieldSpec::new("domainName", "Desired Domain", Domain, false),
                        FieldSpec::new("clientDomainName", "Your Domain", Domain, false),
                        FieldSpec::new("emailDomain", "Existing Domain", Domain, false),
                        FieldSpec::new("preferredDomain", "Preferred Domain", Domain, false),
                        FieldSpec::new("hostingDomainName", "Domain to Host", Domain, false),
                    ],
                ),
                step(
                    7,
                    "Email Setup",
                    Some(StepCondition::EmailSetup),
                    vec![FieldSpec::new(
                        "numberOfMailboxes",
                        "Number of Mailboxes",
                        Number,
                        false,
                    )],
                ),
                step(
                    8,
                    "Terms & Approval",
                    None,
                    vec![
                        FieldSpec::new("agreeTerms", "Terms of Service", Checkbox, true),
                        FieldSpec::new("agreePrivacy", "Privacy Policy", Checkbox, true),
                        FieldSpec::new("agreeDeposit", "Deposit & Payment Terms", Checkbox, true),
                    ],
                ),
                step(9, "Review & Submit", None, vec![]),
            ],
        }
    }

    pub fn step(&self, number: u8) -> Option<&StepSpec> {
        self.steps.iter().find(|s| s.number == number)
    }

    /// A step's fields, with step 7's mailbox-name rows generated from
    /// the live count (falling back to the captured one, then to a single
    /// row, like the original form).
    pub fn step_fields(&self, number: u8, data: &FormData, input: &StepInput) -> Vec<FieldSpec> {
        let Some(spec) = self.step(number) else {
            return Vec::new();
        };
        let mut fields = spec.fields.clone();
        if number == 7 {
            let count = mailbox_count(data, input);
            fields.extend(mailbox_fields(count));
        }
        fields
    }

    /// Look up the kind of a field by name across every step. Generated
    /// mailbox rows match by prefix.
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.field_spec(name).map(|f| f.kind)
    }

    /// Look up a field's full spec by name, resolving generated mailbox
    /// rows by prefix.
    pub fn field_spec(&self, name: &str) -> Option<FieldSpec> {
        if name.starts_with("emailName") && name != "emailName" {
            return Some(FieldSpec::new(
                name,
                "Email Name",
                FieldKind::EmailName,
                true,
            ));
        }
        self.steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name == name)
            .cloned()
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::standard()
    }
}

/// How many mailbox-name rows step 7 shows right now.
pub fn mailbox_count(data: &FormData, input: &StepInput) -> u32 {
    let live = input.text("numberOfMailboxes");
    let source = if live.is_empty() {
        text_field(data, "numberOfMailboxes").unwrap_or("")
    } else {
        live
    };
    source
        .trim()
        .parse::<u32>()
        .unwrap_or(1)
        .clamp(1, MAX_MAILBOXES)
}

/// Field descriptors for the generated mailbox-name rows.
pub fn mailbox_fields(count: u32) -> Vec<FieldSpec> {
    (1..=count)
        .map(|i| {
            FieldSpec::new(
                &format!("emailName{i}"),
                &format!("Email {i} Name"),
                FieldKind::EmailName,
                true,
            )
        })
        .collect()
}

/// Which domain/hosting panel step 6 shows for a package selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainSection {
    WebsiteHosting,
    WebsiteOnly,
    EmailOnly,
    HostingOnly,
}

/// Resolve the step-6 panel from the package selection. Custom and
/// unrecognized types fall back to the website+hosting panel.
pub fn domain_section(info: &PackageInfo) -> DomainSection {
    if info.package == Package::EmailSetup {
        DomainSection::EmailOnly
    } else if info.package == Package::HostingOnly {
        DomainSection::HostingOnly
    } else {
        match info.package_type {
            PackageType::WebsiteHosting | PackageType::StarterBundle => {
                DomainSection::WebsiteHosting
            }
            PackageType::WebsiteOnly => DomainSection::WebsiteOnly,
            _ => DomainSection::WebsiteHosting,
        }
    }
}

/// The domain fields actually visible on step 6. The email-only panel
/// swaps its field on the `hasDomain` choice and shows none until the
/// user picks.
pub fn visible_domain_fields(info: &PackageInfo, has_domain: Option<&str>) -> Vec<&'static str> {
    match domain_section(info) {
        DomainSection::WebsiteHosting => vec!["domainName"],
        DomainSection::WebsiteOnly => vec!["clientDomainName"],
        DomainSection::HostingOnly => vec!["hostingDomainName"],
        DomainSection::EmailOnly => match has_domain {
            Some("yes") => vec!["emailDomain"],
            Some("no") => vec!["preferredDomain"],
            _ => vec![],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::FieldValue;

    fn info(package: Package, package_type: PackageType) -> PackageInfo {
        PackageInfo {
            package,
            package_type,
            max_pages: 3,
        }
    }

    #[test]
    fn nine_steps_in_order() {
        let schema = FormSchema::standard();
        for n in 1..=TOTAL_STEPS {
            assert_eq!(schema.step(n).unwrap().number, n);
        }
        assert!(schema.step(10).is_none());
        assert!(schema.step(0).is_none());
    }

    #[test]
    fn website_steps_carry_condition() {
        let schema = FormSchema::standard();
        for n in [3, 4, 5] {
            assert_eq!(
                schema.step(n).unwrap().condition,
                Some(StepCondition::RequiresWebsite)
            );
        }
        assert_eq!(schema.step(6).unwrap().condition, None);
        assert_eq!(schema.step(7).unwrap().condition, Some(StepCondition::EmailSetup));
    }

    #[test]
    fn requires_website_holds_only_for_website_packages() {
        let c = StepCondition::RequiresWebsite;
        assert!(c.holds(&info(Package::BasicWebsite, PackageType::WebsiteOnly)));
        assert!(c.holds(&info(Package::StarterBundle, PackageType::StarterBundle)));
        assert!(!c.holds(&info(Package::EmailSetup, PackageType::EmailOnly)));
        assert!(!c.holds(&info(Package::HostingOnly, PackageType::Custom)));
        assert!(!c.holds(&info(Package::Custom, PackageType::EmailOnly)));
    }

    #[test]
    fn email_setup_condition_never_vetoes() {
        let c = StepCondition::EmailSetup;
        assert!(c.holds(&info(Package::EmailSetup, PackageType::EmailOnly)));
        assert!(c.holds(&info(Package::BasicWebsite, PackageType::WebsiteOnly)));
    }

    #[test]
    fn mailbox_rows_follow_live_count() {
        let schema = FormSchema::standard();
        let mut input = StepInput::default();
        input.set_text("numberOfMailboxes", "3");
        let fields = schema.step_fields(7, &FormData::new(), &input);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["numberOfMailboxes", "emailName1", "emailName2", "emailName3"]
        );
        assert!(fields.iter().skip(1).all(|f| f.required));
    }

    #[test]
    fn mailbox_rows_fall_back_to_captured_then_one() {
        let schema = FormSchema::standard();
        let mut data = FormData::new();
        data.insert("numberOfMailboxes".to_string(), FieldValue::text("2"));
        assert_eq!(schema.step_fields(7, &data, &StepInput::default()).len(), 3);
        assert_eq!(
            schema
                .step_fields(7, &FormData::new(), &StepInput::default())
                .len(),
            2
        );
    }

    #[test]
    fn mailbox_count_rejects_garbage() {
        let mut input = StepInput::default();
        input.set_text("numberOfMailboxes", "many");
        assert_eq!(mailbox_count(&FormData::new(), &input), 1);
        input.set_text("numberOfMailboxes", "0");
        assert_eq!(mailbox_count(&FormData::new(), &input), 1);
        input.set_text("numberOfMailboxes", "9999");
        assert_eq!(mailbox_count(&FormData::new(), &input), MAX_MAILBOXES);
    }

    #[test]
    fn field_kind_lookup_covers_generated_rows() {
        let schema = FormSchema::standard();
        assert_eq!(schema.field_kind("email"), Some(FieldKind::Email));
        assert_eq!(schema.field_kind("domainName"), Some(FieldKind::Domain));
        assert_eq!(schema.field_kind("emailName4"), Some(FieldKind::EmailName));
        assert_eq!(schema.field_kind("notAField"), None);
    }

    #[test]
    fn domain_section_per_package() {
        assert_eq!(
            domain_section(&info(Package::EmailSetup, PackageType::EmailOnly)),
            DomainSection::EmailOnly
        );
        assert_eq!(
            domain_section(&info(Package::HostingOnly, PackageType::Custom)),
            DomainSection::HostingOnly
        );
        assert_eq!(
            domain_section(&info(Package::StandardWebsite, PackageType::WebsiteHosting)),
            DomainSection::WebsiteHosting
        );
        assert_eq!(
            domain_section(&info(Package::BasicWebsite, PackageType::WebsiteOnly)),
            DomainSection::WebsiteOnly
        );
        // Custom falls back to the website+hosting panel.
        assert_eq!(
            domain_section(&info(Package::Custom, PackageType::Custom)),
            DomainSection::WebsiteHosting
        );
    }

    #[test]
    fn email_only_domain_fields_follow_has_domain() {
        let email = info(Package::EmailSetup, PackageType::EmailOnly);
        assert_eq!(visible_domain_fields(&email, Some("yes")), vec!["emailDomain"]);
        assert_eq!(
            visible_domain_fields(&email, Some("no")),
            vec!["preferredDomain"]
        );
        assert!(visible_domain_fields(&email, None).is_empty());
        let site = info(Package::BasicWebsite, PackageType::WebsiteOnly);
        assert_eq!(visible_domain_fields(&site, None), vec!["clientDomainName"]);
    }
}
