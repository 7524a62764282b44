//! Review summary — the read-only recap shown on the final step.
//!
//! Values are carried as literal strings in the view model; nothing here
//! is ever interpreted as markup.

use serde::{Deserialize, Serialize};

use super::model::{FormData, PackageInfo, flag_field, text_field};

/// The full recap, one section per originating step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub sections: Vec<SummarySection>,
}

/// A titled group of recap fields with an edit link back to its step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    pub title: String,
    /// Step the section's "Edit" affordance navigates to.
    pub edit_step: u8,
    pub fields: Vec<SummaryField>,
}

/// One recap line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryField {
    pub label: String,
    pub value: String,
}

fn field(label: &str, value: impl Into<String>) -> SummaryField {
    SummaryField {
        label: label.to_string(),
        value: value.into(),
    }
}

fn text_or(data: &FormData, name: &str, fallback: &str) -> String {
    text_field(data, name).unwrap_or(fallback).to_string()
}

fn yes_no(data: &FormData, name: &str, price: Option<&str>) -> String {
    if flag_field(data, name) {
        match price {
            Some(p) => format!("Yes ({p})"),
            None => "Yes".to_string(),
        }
    } else {
        "No".to_string()
    }
}

/// Build the recap from captured data.
pub fn generate_summary(info: &PackageInfo, data: &FormData) -> Summary {
    Summary {
        sections: vec![
            SummarySection {
                title: "Client Details".to_string(),
                edit_step: 1,
                fields: vec![
                    field("Name", text_or(data, "fullName", "Not provided")),
                    field("Business", text_or(data, "businessName", "N/A")),
                    field("Email", text_or(data, "email", "Not provided")),
                    field("Phone", text_or(data, "phone", "Not provided")),
                ],
            },
            SummarySection {
                title: "Package & Services".to_string(),
                edit_step: 2,
                fields: vec![
                    field("Package", info.package.display_name()),
                    field("Email Setup", yes_no(data, "emailSetup", None)),
                    field(
                        "Additional Mailboxes",
                        yes_no(data, "additionalMailboxes", None),
                    ),
                    field(
                        "Website Maintenance",
                        yes_no(data, "addonMaintenance", Some("R400/mo")),
                    ),
                    field("DNS Management", yes_no(data, "addonDNS", Some("R100/mo"))),
                    field("SEO Starter Boost", yes_no(data, "addonSEO", Some("R500"))),
                    field("WhatsApp Button", yes_no(data, "addonWhatsApp", Some("R150"))),
                    field(
                        "Priority Support",
                        yes_no(data, "addonPrioritySupport", Some("R150/mo")),
                    ),
                ],
            },
            SummarySection {
                title: "Website Information".to_string(),
                edit_step: 3,
                fields: vec![
                    field("Website Type", text_or(data, "websiteType", "Not specified")),
                    field("Primary Goal", text_or(data, "primaryGoal", "Not specified")),
                    field(
                        "Number of Pages",
                        text_or(data, "numberOfPages", "Not specified"),
                    ),
                ],
            },
            SummarySection {
                title: "Design Preferences".to_string(),
                edit_step: 4,
                fields: vec![
                    field(
                        "Color Preference",
                        text_or(data, "colorPreference", "Not specified"),
                    ),
                    field("Style", text_or(data, "stylePreference", "Not specified")),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{FieldValue, Package, PackageType};

    fn info() -> PackageInfo {
        PackageInfo {
            package: Package::StandardWebsite,
            package_type: PackageType::WebsiteHosting,
            max_pages: 6,
        }
    }

    fn value_of<'a>(summary: &'a Summary, section: &str, label: &str) -> &'a str {
        summary
            .sections
            .iter()
            .find(|s| s.title == section)
            .and_then(|s| s.fields.iter().find(|f| f.label == label))
            .map(|f| f.value.as_str())
            .unwrap()
    }

    #[test]
    fn empty_data_renders_placeholders() {
        let summary = generate_summary(&info(), &FormData::new());
        assert_eq!(value_of(&summary, "Client Details", "Name"), "Not provided");
        assert_eq!(value_of(&summary, "Client Details", "Business"), "N/A");
        assert_eq!(
            value_of(&summary, "Website Information", "Website Type"),
            "Not specified"
        );
        assert_eq!(value_of(&summary, "Package & Services", "Email Setup"), "No");
    }

    #[test]
    fn package_name_comes_from_selection() {
        let summary = generate_summary(&info(), &FormData::new());
        assert_eq!(
            value_of(&summary, "Package & Services", "Package"),
            "Standard Website"
        );
    }

    #[test]
    fn addons_render_with_prices() {
        let mut data = FormData::new();
        data.insert("addonMaintenance".to_string(), FieldValue::flag(true));
        data.insert("addonSEO".to_string(), FieldValue::flag(true));
        data.insert("emailSetup".to_string(), FieldValue::flag(true));

        let summary = generate_summary(&info(), &data);
        assert_eq!(
            value_of(&summary, "Package & Services", "Website Maintenance"),
            "Yes (R400/mo)"
        );
        assert_eq!(
            value_of(&summary, "Package & Services", "SEO Starter Boost"),
            "Yes (R500)"
        );
        assert_eq!(value_of(&summary, "Package & Services", "Email Setup"), "Yes");
        assert_eq!(
            value_of(&summary, "Package & Services", "DNS Management"),
            "No"
        );
    }

    #[test]
    fn edit_links_point_at_the_owning_steps() {
        let summary = generate_summary(&info(), &FormData::new());
        let steps: Vec<u8> = summary.sections.iter().map(|s| s.edit_step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4]);
    }

    #[test]
    fn values_stay_literal() {
        let mut data = FormData::new();
        data.insert(
            "fullName".to_string(),
            FieldValue::text("<script>alert(1)</script>"),
        );
        let summary = generate_summary(&info(), &data);
        assert_eq!(
            value_of(&summary, "Client Details", "Name"),
            "<script>alert(1)</script>"
        );
    }
}
