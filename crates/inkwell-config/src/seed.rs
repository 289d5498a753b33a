//! Built-in default configuration entries.
//!
//! Seeded idempotently at process start: the adapter inserts each entry
//! only if the key is absent, inside one transaction, so concurrent
//! starts are safe and operator edits are never overwritten.

use inkwell_types::config::{ConfigCategory, ConfigType};
use inkwell_types::content_adapter::CreateConfigData;

pub fn default_entries() -> Vec<CreateConfigData<'static>> {
	vec![
		CreateConfigData {
			key: "site_name",
			value: None,
			default_value: Some("Inkwell"),
			category: ConfigCategory::Site,
			typ: ConfigType::Text,
			label: "Site name",
			description: Some("Name shown in the page title and header"),
			is_required: true,
			is_public: true,
			order: 0,
		},
		CreateConfigData {
			key: "site_description",
			value: None,
			default_value: Some("A self-hosted content platform"),
			category: ConfigCategory::Site,
			typ: ConfigType::Textarea,
			label: "Site description",
			description: None,
			is_required: false,
			is_public: true,
			order: 1,
		},
		CreateConfigData {
			key: "site_logo",
			value: None,
			default_value: None,
			category: ConfigCategory::Site,
			typ: ConfigType::File,
			label: "Site logo",
			description: None,
			is_required: false,
			is_public: true,
			order: 2,
		},
		CreateConfigData {
			key: "maintenance_mode",
			value: None,
			default_value: Some("false"),
			category: ConfigCategory::Site,
			typ: ConfigType::Boolean,
			label: "Maintenance mode",
			description: Some("Hide the public site while enabled"),
			is_required: false,
			is_public: true,
			order: 3,
		},
		CreateConfigData {
			key: "contact_email",
			value: None,
			default_value: None,
			category: ConfigCategory::Email,
			typ: ConfigType::Email,
			label: "Contact email",
			description: Some("Address shown on the contact page"),
			is_required: false,
			is_public: true,
			order: 0,
		},
		CreateConfigData {
			key: "notification_email",
			value: None,
			default_value: None,
			category: ConfigCategory::Email,
			typ: ConfigType::Email,
			label: "Notification email",
			description: Some("Recipient of contact-form notifications"),
			is_required: false,
			is_public: false,
			order: 1,
		},
		CreateConfigData {
			key: "seo_title",
			value: None,
			default_value: None,
			category: ConfigCategory::Seo,
			typ: ConfigType::Text,
			label: "SEO title",
			description: None,
			is_required: false,
			is_public: true,
			order: 0,
		},
		CreateConfigData {
			key: "seo_description",
			value: None,
			default_value: None,
			category: ConfigCategory::Seo,
			typ: ConfigType::Textarea,
			label: "SEO description",
			description: None,
			is_required: false,
			is_public: true,
			order: 1,
		},
		CreateConfigData {
			key: "seo_keywords",
			value: None,
			default_value: None,
			category: ConfigCategory::Seo,
			typ: ConfigType::Text,
			label: "SEO keywords",
			description: Some("Comma-separated keyword list"),
			is_required: false,
			is_public: true,
			order: 2,
		},
		CreateConfigData {
			key: "social_facebook",
			value: None,
			default_value: None,
			category: ConfigCategory::Social,
			typ: ConfigType::Url,
			label: "Facebook page",
			description: None,
			is_required: false,
			is_public: true,
			order: 0,
		},
		CreateConfigData {
			key: "social_twitter",
			value: None,
			default_value: None,
			category: ConfigCategory::Social,
			typ: ConfigType::Url,
			label: "Twitter profile",
			description: None,
			is_required: false,
			is_public: true,
			order: 1,
		},
		CreateConfigData {
			key: "social_instagram",
			value: None,
			default_value: None,
			category: ConfigCategory::Social,
			typ: ConfigType::Url,
			label: "Instagram profile",
			description: None,
			is_required: false,
			is_public: true,
			order: 2,
		},
		CreateConfigData {
			key: "analytics_google_id",
			value: None,
			default_value: None,
			category: ConfigCategory::Analytics,
			typ: ConfigType::Text,
			label: "Google Analytics ID",
			description: None,
			is_required: false,
			is_public: true,
			order: 0,
		},
		CreateConfigData {
			key: "posts_per_page",
			value: None,
			default_value: Some("10"),
			category: ConfigCategory::General,
			typ: ConfigType::Number,
			label: "Posts per page",
			description: None,
			is_required: false,
			is_public: true,
			order: 0,
		},
		CreateConfigData {
			key: "footer_links",
			value: None,
			default_value: Some("[]"),
			category: ConfigCategory::General,
			typ: ConfigType::Json,
			label: "Footer links",
			description: Some("JSON array of {label, url} objects"),
			is_required: false,
			is_public: true,
			order: 1,
		},
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value;

	#[test]
	fn test_default_keys_unique() {
		let entries = default_entries();
		let mut keys: Vec<&str> = entries.iter().map(|e| e.key).collect();
		keys.sort_unstable();
		keys.dedup();
		assert_eq!(keys.len(), entries.len());
	}

	#[test]
	fn test_defaults_pass_their_own_validation() {
		for entry in default_entries() {
			if let Some(raw) = entry.default_value {
				assert!(
					value::validate_value(entry.typ, raw).is_ok(),
					"default for '{}' fails validation",
					entry.key
				);
			}
			assert!(
				value::validate_required(entry.is_required, entry.value, entry.default_value)
					.is_ok(),
				"required entry '{}' has no default",
				entry.key
			);
		}
	}
}

// vim: ts=4
