//! Configuration value types.
//!
//! A configuration entry stores its value as raw text together with a
//! declared type tag. The tag set is closed: every dispatch site matches
//! exhaustively, so adding a variant fails compilation until each
//! validate/convert table handles it.

use serde::{Deserialize, Serialize};

/// Declared value type of a configuration entry
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
	Text,
	Textarea,
	Number,
	Boolean,
	Email,
	Url,
	Json,
	File,
}

impl ConfigType {
	pub const ALL: [ConfigType; 8] = [
		ConfigType::Text,
		ConfigType::Textarea,
		ConfigType::Number,
		ConfigType::Boolean,
		ConfigType::Email,
		ConfigType::Url,
		ConfigType::Json,
		ConfigType::File,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			ConfigType::Text => "text",
			ConfigType::Textarea => "textarea",
			ConfigType::Number => "number",
			ConfigType::Boolean => "boolean",
			ConfigType::Email => "email",
			ConfigType::Url => "url",
			ConfigType::Json => "json",
			ConfigType::File => "file",
		}
	}

	/// Display label for admin UI listings
	pub fn label(&self) -> &'static str {
		match self {
			ConfigType::Text => "Text",
			ConfigType::Textarea => "Text area",
			ConfigType::Number => "Number",
			ConfigType::Boolean => "Boolean",
			ConfigType::Email => "Email",
			ConfigType::Url => "URL",
			ConfigType::Json => "JSON",
			ConfigType::File => "File",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"text" => Some(ConfigType::Text),
			"textarea" => Some(ConfigType::Textarea),
			"number" => Some(ConfigType::Number),
			"boolean" => Some(ConfigType::Boolean),
			"email" => Some(ConfigType::Email),
			"url" => Some(ConfigType::Url),
			"json" => Some(ConfigType::Json),
			"file" => Some(ConfigType::File),
			_ => None,
		}
	}
}

impl std::fmt::Display for ConfigType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Grouping category of a configuration entry
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigCategory {
	Site,
	Seo,
	Email,
	Social,
	Analytics,
	General,
}

impl ConfigCategory {
	pub const ALL: [ConfigCategory; 6] = [
		ConfigCategory::Site,
		ConfigCategory::Seo,
		ConfigCategory::Email,
		ConfigCategory::Social,
		ConfigCategory::Analytics,
		ConfigCategory::General,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			ConfigCategory::Site => "site",
			ConfigCategory::Seo => "seo",
			ConfigCategory::Email => "email",
			ConfigCategory::Social => "social",
			ConfigCategory::Analytics => "analytics",
			ConfigCategory::General => "general",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			ConfigCategory::Site => "Site",
			ConfigCategory::Seo => "SEO",
			ConfigCategory::Email => "Email",
			ConfigCategory::Social => "Social networks",
			ConfigCategory::Analytics => "Analytics",
			ConfigCategory::General => "General",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"site" => Some(ConfigCategory::Site),
			"seo" => Some(ConfigCategory::Seo),
			"email" => Some(ConfigCategory::Email),
			"social" => Some(ConfigCategory::Social),
			"analytics" => Some(ConfigCategory::Analytics),
			"general" => Some(ConfigCategory::General),
			_ => None,
		}
	}
}

impl std::fmt::Display for ConfigCategory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A stored string interpreted per the entry's declared type.
///
/// Serialized untagged: readers of the public configuration map receive
/// plain JSON scalars/objects, not a wrapper.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	Json(serde_json::Value),
}

impl ConfigValue {
	pub fn type_name(&self) -> &'static str {
		match self {
			ConfigValue::Null => "null",
			ConfigValue::Bool(_) => "bool",
			ConfigValue::Int(_) => "int",
			ConfigValue::Float(_) => "float",
			ConfigValue::Text(_) => "text",
			ConfigValue::Json(_) => "json",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_type_round_trip() {
		for typ in ConfigType::ALL {
			assert_eq!(ConfigType::parse(typ.as_str()), Some(typ));
		}
		assert_eq!(ConfigType::parse("binary"), None);
	}

	#[test]
	fn test_category_round_trip() {
		for cat in ConfigCategory::ALL {
			assert_eq!(ConfigCategory::parse(cat.as_str()), Some(cat));
		}
		assert_eq!(ConfigCategory::parse("misc"), None);
	}

	#[test]
	fn test_value_serializes_untagged() {
		let v = serde_json::to_value(ConfigValue::Int(42)).unwrap_or_default();
		assert_eq!(v, serde_json::json!(42));
		let v = serde_json::to_value(ConfigValue::Bool(true)).unwrap_or_default();
		assert_eq!(v, serde_json::json!(true));
	}
}

// vim: ts=4
