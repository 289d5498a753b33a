//! Per-type validation and conversion tables.
//!
//! Both tables match exhaustively on [`ConfigType`]; a new type tag fails
//! compilation here until it gets a validate and a convert case.
//!
//! Validation runs at write time and rejects malformed input with the
//! offending reason. Conversion runs at read time and is lenient: a read
//! path must never fail on stale or malformed stored data, so conversion
//! falls back (`Null` for numbers, `false` for booleans, the raw string
//! for JSON) instead of erroring.

use inkwell_types::config::{ConfigType, ConfigValue};
use inkwell_types::content_adapter::ConfigEntryRecord;
use inkwell_types::utils::is_valid_email;

/// Literals accepted by boolean validation at write time
const BOOL_LITERALS: [&str; 6] = ["true", "false", "1", "0", "yes", "no"];
/// Literals interpreted as true at read time
const BOOL_TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Convert a raw stored string per the declared type
pub fn convert(typ: ConfigType, raw: &str) -> ConfigValue {
	match typ {
		ConfigType::Number => {
			if let Ok(i) = raw.trim().parse::<i64>() {
				ConfigValue::Int(i)
			} else if let Ok(f) = raw.trim().parse::<f64>() {
				ConfigValue::Float(f)
			} else {
				ConfigValue::Null
			}
		}
		ConfigType::Boolean => {
			ConfigValue::Bool(BOOL_TRUTHY.contains(&raw.trim().to_lowercase().as_str()))
		}
		ConfigType::Json => match serde_json::from_str::<serde_json::Value>(raw) {
			Ok(v) => ConfigValue::Json(v),
			Err(_) => ConfigValue::Text(raw.to_string()),
		},
		ConfigType::Text
		| ConfigType::Textarea
		| ConfigType::Email
		| ConfigType::Url
		| ConfigType::File => ConfigValue::Text(raw.to_string()),
	}
}

/// The value an entry presents to readers: live value if set, else its
/// default, converted per the declared type. Absent both, `Null`.
pub fn effective_value(entry: &ConfigEntryRecord) -> ConfigValue {
	match entry.effective_raw() {
		Some(raw) => convert(entry.typ, raw),
		None => ConfigValue::Null,
	}
}

/// Write-time syntactic validation of a raw value against the declared
/// type. Empty values are always accepted here; required-ness is checked
/// separately by [`validate_required`].
pub fn validate_value(typ: ConfigType, raw: &str) -> Result<(), String> {
	if raw.is_empty() {
		return Ok(());
	}
	match typ {
		ConfigType::Email => {
			if is_valid_email(raw) {
				Ok(())
			} else {
				Err("Invalid email address".into())
			}
		}
		ConfigType::Url => match url::Url::parse(raw) {
			Ok(parsed) if URL_SCHEMES.contains(&parsed.scheme()) && parsed.has_host() => Ok(()),
			_ => Err("Invalid URL".into()),
		},
		ConfigType::Number => match raw.trim().parse::<f64>() {
			Ok(_) => Ok(()),
			Err(_) => Err("Invalid number".into()),
		},
		ConfigType::Boolean => {
			if BOOL_LITERALS.contains(&raw.trim().to_lowercase().as_str()) {
				Ok(())
			} else {
				Err("Invalid boolean value".into())
			}
		}
		ConfigType::Json => match serde_json::from_str::<serde_json::Value>(raw) {
			Ok(_) => Ok(()),
			Err(_) => Err("Invalid JSON".into()),
		},
		ConfigType::Text | ConfigType::Textarea | ConfigType::File => Ok(()),
	}
}

/// Required entries must resolve to a non-empty value (live or default)
pub fn validate_required(
	is_required: bool,
	value: Option<&str>,
	default_value: Option<&str>,
) -> Result<(), String> {
	let has_value = value.is_some_and(|v| !v.is_empty());
	let has_default = default_value.is_some_and(|v| !v.is_empty());
	if is_required && !has_value && !has_default {
		Err("This field is required".into())
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use inkwell_types::config::ConfigCategory;
	use inkwell_types::types::Timestamp;

	fn entry(typ: ConfigType, value: Option<&str>, default: Option<&str>) -> ConfigEntryRecord {
		ConfigEntryRecord {
			key: "test_key".into(),
			value: value.map(Box::from),
			default_value: default.map(Box::from),
			category: ConfigCategory::General,
			typ,
			label: "Test".into(),
			description: None,
			is_required: false,
			is_public: false,
			order: 0,
			created_at: Timestamp(0),
			updated_at: Timestamp(0),
		}
	}

	#[test]
	fn test_number_integral_converts_to_int() {
		assert_eq!(convert(ConfigType::Number, "42"), ConfigValue::Int(42));
		assert_eq!(convert(ConfigType::Number, "-7"), ConfigValue::Int(-7));
	}

	#[test]
	fn test_number_fractional_converts_to_float() {
		assert_eq!(convert(ConfigType::Number, "3.25"), ConfigValue::Float(3.25));
	}

	#[test]
	fn test_number_garbage_converts_to_null() {
		assert_eq!(convert(ConfigType::Number, "abc"), ConfigValue::Null);
	}

	#[test]
	fn test_boolean_is_lenient() {
		assert_eq!(convert(ConfigType::Boolean, "YES"), ConfigValue::Bool(true));
		assert_eq!(convert(ConfigType::Boolean, "on"), ConfigValue::Bool(true));
		assert_eq!(convert(ConfigType::Boolean, "1"), ConfigValue::Bool(true));
		// unrecognized input is false, never an error
		assert_eq!(convert(ConfigType::Boolean, "maybe"), ConfigValue::Bool(false));
		assert_eq!(convert(ConfigType::Boolean, "0"), ConfigValue::Bool(false));
	}

	#[test]
	fn test_malformed_json_falls_back_to_raw_string() {
		assert_eq!(
			convert(ConfigType::Json, "{not json"),
			ConfigValue::Text("{not json".into())
		);
		assert_eq!(
			convert(ConfigType::Json, r#"{"a": 1}"#),
			ConfigValue::Json(serde_json::json!({"a": 1}))
		);
	}

	#[test]
	fn test_text_types_verbatim() {
		for typ in [ConfigType::Text, ConfigType::Textarea, ConfigType::Email, ConfigType::Url, ConfigType::File] {
			assert_eq!(convert(typ, "hello"), ConfigValue::Text("hello".into()));
		}
	}

	#[test]
	fn test_effective_value_prefers_live_over_default() {
		let e = entry(ConfigType::Number, Some("42"), Some("7"));
		assert_eq!(effective_value(&e), ConfigValue::Int(42));

		let e = entry(ConfigType::Number, None, Some("7"));
		assert_eq!(effective_value(&e), ConfigValue::Int(7));

		let e = entry(ConfigType::Number, Some(""), Some("7"));
		assert_eq!(effective_value(&e), ConfigValue::Int(7));

		let e = entry(ConfigType::Text, None, None);
		assert_eq!(effective_value(&e), ConfigValue::Null);
	}

	#[test]
	fn test_validate_number() {
		assert!(validate_value(ConfigType::Number, "42").is_ok());
		assert!(validate_value(ConfigType::Number, "3.14").is_ok());
		assert!(validate_value(ConfigType::Number, "abc").is_err());
	}

	#[test]
	fn test_validate_boolean_literals() {
		for lit in ["true", "False", "1", "0", "YES", "no"] {
			assert!(validate_value(ConfigType::Boolean, lit).is_ok(), "{}", lit);
		}
		assert!(validate_value(ConfigType::Boolean, "on").is_err());
		assert!(validate_value(ConfigType::Boolean, "maybe").is_err());
	}

	#[test]
	fn test_validate_email_and_url() {
		assert!(validate_value(ConfigType::Email, "a@example.com").is_ok());
		assert!(validate_value(ConfigType::Email, "nope").is_err());
		assert!(validate_value(ConfigType::Url, "https://example.com/page").is_ok());
		assert!(validate_value(ConfigType::Url, "example.com").is_err());
		assert!(validate_value(ConfigType::Url, "mailto:a@example.com").is_err());
	}

	#[test]
	fn test_validate_json() {
		assert!(validate_value(ConfigType::Json, r#"["a", 1]"#).is_ok());
		assert!(validate_value(ConfigType::Json, "{broken").is_err());
	}

	#[test]
	fn test_empty_value_skips_syntax_check() {
		assert!(validate_value(ConfigType::Email, "").is_ok());
		assert!(validate_value(ConfigType::Number, "").is_ok());
	}

	#[test]
	fn test_required_needs_value_or_default() {
		assert!(validate_required(true, None, None).is_err());
		assert!(validate_required(true, Some(""), Some("")).is_err());
		assert!(validate_required(true, Some("x"), None).is_ok());
		assert!(validate_required(true, None, Some("x")).is_ok());
		assert!(validate_required(false, None, None).is_ok());
	}
}

// vim: ts=4
