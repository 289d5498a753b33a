//! Utility functions

use regex::Regex;
use std::sync::OnceLock;

/// RFC-shaped email syntax check (local@domain with a dotted domain).
/// Intentionally syntactic only; deliverability is not our concern.
pub fn is_valid_email(s: &str) -> bool {
	static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
	let re = EMAIL_RE.get_or_init(|| {
		Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
			.expect("email pattern compiles")
	});
	re.is_match(s)
}

/// Normalize an email for storage and lookup: trim surrounding
/// whitespace and lower-case the domain part.
pub fn normalize_email(email: &str) -> String {
	let email = email.trim();
	match email.rsplit_once('@') {
		Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
		None => email.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_valid_emails() {
		assert!(is_valid_email("alice@example.com"));
		assert!(is_valid_email("first.last+tag@sub.example.org"));
	}

	#[test]
	fn test_invalid_emails() {
		assert!(!is_valid_email("not-an-email"));
		assert!(!is_valid_email("missing@domain"));
		assert!(!is_valid_email("@example.com"));
		assert!(!is_valid_email("spaces in@example.com"));
	}

	#[test]
	fn test_normalize_email() {
		assert_eq!(normalize_email("  Alice@Example.COM "), "Alice@example.com");
		assert_eq!(normalize_email("bob@test.org"), "bob@test.org");
	}
}

// vim: ts=4
