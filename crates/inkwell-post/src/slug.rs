//! Slug derivation and excerpt extraction.
//!
//! Candidate suffixing for colliding slugs lives in the content adapter,
//! where the insert and the uniqueness check are one atomic unit; this
//! module only derives the base slug.

const EXCERPT_LENGTH: usize = 150;

/// Standard slugify: lower-case, strip non-alphanumerics, collapse
/// whitespace and hyphen runs to a single hyphen, trim hyphens.
pub fn slugify(title: &str) -> String {
	let mut slug = String::with_capacity(title.len());
	let mut pending_hyphen = false;

	for c in title.chars() {
		if c.is_alphanumeric() {
			if pending_hyphen && !slug.is_empty() {
				slug.push('-');
			}
			pending_hyphen = false;
			for lower in c.to_lowercase() {
				slug.push(lower);
			}
		} else if c.is_whitespace() || c == '-' || c == '_' {
			pending_hyphen = true;
		}
		// other punctuation is stripped without acting as a separator
	}

	slug
}

/// Candidate slug for a retry round: `base` itself, then `base-1`,
/// `base-2`, ...
pub fn candidate(base: &str, attempt: u32) -> String {
	if attempt == 0 { base.to_string() } else { format!("{}-{}", base, attempt) }
}

/// First 150 characters of the content, with a truncation marker when
/// the content is longer; derived on read, never stored.
pub fn excerpt(content: &str) -> String {
	let mut iter = content.char_indices();
	match iter.nth(EXCERPT_LENGTH) {
		Some((idx, _)) => format!("{}...", &content[..idx]),
		None => content.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_slugify_basic() {
		assert_eq!(slugify("Hello World"), "hello-world");
		assert_eq!(slugify("My First Post!"), "my-first-post");
	}

	#[test]
	fn test_slugify_collapses_separators() {
		assert_eq!(slugify("a  -  b"), "a-b");
		assert_eq!(slugify("  leading and trailing  "), "leading-and-trailing");
		assert_eq!(slugify("under_scored_title"), "under-scored-title");
	}

	#[test]
	fn test_slugify_strips_punctuation() {
		assert_eq!(slugify("Don't Stop"), "dont-stop");
		assert_eq!(slugify("C++ & Rust: a comparison"), "c-rust-a-comparison");
	}

	#[test]
	fn test_slugify_unicode_lowercase() {
		assert_eq!(slugify("Łódź 2024"), "łódź-2024");
	}

	#[test]
	fn test_candidate_sequence() {
		assert_eq!(candidate("my-post", 0), "my-post");
		assert_eq!(candidate("my-post", 1), "my-post-1");
		assert_eq!(candidate("my-post", 2), "my-post-2");
	}

	#[test]
	fn test_excerpt_short_content_verbatim() {
		assert_eq!(excerpt("short"), "short");
		let exact: String = "x".repeat(150);
		assert_eq!(excerpt(&exact), exact);
	}

	#[test]
	fn test_excerpt_truncates_with_marker() {
		let long: String = "y".repeat(200);
		let ex = excerpt(&long);
		assert_eq!(ex.len(), 153);
		assert!(ex.ends_with("..."));
	}

	#[test]
	fn test_excerpt_respects_char_boundaries() {
		let long: String = "é".repeat(200);
		let ex = excerpt(&long);
		assert_eq!(ex.chars().count(), 153);
		assert!(ex.ends_with("..."));
	}
}

// vim: ts=4
