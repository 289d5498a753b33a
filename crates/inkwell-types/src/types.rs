//! Common types used throughout the Inkwell backend.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// AccountId //
//***********//
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AccountId(pub i64);

impl std::fmt::Display for AccountId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for AccountId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for AccountId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(AccountId(i64::deserialize(deserializer)?))
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Self {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_secs() as i64)
	}

	pub fn from_now(seconds: i64) -> Self {
		Timestamp(Self::now().0 + seconds)
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// ApiResponse //
//*************//
/// Standard response envelope: payload plus an optional human message
/// and optional result count for list endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
	pub data: T,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, message: None, count: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn with_count(mut self, count: usize) -> Self {
		self.count = Some(count);
		self
	}
}

// Patch //
//*******//
/// Tri-state PATCH field: distinguishes an omitted field (`Undefined`)
/// from an explicit `null` and from a concrete value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
	#[default]
	Undefined,
	Null,
	Value(T),
}

impl<T> Patch<T> {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Patch::Undefined)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Patch::Null)
	}

	pub fn is_value(&self) -> bool {
		matches!(self, Patch::Value(_))
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			Patch::Value(v) => Some(v),
			_ => None,
		}
	}

	/// `None` = leave untouched, `Some(None)` = clear, `Some(Some(v))` = set
	pub fn as_option(&self) -> Option<Option<&T>> {
		match self {
			Patch::Undefined => None,
			Patch::Null => Some(None),
			Patch::Value(v) => Some(Some(v)),
		}
	}

	pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
		match self {
			Patch::Undefined => Patch::Undefined,
			Patch::Null => Patch::Null,
			Patch::Value(v) => Patch::Value(f(v)),
		}
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(match Option::<T>::deserialize(deserializer)? {
			Some(v) => Patch::Value(v),
			None => Patch::Null,
		})
	}
}

impl<T: Serialize> Serialize for Patch<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		match self {
			Patch::Value(v) => v.serialize(serializer),
			_ => serializer.serialize_none(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, Deserialize, PartialEq)]
	struct PatchBody {
		#[serde(default)]
		name: Patch<String>,
		#[serde(default)]
		phone: Patch<String>,
	}

	#[test]
	fn test_patch_states() {
		let body: PatchBody = serde_json::from_str(r#"{"name": "Alice", "phone": null}"#)
			.unwrap_or(PatchBody { name: Patch::Undefined, phone: Patch::Undefined });

		assert_eq!(body.name.value().map(String::as_str), Some("Alice"));
		assert!(body.phone.is_null());

		let body: PatchBody = serde_json::from_str("{}")
			.unwrap_or(PatchBody { name: Patch::Null, phone: Patch::Null });
		assert!(body.name.is_undefined());
		assert!(body.phone.is_undefined());
	}

	#[test]
	fn test_timestamp_ordering() {
		assert!(Timestamp(1) < Timestamp(2));
		assert!(Timestamp::from_now(60) > Timestamp::now());
	}
}

// vim: ts=4
