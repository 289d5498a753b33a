//! Password hashing.
//!
//! bcrypt is CPU-bound; both hashing and verification run on blocking
//! threads to keep the async runtime responsive.

use crate::prelude::*;

const BCRYPT_COST: u32 = 10;

pub async fn generate_password_hash(password: Box<str>) -> ApiResult<Box<str>> {
	tokio::task::spawn_blocking(move || {
		bcrypt::hash(password.as_ref(), BCRYPT_COST)
			.map(Box::from)
			.map_err(|err| Error::Internal(format!("password hashing failed: {}", err)))
	})
	.await
	.map_err(|_| Error::Internal("hash task failed".into()))?
}

/// Verify a plaintext password against a stored hash. A mismatch is
/// `Unauthorized`, indistinguishable from an unknown account.
pub async fn check_password(password: Box<str>, password_hash: Box<str>) -> ApiResult<()> {
	let res = tokio::task::spawn_blocking(move || {
		bcrypt::verify(password.as_ref(), &password_hash).map_err(|_| Error::Unauthorized)
	})
	.await
	.map_err(|_| Error::Internal("hash task failed".into()))??;

	if res { Ok(()) } else { Err(Error::Unauthorized) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_hash_and_verify() {
		let hash = generate_password_hash("s3cret-pass".into()).await.unwrap();
		assert!(check_password("s3cret-pass".into(), hash.clone()).await.is_ok());
		assert!(check_password("wrong-pass".into(), hash).await.is_err());
	}
}

// vim: ts=4
