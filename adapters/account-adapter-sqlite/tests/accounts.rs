//! Integration tests for the SQLite account adapter: account CRUD,
//! email uniqueness, search, and JWT secret persistence.

#[cfg(test)]
mod tests {
	use inkwell::account_adapter::{
		AccountAdapter, CreateAccountData, ListAccountsOptions, UpdateAccountData,
	};
	use inkwell::prelude::*;
	use inkwell_account_adapter_sqlite::AccountAdapterSqlite;
	use tempfile::TempDir;

	async fn create_test_adapter() -> (AccountAdapterSqlite, TempDir) {
		let tmp_dir = TempDir::new().expect("Failed to create temp dir");
		let db_path = tmp_dir.path().join("accounts.db");
		let adapter = AccountAdapterSqlite::new(db_path).await.expect("Failed to create adapter");
		(adapter, tmp_dir)
	}

	fn account(email: &str) -> CreateAccountData<'_> {
		CreateAccountData {
			email,
			first_name: "Test",
			last_name: "User",
			password_hash: "$2b$10$fakehashfakehashfakehash",
			is_staff: false,
			is_active: true,
		}
	}

	#[tokio::test]
	async fn test_create_and_read_account() {
		let (adapter, _tmp) = create_test_adapter().await;

		let created = adapter
			.create_account(account("alice@example.com"))
			.await
			.expect("Failed to create account");
		assert_eq!(created.email.as_ref(), "alice@example.com");
		assert!(created.is_active);
		assert!(!created.is_staff);

		let read = adapter.read_account(created.account_id).await.expect("Failed to read account");
		assert_eq!(read.email, created.email);

		let by_email = adapter
			.read_account_by_email("alice@example.com")
			.await
			.expect("Failed to read by email");
		assert_eq!(by_email.account_id, created.account_id);
	}

	#[tokio::test]
	async fn test_duplicate_email_is_conflict() {
		let (adapter, _tmp) = create_test_adapter().await;

		adapter.create_account(account("dup@example.com")).await.expect("first create failed");
		let res = adapter.create_account(account("dup@example.com")).await;

		assert!(matches!(res, Err(Error::Conflict(_))));
	}

	#[tokio::test]
	async fn test_password_hash_round_trip() {
		let (adapter, _tmp) = create_test_adapter().await;

		adapter.create_account(account("bob@example.com")).await.expect("create failed");
		let (account_id, hash) =
			adapter.read_password_hash("bob@example.com").await.expect("read hash failed");

		assert!(account_id.0 > 0);
		assert_eq!(hash.as_ref(), "$2b$10$fakehashfakehashfakehash");
	}

	#[tokio::test]
	async fn test_update_account_fields() {
		let (adapter, _tmp) = create_test_adapter().await;

		let created =
			adapter.create_account(account("carol@example.com")).await.expect("create failed");

		let data = UpdateAccountData {
			first_name: Some("Carol"),
			is_staff: Some(true),
			..Default::default()
		};
		let updated =
			adapter.update_account(created.account_id, data).await.expect("update failed");

		assert_eq!(updated.first_name.as_ref(), "Carol");
		assert_eq!(updated.last_name.as_ref(), "User");
		assert!(updated.is_staff);
	}

	#[tokio::test]
	async fn test_update_to_taken_email_is_conflict() {
		let (adapter, _tmp) = create_test_adapter().await;

		adapter.create_account(account("one@example.com")).await.expect("create failed");
		let second =
			adapter.create_account(account("two@example.com")).await.expect("create failed");

		let data = UpdateAccountData { email: Some("one@example.com"), ..Default::default() };
		let res = adapter.update_account(second.account_id, data).await;

		assert!(matches!(res, Err(Error::Conflict(_))));
	}

	#[tokio::test]
	async fn test_delete_account() {
		let (adapter, _tmp) = create_test_adapter().await;

		let created =
			adapter.create_account(account("gone@example.com")).await.expect("create failed");
		adapter.delete_account(created.account_id).await.expect("delete failed");

		let res = adapter.read_account(created.account_id).await;
		assert!(matches!(res, Err(Error::NotFound)));

		// Deleting again reports NotFound
		let res = adapter.delete_account(created.account_id).await;
		assert!(matches!(res, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_list_accounts_search() {
		let (adapter, _tmp) = create_test_adapter().await;

		let mut alice = account("alice@example.com");
		alice.first_name = "Alice";
		alice.last_name = "Smith";
		adapter.create_account(alice).await.expect("create failed");

		let mut bob = account("bob@other.org");
		bob.first_name = "Bob";
		bob.last_name = "Jones";
		adapter.create_account(bob).await.expect("create failed");

		// Search by email fragment
		let opts = ListAccountsOptions { q: Some("example.com"), ..Default::default() };
		let found = adapter.list_accounts(&opts).await.expect("list failed");
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].email.as_ref(), "alice@example.com");

		// Search by last name fragment
		let opts = ListAccountsOptions { q: Some("jon"), ..Default::default() };
		let found = adapter.list_accounts(&opts).await.expect("list failed");
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].first_name.as_ref(), "Bob");

		// No filter returns everyone
		let all = adapter.list_accounts(&ListAccountsOptions::default()).await.expect("list failed");
		assert_eq!(all.len(), 2);
	}

	#[tokio::test]
	async fn test_jwt_secret_persists_across_restarts() {
		let tmp_dir = TempDir::new().expect("Failed to create temp dir");
		let db_path = tmp_dir.path().join("accounts.db");

		let adapter1 =
			AccountAdapterSqlite::new(&db_path).await.expect("Failed to create first adapter");
		let secret1 = adapter1.read_jwt_secret().await.expect("read secret failed");
		assert!(secret1.len() > 20);
		drop(adapter1);

		let adapter2 =
			AccountAdapterSqlite::new(&db_path).await.expect("Failed to create second adapter");
		let secret2 = adapter2.read_jwt_secret().await.expect("read secret failed");

		assert_eq!(secret1, secret2);
	}
}

// vim: ts=4
