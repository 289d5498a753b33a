//! Integration tests for contact message storage.

#[cfg(test)]
mod tests {
	use inkwell::content_adapter::{ContentAdapter, CreateContactMessageData};
	use inkwell::prelude::*;
	use inkwell_content_adapter_sqlite::ContentAdapterSqlite;
	use tempfile::TempDir;

	async fn create_test_adapter() -> (ContentAdapterSqlite, TempDir) {
		let tmp_dir = TempDir::new().expect("Failed to create temp dir");
		let db_path = tmp_dir.path().join("content.db");
		let adapter = ContentAdapterSqlite::new(db_path).await.expect("Failed to create adapter");
		(adapter, tmp_dir)
	}

	fn message<'a>(name: &'a str) -> CreateContactMessageData<'a> {
		CreateContactMessageData {
			name,
			email: "visitor@example.com",
			phone: None,
			subject: "Question",
			message: "A long enough message body.",
		}
	}

	#[tokio::test]
	async fn test_create_and_read_message() {
		let (adapter, _tmp) = create_test_adapter().await;

		let created =
			adapter.create_contact_message(&message("Alice")).await.expect("create failed");
		assert!(!created.is_read);
		assert!(created.phone.is_none());

		let read =
			adapter.read_contact_message(created.message_id).await.expect("read failed");
		assert_eq!(read.name.as_ref(), "Alice");
	}

	#[tokio::test]
	async fn test_unread_filter_and_toggle() {
		let (adapter, _tmp) = create_test_adapter().await;

		let first =
			adapter.create_contact_message(&message("First")).await.expect("create failed");
		adapter.create_contact_message(&message("Second")).await.expect("create failed");

		adapter
			.update_contact_message_read(first.message_id, true)
			.await
			.expect("mark read failed");

		let unread = adapter.list_contact_messages(true).await.expect("list failed");
		assert_eq!(unread.len(), 1);
		assert_eq!(unread[0].name.as_ref(), "Second");

		let all = adapter.list_contact_messages(false).await.expect("list failed");
		assert_eq!(all.len(), 2);

		// Back to unread
		let toggled = adapter
			.update_contact_message_read(first.message_id, false)
			.await
			.expect("mark unread failed");
		assert!(!toggled.is_read);
	}

	#[tokio::test]
	async fn test_delete_message() {
		let (adapter, _tmp) = create_test_adapter().await;

		let created =
			adapter.create_contact_message(&message("Gone")).await.expect("create failed");
		adapter.delete_contact_message(created.message_id).await.expect("delete failed");

		assert!(matches!(
			adapter.read_contact_message(created.message_id).await,
			Err(Error::NotFound)
		));
	}
}

// vim: ts=4
