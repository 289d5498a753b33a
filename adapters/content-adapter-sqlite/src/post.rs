//! Post storage with atomic slug assignment.
//!
//! Slug uniqueness is enforced by the UNIQUE index: the insert itself is
//! the existence check. For derived slugs a constraint violation selects
//! the next `-N` candidate; a plain read-then-insert would race under
//! concurrent writers creating posts with identical titles.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use inkwell::content_adapter::{
	CreatePostData, ListPostsOptions, PostRecord, SlugSpec, UpdatePostData,
};
use inkwell::prelude::*;

/// Bound on candidate suffixes; exhausting it reports a conflict
const MAX_SLUG_ATTEMPTS: u32 = 1000;

const COLUMNS: &str = "post_id, title, content, slug, author_id, author_email, author_name, \
	is_published, image, created_at, updated_at";

fn row_to_record(row: &SqliteRow) -> Result<PostRecord, sqlx::Error> {
	Ok(PostRecord {
		post_id: row.try_get("post_id")?,
		title: row.try_get("title")?,
		content: row.try_get("content")?,
		slug: row.try_get("slug")?,
		author_id: AccountId(row.try_get("author_id")?),
		author_email: row.try_get("author_email")?,
		author_name: row.try_get("author_name")?,
		is_published: row.try_get("is_published")?,
		image: row.try_get("image")?,
		created_at: Timestamp(row.try_get("created_at")?),
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

async fn insert(
	db: &SqlitePool,
	author_id: AccountId,
	data: &CreatePostData<'_>,
	slug: &str,
) -> Result<PostRecord, sqlx::Error> {
	let query = format!(
		"INSERT INTO posts (title, content, slug, author_id, author_email, author_name, is_published, image)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
		COLUMNS
	);
	let row = sqlx::query(&query)
		.bind(data.title)
		.bind(data.content)
		.bind(slug)
		.bind(author_id.0)
		.bind(data.author_email)
		.bind(data.author_name)
		.bind(data.is_published)
		.bind(data.image)
		.fetch_one(db)
		.await?;
	row_to_record(&row)
}

pub(crate) async fn create(
	db: &SqlitePool,
	author_id: AccountId,
	data: &CreatePostData<'_>,
) -> ApiResult<PostRecord> {
	match data.slug {
		SlugSpec::Explicit(slug) => match insert(db, author_id, data, slug).await {
			Err(err) if is_unique_violation(&err) => {
				Err(Error::Conflict("slug already in use".into()))
			}
			res => map_sqlx(res),
		},
		SlugSpec::Derived(base) => {
			for attempt in 0..MAX_SLUG_ATTEMPTS {
				let candidate = if attempt == 0 {
					base.to_string()
				} else {
					format!("{}-{}", base, attempt)
				};
				match insert(db, author_id, data, &candidate).await {
					Err(err) if is_unique_violation(&err) => continue,
					res => return map_sqlx(res),
				}
			}
			Err(Error::Conflict("slug candidate space exhausted".into()))
		}
	}
}

fn map_sqlx(res: Result<PostRecord, sqlx::Error>) -> ApiResult<PostRecord> {
	res.inspect_err(inspect).map_err(|_| Error::DbError)
}

pub(crate) async fn read_by_slug(db: &SqlitePool, slug: &str) -> ApiResult<PostRecord> {
	let query = format!("SELECT {} FROM posts WHERE slug = ?", COLUMNS);
	let res = sqlx::query(&query).bind(slug).fetch_one(db).await;
	map_res(res, row_to_record)
}

pub(crate) async fn update(
	db: &SqlitePool,
	post_id: i64,
	data: &UpdatePostData<'_>,
) -> ApiResult<PostRecord> {
	let mut query = sqlx::QueryBuilder::new("UPDATE posts SET updated_at = unixepoch()");
	if let Some(title) = data.title {
		query.push(", title = ").push_bind(title);
	}
	if let Some(content) = data.content {
		query.push(", content = ").push_bind(content);
	}
	if let Some(slug) = data.slug {
		query.push(", slug = ").push_bind(slug);
	}
	if let Some(is_published) = data.is_published {
		query.push(", is_published = ").push_bind(is_published);
	}
	if let Some(image) = data.image {
		query.push(", image = ").push_bind(image);
	}
	query.push(" WHERE post_id = ").push_bind(post_id);
	query.push(" RETURNING ").push(COLUMNS);

	let res = query.build().fetch_one(db).await;
	match res {
		Err(err) if is_unique_violation(&err) => Err(Error::Conflict("slug already in use".into())),
		res => map_res(res, row_to_record),
	}
}

pub(crate) async fn set_published(
	db: &SqlitePool,
	post_id: i64,
	is_published: bool,
) -> ApiResult<PostRecord> {
	let query = format!(
		"UPDATE posts SET is_published = ?, updated_at = unixepoch() WHERE post_id = ? RETURNING {}",
		COLUMNS
	);
	let res = sqlx::query(&query).bind(is_published).bind(post_id).fetch_one(db).await;
	map_res(res, row_to_record)
}

pub(crate) async fn delete(db: &SqlitePool, post_id: i64) -> ApiResult<()> {
	let res = sqlx::query("DELETE FROM posts WHERE post_id = ?")
		.bind(post_id)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 { Err(Error::NotFound) } else { Ok(()) }
}

pub(crate) async fn delete_by_author(db: &SqlitePool, author_id: AccountId) -> ApiResult<u32> {
	let res = sqlx::query("DELETE FROM posts WHERE author_id = ?")
		.bind(author_id.0)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected() as u32)
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListPostsOptions<'_>,
) -> ApiResult<Vec<PostRecord>> {
	let mut query = sqlx::QueryBuilder::new(format!("SELECT {} FROM posts WHERE 1=1", COLUMNS));

	if opts.published_only {
		match opts.viewer_id {
			Some(viewer) => {
				query
					.push(" AND (is_published = 1 OR author_id = ")
					.push_bind(viewer.0)
					.push(")");
			}
			None => {
				query.push(" AND is_published = 1");
			}
		}
	}
	if let Some(author_email) = opts.author_email {
		query.push(" AND author_email = ").push_bind(author_email);
	}
	if let Some(author_id) = opts.author_id {
		query.push(" AND author_id = ").push_bind(author_id.0);
	}
	if let Some(search) = opts.search {
		let pattern = format!("%{}%", search);
		query
			.push(" AND (title LIKE ")
			.push_bind(pattern.clone())
			.push(" OR content LIKE ")
			.push_bind(pattern)
			.push(")");
	}

	query.push(" ORDER BY created_at DESC, post_id DESC");
	query.push(" LIMIT ").push_bind(opts.limit.unwrap_or(100));
	query.push(" OFFSET ").push_bind(opts.offset.unwrap_or(0));

	let res = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	collect_res(res.iter().map(row_to_record))
}

// vim: ts=4
