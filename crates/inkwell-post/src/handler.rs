//! Post CRUD handlers.
//!
//! Visibility: unauthenticated and non-staff callers see published posts
//! only; authors always see their own, staff see everything. Mutation is
//! allowed to the author or staff.

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use inkwell_core::extract::{Auth, AuthCtx, OptionalAuth};
use inkwell_types::content_adapter::{
	CreatePostData, ListPostsOptions, PostRecord, SlugSpec, UpdatePostData,
};

use crate::prelude::*;
use crate::slug;

fn can_modify(auth: &AuthCtx, post: &PostRecord) -> bool {
	auth.is_staff || post.author_id == auth.account_id
}

fn can_view(auth: Option<&AuthCtx>, post: &PostRecord) -> bool {
	post.is_published
		|| auth.is_some_and(|a| a.is_staff || post.author_id == a.account_id)
}

/// Derive the slug base from a title, rejecting titles that slugify to
/// nothing
fn derive_base(title: &str) -> ApiResult<String> {
	let base = slug::slugify(title);
	if base.is_empty() {
		return Err(Error::field("title", "Title must contain alphanumeric characters"));
	}
	Ok(base)
}

/// Full post view
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
	pub id: i64,
	pub title: Box<str>,
	pub content: Box<str>,
	pub slug: Box<str>,
	pub author: Box<str>,
	pub author_id: AccountId,
	pub is_published: bool,
	pub image: Option<Box<str>>,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
	pub excerpt: String,
}

impl From<PostRecord> for PostView {
	fn from(post: PostRecord) -> Self {
		let excerpt = slug::excerpt(&post.content);
		PostView {
			id: post.post_id,
			title: post.title,
			content: post.content,
			slug: post.slug,
			author: post.author_email,
			author_id: post.author_id,
			is_published: post.is_published,
			image: post.image,
			created_at: post.created_at,
			updated_at: post.updated_at,
			excerpt,
		}
	}
}

/// Compact view for listings, content replaced by the excerpt
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListView {
	pub id: i64,
	pub title: Box<str>,
	pub slug: Box<str>,
	pub author: Box<str>,
	pub is_published: bool,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
	pub excerpt: String,
}

impl From<PostRecord> for PostListView {
	fn from(post: PostRecord) -> Self {
		PostListView {
			id: post.post_id,
			title: post.title,
			slug: post.slug,
			author: post.author_email,
			is_published: post.is_published,
			created_at: post.created_at,
			updated_at: post.updated_at,
			excerpt: slug::excerpt(&post.content),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
	pub author: Option<String>,
	pub search: Option<String>,
}

/// GET /api/posts - Public listing with ?author= and ?search= filters
pub async fn list_posts(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Query(query): Query<ListPostsQuery>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vec<PostListView>>>)> {
	let is_staff = auth.as_ref().is_some_and(|a| a.is_staff);
	let opts = ListPostsOptions {
		published_only: !is_staff,
		viewer_id: auth.as_ref().map(|a| a.account_id),
		author_email: query.author.as_deref(),
		search: query.search.as_deref(),
		..Default::default()
	};

	let posts = app.content_adapter.list_posts(&opts).await?;
	let views: Vec<PostListView> = posts.into_iter().map(PostListView::from).collect();
	let count = views.len();
	Ok((StatusCode::OK, Json(ApiResponse::new(views).with_count(count))))
}

/// GET /api/posts/my_posts - The caller's posts, all states
pub async fn my_posts(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vec<PostListView>>>)> {
	let opts = ListPostsOptions { author_id: Some(auth.account_id), ..Default::default() };

	let posts = app.content_adapter.list_posts(&opts).await?;
	let views: Vec<PostListView> = posts.into_iter().map(PostListView::from).collect();
	let count = views.len();
	Ok((StatusCode::OK, Json(ApiResponse::new(views).with_count(count))))
}

/// GET /api/posts/{slug} - Read one post. An unpublished post is a 404
/// for everyone except its author and staff.
pub async fn get_post(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Path(slug): Path<String>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PostView>>)> {
	let post = app.content_adapter.read_post_by_slug(&slug).await?;
	if !can_view(auth.as_ref(), &post) {
		return Err(Error::NotFound);
	}

	Ok((StatusCode::OK, Json(ApiResponse::new(post.into()))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostReq {
	pub title: String,
	pub content: String,
	pub slug: Option<String>,
	#[serde(default)]
	pub is_published: bool,
	pub image: Option<String>,
}

/// POST /api/posts - Create a post, caller becomes the author. A missing
/// slug is derived from the title and suffixed until unique.
pub async fn create_post(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreatePostReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PostView>>)> {
	let mut errors = FieldErrors::new("Error creating post");
	if req.title.trim().is_empty() {
		errors.add("title", "Title is required");
	}
	if req.content.trim().is_empty() {
		errors.add("content", "Content is required");
	}
	errors.into_result()?;

	let base;
	let slug_spec = match req.slug.as_deref().filter(|s| !s.is_empty()) {
		Some(explicit) => SlugSpec::Explicit(explicit),
		None => {
			base = derive_base(&req.title)?;
			SlugSpec::Derived(&base)
		}
	};

	let author_name = format!("{} {}", auth.first_name, auth.last_name);
	let data = CreatePostData {
		title: &req.title,
		content: &req.content,
		slug: slug_spec,
		is_published: req.is_published,
		image: req.image.as_deref(),
		author_email: &auth.email,
		author_name: author_name.trim(),
	};

	let post = match app.content_adapter.create_post(auth.account_id, &data).await {
		Err(Error::Conflict(_)) => return Err(Error::field("slug", "This slug is already in use")),
		res => res?,
	};

	info!("Post '{}' created by {}", post.slug, auth.email);
	let response = ApiResponse::new(PostView::from(post)).with_message("Post created successfully");
	Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostReq {
	pub title: Option<String>,
	pub content: Option<String>,
	pub slug: Option<String>,
	pub is_published: Option<bool>,
	#[serde(default)]
	pub image: Patch<String>,
}

/// PATCH /api/posts/{slug} - Update a post (author or staff)
pub async fn update_post(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(slug): Path<String>,
	Json(req): Json<UpdatePostReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PostView>>)> {
	let post = app.content_adapter.read_post_by_slug(&slug).await?;
	if !can_modify(&auth, &post) {
		return Err(Error::PermissionDenied);
	}

	let mut errors = FieldErrors::new("Error updating post");
	if req.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
		errors.add("title", "Title cannot be empty");
	}
	if req.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
		errors.add("content", "Content cannot be empty");
	}
	if req.slug.as_deref().is_some_and(|s| s.trim().is_empty()) {
		errors.add("slug", "Slug cannot be empty");
	}
	errors.into_result()?;

	let data = UpdatePostData {
		title: req.title.as_deref(),
		content: req.content.as_deref(),
		slug: req.slug.as_deref(),
		is_published: req.is_published,
		image: req.image.as_option().map(|v| v.map(String::as_str)),
	};

	let updated = match app.content_adapter.update_post(post.post_id, &data).await {
		Err(Error::Conflict(_)) => return Err(Error::field("slug", "This slug is already in use")),
		res => res?,
	};

	info!("Post '{}' updated by {}", updated.slug, auth.email);
	let response =
		ApiResponse::new(PostView::from(updated)).with_message("Post updated successfully");
	Ok((StatusCode::OK, Json(response)))
}

/// POST /api/posts/{slug}/toggle_publish - Flip the publication flag
/// (author or staff)
pub async fn toggle_publish(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(slug): Path<String>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PostView>>)> {
	let post = app.content_adapter.read_post_by_slug(&slug).await?;
	if !can_modify(&auth, &post) {
		return Err(Error::PermissionDenied);
	}

	let updated =
		app.content_adapter.set_post_published(post.post_id, !post.is_published).await?;

	let message =
		if updated.is_published { "Post published successfully" } else { "Post unpublished successfully" };
	info!("Post '{}' publish toggled to {} by {}", updated.slug, updated.is_published, auth.email);
	let response = ApiResponse::new(PostView::from(updated)).with_message(message);
	Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/posts/{slug} - Delete a post (author or staff)
pub async fn delete_post(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
	let post = app.content_adapter.read_post_by_slug(&slug).await?;
	if !can_modify(&auth, &post) {
		return Err(Error::PermissionDenied);
	}

	app.content_adapter.delete_post(post.post_id).await?;
	info!("Post '{}' deleted by {}", slug, auth.email);
	Ok(StatusCode::NO_CONTENT)
}

// vim: ts=4
