use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::post::{PostCreate, PostEdit, PostSearch, PostView};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorResponse};
use crate::presentation::http::extract::ValidatedJson;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Please enter a title"))]
    pub(crate) title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Please enter content"))]
    pub(crate) content: String,
}

/// Partial edit: omitted fields keep their stored values.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub(crate) struct EditPostDto {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct PostSearchQuery {
    pub(crate) page: i32,
    pub(crate) size: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl Default for PostSearchQuery {
    fn default() -> Self {
        Self {
            page: PostSearch::DEFAULT_PAGE,
            size: PostSearch::DEFAULT_SIZE,
        }
    }
}

impl From<PostSearchQuery> for PostSearch {
    fn from(query: PostSearchQuery) -> Self {
        PostSearch::new(query.page, query.size)
    }
}

impl From<CreatePostDto> for PostCreate {
    fn from(dto: CreatePostDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
        }
    }
}

impl From<EditPostDto> for PostEdit {
    fn from(dto: EditPostDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
        }
    }
}

impl From<PostView> for PostDto {
    fn from(view: PostView) -> Self {
        Self {
            id: view.id,
            title: view.title,
            content: view.content,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 200, description = "Post created"),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePostDto>,
) -> AppResult<StatusCode> {
    state.post_service.write(dto.into()).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<PostDto>> {
    let Path(id) = path?;
    let view = state.post_service.find_one(id).await?;

    Ok(Json(PostDto::from(view)))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(
        ("page" = Option<i32>, Query, description = "1-based page number, values below 1 mean 1 (default 1)"),
        ("size" = Option<i32>, Query, description = "Posts per page (default 10)")
    ),
    responses(
        (status = 200, description = "Posts, newest first", body = [PostDto])
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<PostSearchQuery>, QueryRejection>,
) -> AppResult<Json<Vec<PostDto>>> {
    let Query(query) = query?;
    let posts = state.post_service.get_list(query.into()).await?;

    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = EditPostDto,
    responses(
        (status = 200, description = "Post edited"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub(crate) async fn edit_post(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(dto): ValidatedJson<EditPostDto>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    state.post_service.edit(id, dto.into()).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    state.post_service.delete(id).await?;
    Ok(StatusCode::OK)
}
