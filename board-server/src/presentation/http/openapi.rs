use utoipa::OpenApi;

use crate::presentation::http::app_error::ErrorResponse;
use crate::presentation::http::handlers::health::HealthzResponse;
use crate::presentation::http::handlers::posts::{
    CreatePostDto, EditPostDto, PostDto, PostSearchQuery,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::health::healthz,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::edit_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            CreatePostDto,
            EditPostDto,
            PostSearchQuery,
            PostDto,
            ErrorResponse,
            HealthzResponse
        )
    ),
    tags(
        (name = "posts", description = "Bulletin board posts"),
        (name = "health", description = "Liveness probe")
    )
)]
pub(crate) struct ApiDoc;
