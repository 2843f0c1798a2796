use async_trait::async_trait;

use crate::domain::error::BoardError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) offset: i64,
    pub(crate) limit: i64,
}

/// Durable storage for posts. Listing is always ordered by id, newest first.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, BoardError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, BoardError>;
    /// Overwrites title and content of an existing row; `None` if the row is gone.
    async fn update_post(&self, post: &Post) -> Result<Option<Post>, BoardError>;
    async fn delete_post(&self, id: i64) -> Result<bool, BoardError>;
    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, BoardError>;
    async fn total_posts(&self) -> Result<i64, BoardError>;
}
