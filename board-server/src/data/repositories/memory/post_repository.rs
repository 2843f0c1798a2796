use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::error::BoardError;
use crate::domain::post::Post;

/// Process-local store. Ids start at 1 and are never handed out twice.
#[derive(Debug, Default)]
pub(crate) struct InMemoryPostRepository {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    posts: BTreeMap<i64, Post>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, BoardError> {
        self.state
            .lock()
            .map_err(|_| BoardError::Unexpected("in-memory post store poisoned".to_string()))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, BoardError> {
        let mut state = self.lock()?;
        state.last_id += 1;

        let post = Post {
            id: state.last_id,
            title: input.title,
            content: input.content,
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, BoardError> {
        Ok(self.lock()?.posts.get(&id).cloned())
    }

    async fn update_post(&self, post: &Post) -> Result<Option<Post>, BoardError> {
        let mut state = self.lock()?;
        Ok(state.posts.get_mut(&post.id).map(|stored| {
            stored.title.clone_from(&post.title);
            stored.content.clone_from(&post.content);
            stored.clone()
        }))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, BoardError> {
        Ok(self.lock()?.posts.remove(&id).is_some())
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, BoardError> {
        let offset = usize::try_from(pagination.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit.max(0)).unwrap_or(usize::MAX);

        Ok(self
            .lock()?
            .posts
            .values()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn total_posts(&self) -> Result<i64, BoardError> {
        let count = self.lock()?.posts.len();
        i64::try_from(count).map_err(|err| BoardError::Unexpected(err.to_string()))
    }
}
