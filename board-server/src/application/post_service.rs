use std::sync::Arc;

use tracing::debug;

use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::error::BoardError;
use crate::domain::post::{Post, PostCreate, PostEdit, PostSearch, PostView};

pub(crate) struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub(crate) fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Stores a new post. Input is expected to be validated by the caller.
    pub(crate) async fn write(&self, req: PostCreate) -> Result<i64, BoardError> {
        let new_post = NewPost {
            title: req.title,
            content: req.content,
        };
        let post = self.repo.create_post(new_post).await?;
        debug!(post_id = post.id, "post created");
        Ok(post.id)
    }

    pub(crate) async fn find_one(&self, id: i64) -> Result<PostView, BoardError> {
        self.require_post(id).await.map(PostView::from)
    }

    pub(crate) async fn get_list(&self, search: PostSearch) -> Result<Vec<PostView>, BoardError> {
        let pagination = Pagination {
            offset: search.offset(),
            limit: search.limit(),
        };
        let posts = self.repo.list_posts(pagination).await?;

        Ok(posts.into_iter().map(PostView::from).collect())
    }

    pub(crate) async fn edit(&self, id: i64, edit: PostEdit) -> Result<(), BoardError> {
        let mut post = self.require_post(id).await?;
        post.apply_edit(edit);

        self.repo
            .update_post(&post)
            .await?
            .ok_or(BoardError::PostNotFound)?;
        debug!(post_id = id, "post edited");
        Ok(())
    }

    pub(crate) async fn delete(&self, id: i64) -> Result<(), BoardError> {
        self.require_post(id).await?;

        let deleted = self.repo.delete_post(id).await?;
        if !deleted {
            return Err(BoardError::PostNotFound);
        }
        debug!(post_id = id, "post deleted");
        Ok(())
    }

    pub(crate) async fn count(&self) -> Result<i64, BoardError> {
        self.repo.total_posts().await
    }

    async fn require_post(&self, id: i64) -> Result<Post, BoardError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or(BoardError::PostNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::PostService;
    use crate::data::post_repository::{NewPost, Pagination, PostRepository};
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::domain::error::BoardError;
    use crate::domain::post::{Post, PostCreate, PostEdit, PostSearch};

    #[derive(Clone)]
    struct FakePostRepo {
        post_for_get: Arc<Mutex<Option<Post>>>,
        update_result: Arc<Mutex<Option<Post>>>,
        delete_result: Arc<Mutex<bool>>,
        list_call: Arc<Mutex<Option<Pagination>>>,
        fail_with: Arc<Mutex<Option<String>>>,
    }

    impl FakePostRepo {
        fn new() -> Self {
            Self {
                post_for_get: Arc::new(Mutex::new(None)),
                update_result: Arc::new(Mutex::new(None)),
                delete_result: Arc::new(Mutex::new(true)),
                list_call: Arc::new(Mutex::new(None)),
                fail_with: Arc::new(Mutex::new(None)),
            }
        }

        fn failure(&self) -> Result<(), BoardError> {
            match self.fail_with.lock().expect("fail_with mutex poisoned").clone() {
                Some(message) => Err(BoardError::Unexpected(message)),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn create_post(&self, input: NewPost) -> Result<Post, BoardError> {
            self.failure()?;
            Ok(sample_post(1, &input.title, &input.content))
        }

        async fn get_post(&self, _id: i64) -> Result<Option<Post>, BoardError> {
            self.failure()?;
            Ok(self
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned")
                .clone())
        }

        async fn update_post(&self, _post: &Post) -> Result<Option<Post>, BoardError> {
            self.failure()?;
            Ok(self
                .update_result
                .lock()
                .expect("update_result mutex poisoned")
                .clone())
        }

        async fn delete_post(&self, _id: i64) -> Result<bool, BoardError> {
            self.failure()?;
            Ok(*self
                .delete_result
                .lock()
                .expect("delete_result mutex poisoned"))
        }

        async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, BoardError> {
            self.failure()?;
            *self.list_call.lock().expect("list_call mutex poisoned") = Some(pagination);
            Ok(Vec::new())
        }

        async fn total_posts(&self) -> Result<i64, BoardError> {
            self.failure()?;
            Ok(0)
        }
    }

    fn sample_post(id: i64, title: &str, content: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn create(title: &str, content: &str) -> PostCreate {
        PostCreate {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn memory_service() -> (PostService, Arc<InMemoryPostRepository>) {
        let repo = Arc::new(InMemoryPostRepository::new());
        (PostService::new(repo.clone()), repo)
    }

    async fn seed_posts(service: &PostService, count: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(count);
        for i in 1..=count {
            let id = service
                .write(create(&format!("title {i}"), &format!("content {i}")))
                .await
                .expect("write must succeed");
            ids.push(id);
        }
        ids
    }

    #[tokio::test]
    async fn write_stores_post() {
        let (service, repo) = memory_service();

        let id = service
            .write(create("a title", "some content"))
            .await
            .expect("write must succeed");

        assert_eq!(repo.total_posts().await.expect("count"), 1);
        let stored = repo
            .get_post(id)
            .await
            .expect("get must succeed")
            .expect("post must exist");
        assert_eq!(stored.title, "a title");
        assert_eq!(stored.content, "some content");
    }

    #[tokio::test]
    async fn write_allows_duplicates() {
        let (service, _repo) = memory_service();

        let first = service.write(create("same", "same")).await.expect("first");
        let second = service.write(create("same", "same")).await.expect("second");

        assert_ne!(first, second);
        assert_eq!(service.count().await.expect("count"), 2);
    }

    #[tokio::test]
    async fn find_one_returns_written_post() {
        let (service, _repo) = memory_service();
        let id = service
            .write(create("a title", "some content"))
            .await
            .expect("write must succeed");

        let view = service.find_one(id).await.expect("post must be found");
        assert_eq!(view.id, id);
        assert_eq!(view.title, "a title");
        assert_eq!(view.content, "some content");
    }

    #[tokio::test]
    async fn find_one_on_unknown_id_is_not_found() {
        let (service, _repo) = memory_service();
        let id = service.write(create("t", "c")).await.expect("write");

        let err = service
            .find_one(id + 1)
            .await
            .expect_err("post must be missing");
        assert!(matches!(err, BoardError::PostNotFound));
    }

    #[tokio::test]
    async fn get_list_first_page_is_newest_first() {
        let (service, _repo) = memory_service();
        let ids = seed_posts(&service, 30).await;

        let page = service
            .get_list(PostSearch::new(1, 10))
            .await
            .expect("list must succeed");

        assert_eq!(page.len(), 10);
        assert_eq!(page[0].id, ids[29]);
        assert_eq!(page[0].title, "title 30");
        assert_eq!(page[4].title, "title 26");
    }

    #[tokio::test]
    async fn get_list_page_zero_matches_page_one() {
        let (service, _repo) = memory_service();
        seed_posts(&service, 30).await;

        let zero = service
            .get_list(PostSearch::new(0, 10))
            .await
            .expect("page 0");
        let one = service
            .get_list(PostSearch::new(1, 10))
            .await
            .expect("page 1");

        assert_eq!(zero, one);
    }

    #[tokio::test]
    async fn get_list_second_page_skips_past_small_tables() {
        let (service, _repo) = memory_service();
        seed_posts(&service, 30).await;

        let page = service
            .get_list(PostSearch::new(2, 10))
            .await
            .expect("out of range page must not fail");
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn get_list_passes_offset_and_limit_to_repo() {
        let repo = FakePostRepo::new();
        let service = PostService::new(Arc::new(repo.clone()));

        service
            .get_list(PostSearch::new(3, 20))
            .await
            .expect("list must succeed");

        let call = repo
            .list_call
            .lock()
            .expect("list_call mutex poisoned")
            .expect("list call must be captured");
        assert_eq!(call.offset, 4000);
        assert_eq!(call.limit, 20);
    }

    #[tokio::test]
    async fn edit_title_only_keeps_content() {
        let (service, repo) = memory_service();
        let id = service
            .write(create("old title", "body"))
            .await
            .expect("write");

        service
            .edit(
                id,
                PostEdit {
                    title: Some("new title".to_string()),
                    content: None,
                },
            )
            .await
            .expect("edit must succeed");

        let stored = repo
            .get_post(id)
            .await
            .expect("get")
            .expect("post must exist");
        assert_eq!(stored.title, "new title");
        assert_eq!(stored.content, "body");
    }

    #[tokio::test]
    async fn edit_content_only_keeps_title() {
        let (service, _repo) = memory_service();
        let id = service.write(create("title", "old")).await.expect("write");

        service
            .edit(
                id,
                PostEdit {
                    title: None,
                    content: Some("new".to_string()),
                },
            )
            .await
            .expect("edit must succeed");

        let view = service.find_one(id).await.expect("find");
        assert_eq!(view.title, "title");
        assert_eq!(view.content, "new");
    }

    #[tokio::test]
    async fn edit_unknown_post_is_not_found() {
        let (service, _repo) = memory_service();

        let err = service
            .edit(1, PostEdit::default())
            .await
            .expect_err("post must be missing");
        assert!(matches!(err, BoardError::PostNotFound));
    }

    #[tokio::test]
    async fn edit_reports_not_found_when_row_vanishes_before_update() {
        let repo = FakePostRepo::new();
        *repo
            .post_for_get
            .lock()
            .expect("post_for_get mutex poisoned") = Some(sample_post(5, "t", "c"));

        let service = PostService::new(Arc::new(repo));
        let err = service
            .edit(5, PostEdit::default())
            .await
            .expect_err("update must miss");
        assert!(matches!(err, BoardError::PostNotFound));
    }

    #[tokio::test]
    async fn delete_removes_post() {
        let (service, repo) = memory_service();
        let id = service.write(create("t", "c")).await.expect("write");

        service.delete(id).await.expect("delete must succeed");

        assert_eq!(repo.total_posts().await.expect("count"), 0);
        let err = service.find_one(id).await.expect_err("post must be gone");
        assert!(matches!(err, BoardError::PostNotFound));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let (service, _repo) = memory_service();
        let id = service.write(create("t", "c")).await.expect("write");

        service.delete(id).await.expect("first delete");
        let err = service.delete(id).await.expect_err("second delete must fail");
        assert!(matches!(err, BoardError::PostNotFound));
    }

    #[tokio::test]
    async fn delete_reports_not_found_when_repo_deletes_nothing() {
        let repo = FakePostRepo::new();
        *repo
            .post_for_get
            .lock()
            .expect("post_for_get mutex poisoned") = Some(sample_post(5, "t", "c"));
        *repo
            .delete_result
            .lock()
            .expect("delete_result mutex poisoned") = false;

        let service = PostService::new(Arc::new(repo));
        let err = service.delete(5).await.expect_err("delete must miss");
        assert!(matches!(err, BoardError::PostNotFound));
    }

    #[tokio::test]
    async fn store_failures_propagate_unchanged() {
        let repo = FakePostRepo::new();
        *repo.fail_with.lock().expect("fail_with mutex poisoned") =
            Some("connection refused".to_string());

        let service = PostService::new(Arc::new(repo));
        let err = service.find_one(1).await.expect_err("store must fail");
        match err {
            BoardError::Unexpected(message) => assert_eq!(message, "connection refused"),
            other => panic!("expected BoardError::Unexpected, got {other:?}"),
        }
    }
}
