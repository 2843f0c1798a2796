use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::error::BoardError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, BoardError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.into())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, BoardError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn update_post(&self, post: &Post) -> Result<Option<Post>, BoardError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3
            WHERE id = $1
            RETURNING id, title, content
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, BoardError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, BoardError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content
            FROM posts
            ORDER BY id DESC
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn total_posts(&self) -> Result<i64, BoardError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(count)
    }
}

fn map_post_db_error(err: sqlx::Error) -> BoardError {
    BoardError::Unexpected(err.to_string())
}
