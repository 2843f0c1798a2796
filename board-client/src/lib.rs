//! Клиентская библиотека для работы с board-server по HTTP.
//!
//! `BoardClient` покрывает весь REST API доски объявлений: создание, чтение,
//! постраничный список, частичное редактирование и удаление постов.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BoardClientError, BoardClientResult};
pub use http_client::HttpClient;
pub use models::Post;

#[derive(Debug, Clone)]
/// Клиент доски объявлений.
pub struct BoardClient {
    http_client: HttpClient,
}

impl BoardClient {
    /// Размер страницы по умолчанию, совпадает с серверным.
    pub const DEFAULT_PAGE_SIZE: i32 = 10;

    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> BoardClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
        })
    }

    /// Создаёт новый пост.
    pub async fn create_post(&self, title: &str, content: &str) -> BoardClientResult<()> {
        self.http_client.create_post(title, content).await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BoardClientResult<Post> {
        self.http_client.get_post(id).await
    }

    /// Возвращает страницу постов (`page` начинается с 1).
    pub async fn list_posts(&self, page: i32, size: i32) -> BoardClientResult<Vec<Post>> {
        self.http_client.list_posts(page, size).await
    }

    /// Частично обновляет пост.
    ///
    /// Нужно передать хотя бы одно из полей `title` / `content`.
    pub async fn edit_post(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> BoardClientResult<()> {
        if title.is_none() && content.is_none() {
            return Err(BoardClientError::InvalidRequest(
                "nothing to edit: pass title and/or content".to_string(),
            ));
        }
        self.http_client.edit_post(id, title, content).await
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_post(&self, id: i64) -> BoardClientResult<()> {
        self.http_client.delete_post(id).await
    }
}
