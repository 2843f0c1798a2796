use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{BoardClientError, BoardClientResult};
use crate::models::Post;

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct EditPostRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
    #[serde(default)]
    validation: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: i64,
    title: String,
    content: String,
}

#[derive(Serialize)]
struct PostSearchQuery {
    page: i32,
    size: i32,
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `board-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> BoardClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> BoardClientError {
        let status = response.status();

        match response.json::<ErrorResponseDto>().await {
            Ok(body) => BoardClientError::from_http_status(status, body.message, body.validation),
            Err(_) => BoardClientError::from_http_status(status, None, BTreeMap::new()),
        }
    }

    /// отправляет запрос и проверяет статус; тело ответа не читается
    async fn send(&self, request: RequestBuilder) -> BoardClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(BoardClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn send_for_json<TRes>(&self, request: RequestBuilder) -> BoardClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        self.send(request)
            .await?
            .json::<TRes>()
            .await
            .map_err(BoardClientError::from_reqwest)
    }

    /// Создаёт пост. Сервер не возвращает идентификатор нового поста.
    pub async fn create_post(&self, title: &str, content: &str) -> BoardClientResult<()> {
        let payload = CreatePostRequestDto { title, content };
        let request = self
            .client
            .request(Method::POST, self.endpoint("/posts"))
            .json(&payload);

        self.send(request).await?;
        Ok(())
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BoardClientResult<Post> {
        let request = self
            .client
            .request(Method::GET, self.endpoint(&format!("/posts/{id}")));

        let dto: PostDto = self.send_for_json(request).await?;
        Ok(dto.into())
    }

    /// Возвращает страницу постов, от новых к старым.
    pub async fn list_posts(&self, page: i32, size: i32) -> BoardClientResult<Vec<Post>> {
        let query = PostSearchQuery { page, size };
        let request = self
            .client
            .request(Method::GET, self.endpoint("/posts"))
            .query(&query);

        let dtos: Vec<PostDto> = self.send_for_json(request).await?;
        Ok(dtos.into_iter().map(Post::from).collect())
    }

    /// Частично обновляет пост: `None` оставляет поле без изменений.
    pub async fn edit_post(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> BoardClientResult<()> {
        let payload = EditPostRequestDto { title, content };
        let request = self
            .client
            .request(Method::PATCH, self.endpoint(&format!("/posts/{id}")))
            .json(&payload);

        self.send(request).await?;
        Ok(())
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_post(&self, id: i64) -> BoardClientResult<()> {
        let request = self
            .client
            .request(Method::DELETE, self.endpoint(&format!("/posts/{id}")));

        self.send(request).await?;
        Ok(())
    }
}
