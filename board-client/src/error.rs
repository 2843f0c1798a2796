use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `board-client`.
pub enum BoardClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный пост не найден (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Сервер отклонил тело запроса (400) с ошибками по полям.
    #[error("validation failed: {message}")]
    Validation {
        /// Общее сообщение сервера.
        message: String,
        /// Имя поля -> сообщение об ошибке.
        fields: BTreeMap<String, String>,
    },

    /// Некорректный запрос или иная ошибка сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `board-client`.
pub type BoardClientResult<T> = Result<T, BoardClientError>;

impl BoardClientError {
    pub(crate) fn from_http_status(
        status: reqwest::StatusCode,
        message: Option<String>,
        fields: BTreeMap<String, String>,
    ) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            reqwest::StatusCode::BAD_REQUEST if !fields.is_empty() => {
                Self::Validation { message, fields }
            }
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None, BTreeMap::new());
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::BoardClientError;

    #[test]
    fn not_found_keeps_server_message() {
        let err = BoardClientError::from_http_status(
            reqwest::StatusCode::NOT_FOUND,
            Some("Post does not exist".to_string()),
            BTreeMap::new(),
        );
        assert!(matches!(err, BoardClientError::NotFound(ref m) if m == "Post does not exist"));
    }

    #[test]
    fn bad_request_with_fields_is_validation() {
        let fields = BTreeMap::from([("title".to_string(), "Please enter a title".to_string())]);
        let err = BoardClientError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            Some("Invalid request".to_string()),
            fields,
        );
        match err {
            BoardClientError::Validation { message, fields } => {
                assert_eq!(message, "Invalid request");
                assert_eq!(fields["title"], "Please enter a title");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn bad_request_without_fields_is_invalid_request() {
        let err = BoardClientError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            None,
            BTreeMap::new(),
        );
        assert!(matches!(err, BoardClientError::InvalidRequest(_)));
    }
}
