use crate::application::catalog::CatalogError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError(CatalogError::InvalidInput(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError(CatalogError::Unauthorized(message.into()))
    }

    /// ステータスコードとエラー種別
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self.0 {
            CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            CatalogError::AlreadyExists(_) => (StatusCode::CONFLICT, "Conflict"),
            CatalogError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            CatalogError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            CatalogError::RepositoryError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status();

        let message = match self.0 {
            CatalogError::NotFound(msg)
            | CatalogError::AlreadyExists(msg)
            | CatalogError::InvalidInput(msg)
            | CatalogError::Unauthorized(msg) => msg,

            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            CatalogError::RepositoryError(e) => {
                tracing::error!("Repository error: {}", e);
                "An unexpected error occurred".to_string()
            }
        };

        let body = Json(ErrorResponse::new(status.as_u16(), error, message));
        let mut response = (status, body).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"bookstore\""),
            );
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response =
            ApiError(CatalogError::NotFound("Book not found".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_of(response).await;
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "Book not found");
    }

    #[tokio::test]
    async fn test_already_exists_maps_to_409() {
        let response = ApiError(CatalogError::AlreadyExists(
            "Entity already exists".to_string(),
        ))
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_of(response).await;
        assert_eq!(body.error, "Conflict");
        assert_eq!(body.message, "Entity already exists");
    }

    #[tokio::test]
    async fn test_invalid_input_maps_to_400() {
        let response = ApiError::invalid_input("Invalid input provided").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "Invalid input provided");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_401_with_challenge() {
        let response = ApiError::unauthorized("Unauthorized access").into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(WWW_AUTHENTICATE));
        let body = body_of(response).await;
        assert_eq!(body.error, "Unauthorized");
        assert_eq!(body.message, "Unauthorized access");
    }

    #[tokio::test]
    async fn test_repository_error_hides_details() {
        let source = std::io::Error::other("Some unexpected error");
        let response = ApiError(CatalogError::RepositoryError(Box::new(source))).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body.status, 500);
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, "An unexpected error occurred");
    }
}
