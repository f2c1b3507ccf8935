use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};

/// Header carrying the anti-forgery token on state-mutating requests
const CSRF_HEADER: &str = "X-CSRFToken";

/// Fallback when a failed upload carries no usable server message
const GENERIC_UPLOAD_ERROR: &str = "Upload failed. Please try again.";

/// One document as served by `GET /documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub id: i64,
    pub filename: String,
    pub filesize: u64,
    pub created_at: DateTime<Utc>,
}

/// The fields of the upload response the client consumes
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    pub id: i64,
    pub filename: String,
}

/// Error body the service attaches to rejected requests
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: String,
}

/// The four operations of the document service contract.
///
/// Kept behind a trait so the controller can be exercised against an
/// in-memory implementation.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<DocumentMetadata>>;

    async fn upload_document(&self, data: Vec<u8>, filename: &str) -> Result<UploadReceipt>;

    async fn download_document(&self, id: i64) -> Result<Vec<u8>>;

    async fn delete_document(&self, id: i64) -> Result<()>;
}

/// HTTP client for the document service
pub struct DocumentServiceClient {
    http_client: reqwest::Client,
    base_url: String,
    csrf_token: String,
}

impl DocumentServiceClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .user_agent("HealthDocsPortal/1.0")
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_token: config.csrf_token.clone(),
        }
    }
}

#[async_trait]
impl DocumentApi for DocumentServiceClient {
    async fn list_documents(&self) -> Result<Vec<DocumentMetadata>> {
        let url = format!("{}/documents", self.base_url);

        tracing::debug!("Fetching document list: {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch documents: {}", e);
            AppError::Transport(format!("Failed to fetch documents: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Document service error on list: HTTP {}", status);
            return Err(AppError::Transport(format!(
                "Document service error: HTTP {}",
                status
            )));
        }

        let documents = response
            .json::<Vec<DocumentMetadata>>()
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse document list: {}", e);
                AppError::UnexpectedResponse(format!("Failed to parse document list: {}", e))
            })?;

        Ok(documents)
    }

    async fn upload_document(&self, data: Vec<u8>, filename: &str) -> Result<UploadReceipt> {
        let url = format!("{}/documents/upload", self.base_url);

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(|e| AppError::Transport(format!("Invalid upload part: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        tracing::debug!("Uploading \"{}\" to {}", filename, url);

        let response = self
            .http_client
            .post(&url)
            .header(CSRF_HEADER, &self.csrf_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Upload request failed: {}", e);
                AppError::Transport(format!("Upload request failed: {}", e))
            })?;

        let status = response.status();

        if status.is_success() {
            let receipt = response.json::<UploadReceipt>().await.map_err(|e| {
                tracing::error!("Failed to parse upload response: {}", e);
                AppError::UnexpectedResponse(format!("Failed to parse upload response: {}", e))
            })?;

            tracing::info!(
                "Uploaded document: id={}, filename={}",
                receipt.id,
                receipt.filename
            );
            return Ok(receipt);
        }

        // Surface the server-supplied message when the body carries one
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .map(|parsed| parsed.error)
            .filter(|error| !error.is_empty())
            .unwrap_or_else(|| GENERIC_UPLOAD_ERROR.to_string());

        tracing::error!("Upload rejected: HTTP {} - {}", status, body);
        Err(AppError::Upload(message))
    }

    async fn download_document(&self, id: i64) -> Result<Vec<u8>> {
        let url = format!("{}/documents/{}", self.base_url, id);

        tracing::debug!("Downloading document {}: {}", id, url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Download request failed: {}", e);
            AppError::Download(format!("Download request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Document service error on download: HTTP {}", status);
            return Err(AppError::Download(format!("HTTP {}", status)));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read download body: {}", e);
            AppError::Download(format!("Failed to read download body: {}", e))
        })?;

        Ok(bytes.to_vec())
    }

    async fn delete_document(&self, id: i64) -> Result<()> {
        let url = format!("{}/documents/{}", self.base_url, id);

        tracing::debug!("Deleting document {}: {}", id, url);

        let response = self
            .http_client
            .delete(&url)
            .header(CSRF_HEADER, &self.csrf_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Delete request failed: {}", e);
                AppError::Delete(format!("Delete request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Document service error on delete: HTTP {}", status);
            return Err(AppError::Delete(format!("HTTP {}", status)));
        }

        tracing::info!("Deleted document: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default, Clone)]
    struct RecordedUpload {
        csrf_token: Option<String>,
        field_name: Option<String>,
        file_name: Option<String>,
        data: Vec<u8>,
    }

    #[derive(Default)]
    struct StubState {
        upload: Mutex<Option<RecordedUpload>>,
        delete_csrf: Mutex<Option<String>>,
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> DocumentServiceClient {
        DocumentServiceClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            csrf_token: "test-token".to_string(),
        })
    }

    #[tokio::test]
    async fn test_list_documents_parses_wire_format() {
        let router = Router::new().route(
            "/documents",
            get(|| async {
                Json(json!([
                    {
                        "id": 7,
                        "filename": "lab-results.pdf",
                        "filesize": 2048,
                        "created_at": "2024-01-15T10:30:00Z"
                    }
                ]))
            }),
        );
        let base_url = serve(router).await;

        let documents = client_for(&base_url).list_documents().await.unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, 7);
        assert_eq!(documents[0].filename, "lab-results.pdf");
        assert_eq!(documents[0].filesize, 2048);
    }

    #[tokio::test]
    async fn test_list_documents_maps_non_2xx_to_transport_error() {
        let router = Router::new().route(
            "/documents",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base_url = serve(router).await;

        let result = client_for(&base_url).list_documents().await;

        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_and_csrf_header() {
        let state = Arc::new(StubState::default());
        let router = Router::new()
            .route(
                "/documents/upload",
                post(
                    |State(state): State<Arc<StubState>>,
                     headers: HeaderMap,
                     mut multipart: Multipart| async move {
                        let mut recorded = RecordedUpload {
                            csrf_token: headers
                                .get("X-CSRFToken")
                                .and_then(|value| value.to_str().ok())
                                .map(String::from),
                            ..Default::default()
                        };
                        if let Some(field) = multipart.next_field().await.unwrap() {
                            recorded.field_name = field.name().map(String::from);
                            recorded.file_name = field.file_name().map(String::from);
                            recorded.data = field.bytes().await.unwrap().to_vec();
                        }
                        *state.upload.lock().unwrap() = Some(recorded);

                        Json(json!({"id": 3, "filename": "scan.pdf"}))
                    },
                ),
            )
            .with_state(Arc::clone(&state));
        let base_url = serve(router).await;

        let receipt = client_for(&base_url)
            .upload_document(b"%PDF-1.4 fake".to_vec(), "scan.pdf")
            .await
            .unwrap();

        assert_eq!(receipt.id, 3);
        assert_eq!(receipt.filename, "scan.pdf");

        let recorded = state.upload.lock().unwrap().clone().unwrap();
        assert_eq!(recorded.csrf_token.as_deref(), Some("test-token"));
        assert_eq!(recorded.field_name.as_deref(), Some("file"));
        assert_eq!(recorded.file_name.as_deref(), Some("scan.pdf"));
        assert_eq!(recorded.data, b"%PDF-1.4 fake");
    }

    #[tokio::test]
    async fn test_upload_surfaces_server_error_message() {
        let router = Router::new().route(
            "/documents/upload",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"error": "disk full"}))) }),
        );
        let base_url = serve(router).await;

        let result = client_for(&base_url)
            .upload_document(b"data".to_vec(), "scan.pdf")
            .await;

        match result {
            Err(AppError::Upload(message)) => assert_eq!(message, "disk full"),
            other => panic!("expected upload error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_falls_back_to_generic_message() {
        let router = Router::new().route(
            "/documents/upload",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base_url = serve(router).await;

        let result = client_for(&base_url)
            .upload_document(b"data".to_vec(), "scan.pdf")
            .await;

        match result {
            Err(AppError::Upload(message)) => {
                assert_eq!(message, "Upload failed. Please try again.")
            }
            other => panic!("expected upload error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_download_returns_body_bytes() {
        let router = Router::new().route(
            "/documents/{id}",
            get(|Path(id): Path<i64>| async move {
                assert_eq!(id, 9);
                b"binary pdf body".to_vec()
            }),
        );
        let base_url = serve(router).await;

        let bytes = client_for(&base_url).download_document(9).await.unwrap();

        assert_eq!(bytes, b"binary pdf body");
    }

    #[tokio::test]
    async fn test_download_maps_non_2xx_to_download_error() {
        let router = Router::new().route(
            "/documents/{id}",
            get(|_: Path<i64>| async { StatusCode::NOT_FOUND }),
        );
        let base_url = serve(router).await;

        let result = client_for(&base_url).download_document(1).await;

        assert!(matches!(result, Err(AppError::Download(_))));
    }

    #[tokio::test]
    async fn test_delete_sends_csrf_header() {
        let state = Arc::new(StubState::default());
        let router = Router::new()
            .route(
                "/documents/{id}",
                delete(
                    |State(state): State<Arc<StubState>>,
                     _: Path<i64>,
                     headers: HeaderMap| async move {
                        *state.delete_csrf.lock().unwrap() = headers
                            .get("X-CSRFToken")
                            .and_then(|value| value.to_str().ok())
                            .map(String::from);
                        StatusCode::NO_CONTENT
                    },
                ),
            )
            .with_state(Arc::clone(&state));
        let base_url = serve(router).await;

        client_for(&base_url).delete_document(4).await.unwrap();

        assert_eq!(
            state.delete_csrf.lock().unwrap().as_deref(),
            Some("test-token")
        );
    }

    #[tokio::test]
    async fn test_delete_maps_non_2xx_to_delete_error() {
        let router = Router::new().route(
            "/documents/{id}",
            delete(|_: Path<i64>| async { StatusCode::FORBIDDEN }),
        );
        let base_url = serve(router).await;

        let result = client_for(&base_url).delete_document(4).await;

        assert!(matches!(result, Err(AppError::Delete(_))));
    }
}
