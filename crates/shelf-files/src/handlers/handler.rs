//! HTTP handlers for file listing and download

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::error;
use utoipa::OpenApi;

use super::types::*;

/// OpenAPI documentation for the files API
#[derive(OpenApi)]
#[openapi(
    paths(list_files, download_file),
    components(schemas(ListFilesResponse, ListFilesErrorResponse)),
    tags(
        (name = "Files", description = "File browsing and download operations")
    )
)]
pub struct FilesApiDoc;

/// Configure file routes
pub fn configure_routes() -> Router<Arc<FilesAppState>> {
    Router::new()
        .route("/list", get(list_files))
        .route("/download", get(download_file))
}

/// List all files in the bucket
#[utoipa::path(
    tag = "Files",
    get,
    path = "/list",
    responses(
        (status = 200, description = "All objects with display metadata; on enumeration failure the same status carries an error body instead", body = ListFilesResponse),
    )
)]
async fn list_files(State(state): State<Arc<FilesAppState>>) -> Response {
    match state.file_service.list().await {
        Ok(files) => Json(ListFilesResponse { files }).into_response(),
        Err(e) => {
            error!("Error fetching files: {}", e);
            // The dashboard client keys off the body shape, not the status;
            // failures on this path keep the 200.
            Json(ListFilesErrorResponse {
                error: "Failed to fetch files.".to_string(),
            })
            .into_response()
        }
    }
}

/// Download a single file as an attachment
#[utoipa::path(
    tag = "Files",
    get,
    path = "/download",
    params(
        ("file" = Option<String>, Query, description = "Name of the object to download"),
    ),
    responses(
        (status = 200, description = "Object content", content_type = "application/octet-stream"),
        (status = 400, description = "Missing file parameter"),
        (status = 500, description = "Download failed")
    )
)]
async fn download_file(
    State(state): State<Arc<FilesAppState>>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    // An empty value counts as missing
    let Some(name) = query.file.filter(|name| !name.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing file parameter").into_response();
    };

    match state.file_service.download(&name).await {
        Ok(download) => {
            let mut headers = vec![
                (header::CONTENT_TYPE, download.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", name),
                ),
            ];

            if let Some(length) = download.content_length {
                headers.push((header::CONTENT_LENGTH, length.to_string()));
            }

            (
                StatusCode::OK,
                AppendHeaders(headers),
                Body::from_stream(download.body),
            )
                .into_response()
        }
        Err(e) => {
            error!("Download error for {}: {}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error downloading file").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilesError;
    use crate::services::{
        FileService, ObjectDownload, ObjectPage, ObjectStore, ObjectSummary,
    };
    use async_trait::async_trait;
    use axum::http::Request;
    use bytes::Bytes;
    use futures::StreamExt;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// In-memory store with a fixed object set
    struct TestStore {
        objects: Vec<(&'static str, &'static [u8], Option<&'static str>)>,
        fail: bool,
    }

    #[async_trait]
    impl ObjectStore for TestStore {
        async fn list_page(&self, _token: Option<String>) -> Result<ObjectPage, FilesError> {
            if self.fail {
                return Err(FilesError::Store("connection refused".to_string()));
            }

            Ok(ObjectPage {
                objects: self
                    .objects
                    .iter()
                    .map(|(key, content, _)| ObjectSummary {
                        key: key.to_string(),
                        last_modified: None,
                        size: Some(content.len() as i64),
                    })
                    .collect(),
                next_token: None,
            })
        }

        async fn open(&self, key: &str) -> Result<ObjectDownload, FilesError> {
            if self.fail {
                return Err(FilesError::Store("connection refused".to_string()));
            }

            let &(_, content, content_type) = self
                .objects
                .iter()
                .find(|(k, _, _)| *k == key)
                .ok_or_else(|| FilesError::NotFound(key.to_string()))?;

            Ok(ObjectDownload {
                content_type: content_type.map(|s| s.to_string()),
                content_length: Some(content.len() as i64),
                body: futures::stream::iter(vec![Ok(Bytes::from_static(content))]).boxed(),
            })
        }
    }

    fn app(store: TestStore) -> Router {
        let state = Arc::new(FilesAppState {
            file_service: Arc::new(FileService::new(Arc::new(store))),
        });
        configure_routes().with_state(state)
    }

    fn populated_app() -> Router {
        app(TestStore {
            objects: vec![
                ("hello.txt", b"hello world", Some("text/plain")),
                ("photo.png", b"\x89PNG", None),
            ],
            fail: false,
        })
    }

    fn failing_app() -> Router {
        app(TestStore {
            objects: vec![],
            fail: true,
        })
    }

    #[tokio::test]
    async fn test_list_returns_files() -> Result<(), Box<dyn std::error::Error>> {
        let response = populated_app()
            .oneshot(Request::builder().uri("/list").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await?.to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(
            json,
            serde_json::json!({
                "files": [
                    { "name": "hello.txt", "createdOn": null, "size": "11.00 B", "type": "TEXT" },
                    { "name": "photo.png", "createdOn": null, "size": "4.00 B", "type": "IMAGE" },
                ]
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_list_empty_bucket_is_success() -> Result<(), Box<dyn std::error::Error>> {
        let response = app(TestStore {
            objects: vec![],
            fail: false,
        })
        .oneshot(Request::builder().uri("/list").body(Body::empty())?)
        .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await?.to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(json, serde_json::json!({ "files": [] }));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_failure_keeps_200_with_error_body() -> Result<(), Box<dyn std::error::Error>>
    {
        let response = failing_app()
            .oneshot(Request::builder().uri("/list").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await?.to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(json, serde_json::json!({ "error": "Failed to fetch files." }));

        Ok(())
    }

    #[tokio::test]
    async fn test_download_missing_param_is_400() -> Result<(), Box<dyn std::error::Error>> {
        // Store reachability must not matter for parameter validation
        for app in [populated_app(), failing_app()] {
            let response = app
                .oneshot(Request::builder().uri("/download").body(Body::empty())?)
                .await?;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = response.into_body().collect().await?.to_bytes();
            assert_eq!(&body[..], b"Missing file parameter");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_download_empty_param_is_400() -> Result<(), Box<dyn std::error::Error>> {
        let response = populated_app()
            .oneshot(
                Request::builder()
                    .uri("/download?file=")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    async fn test_download_streams_with_headers() -> Result<(), Box<dyn std::error::Error>> {
        let response = populated_app()
            .oneshot(
                Request::builder()
                    .uri("/download?file=hello.txt")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_LENGTH).unwrap(),
            "11"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"hello.txt\""
        );

        let body = response.into_body().collect().await?.to_bytes();
        assert_eq!(&body[..], b"hello world");

        Ok(())
    }

    #[tokio::test]
    async fn test_download_defaults_content_type() -> Result<(), Box<dyn std::error::Error>> {
        let response = populated_app()
            .oneshot(
                Request::builder()
                    .uri("/download?file=photo.png")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_download_disposition_keeps_literal_name(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let response = app(TestStore {
            objects: vec![("my report (final).pdf", b"%PDF", Some("application/pdf"))],
            fail: false,
        })
        .oneshot(
            Request::builder()
                .uri("/download?file=my%20report%20(final).pdf")
                .body(Body::empty())?,
        )
        .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"my report (final).pdf\""
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_download_store_failure_is_500() -> Result<(), Box<dyn std::error::Error>> {
        let response = failing_app()
            .oneshot(
                Request::builder()
                    .uri("/download?file=hello.txt")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await?.to_bytes();
        assert_eq!(&body[..], b"Error downloading file");

        Ok(())
    }

    #[tokio::test]
    async fn test_download_missing_object_is_500() -> Result<(), Box<dyn std::error::Error>> {
        let response = populated_app()
            .oneshot(
                Request::builder()
                    .uri("/download?file=absent.txt")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        Ok(())
    }
}
