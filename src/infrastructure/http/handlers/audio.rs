//! Audio Handlers
//!
//! 产物列表、元数据查询、下载/播放、删除与清空

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::domain::synthesis::AudioArtifact;
use crate::infrastructure::http::dto::{AudioFileResponse, ClearResponse, DeleteResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 产物列表，created_at 降序
pub async fn list_audio(State(state): State<Arc<AppState>>) -> Json<Vec<AudioFileResponse>> {
    let artifacts = state.artifacts.list();
    Json(artifacts.into_iter().map(Into::into).collect())
}

/// 单个产物元数据
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AudioFileResponse>, ApiError> {
    let artifact = find_artifact(&state, &id)?;
    Ok(Json(artifact.into()))
}

/// 下载产物（attachment）
pub async fn download_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let artifact = find_artifact(&state, &id)?;

    // 悬挂元数据（blob 已丢失）按 not found 处理，不视为服务端错误
    let data = state
        .artifacts
        .read_blob(&artifact.filename)
        .await
        .map_err(|_| ApiError::NotFound("Audio file data not found".to_string()))?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.format.content_type())
        .header(header::CONTENT_LENGTH, data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        )
        .body(Body::from(data))
        .unwrap())
}

/// 播放产物（整段返回，流式读盘）
pub async fn stream_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let artifact = find_artifact(&state, &id)?;

    let file = tokio::fs::File::open(&artifact.file_path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ApiError::NotFound("Audio file data not found".to_string())
            }
            _ => ApiError::Internal(format!("Failed to open audio file: {}", e)),
        })?;

    let metadata = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to get file metadata: {}", e)))?;

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.format.content_type())
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .unwrap())
}

/// 删除产物（blob + 元数据两步）
pub async fn delete_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    find_artifact(&state, &id)?;

    if state.artifacts.delete(&id).await {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(ApiError::Internal("Failed to delete audio file".to_string()))
    }
}

/// 清空全部产物
pub async fn clear_audio(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    let deleted_count = state.artifacts.clear().await;
    Json(ClearResponse {
        success: true,
        deleted_count,
    })
}

fn find_artifact(state: &AppState, id: &str) -> Result<AudioArtifact, ApiError> {
    state
        .artifacts
        .get(id)
        .ok_or_else(|| ApiError::NotFound("Audio file not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Request as HttpRequest};
    use axum::Router;
    use chrono::Utc;
    use tower::util::ServiceExt;

    use crate::application::ports::{ArtifactStorePort, BlobRepositoryPort};
    use crate::application::{ArtifactService, SynthesisOrchestrator};
    use crate::domain::synthesis::{NewAudioArtifact, OutputFormat, SynthesisParameters};
    use crate::infrastructure::http::routes::create_routes;
    use crate::infrastructure::memory::InMemoryArtifactStore;
    use crate::infrastructure::storage::FileBlobRepository;
    use crate::infrastructure::worker::FakeWorkerEngine;

    struct TestApp {
        app: Router,
        store: Arc<InMemoryArtifactStore>,
        blobs: Arc<FileBlobRepository>,
    }

    async fn test_app(dir: &std::path::Path) -> TestApp {
        let blobs = Arc::new(FileBlobRepository::new(dir).await.unwrap());
        let store = Arc::new(InMemoryArtifactStore::new());
        let worker = Arc::new(FakeWorkerEngine::with_defaults());
        let state = Arc::new(AppState::new(
            SynthesisOrchestrator::new(worker, blobs.clone()),
            ArtifactService::new(store.clone(), blobs.clone()),
            10 * 1024 * 1024,
            "/models/tts",
        ));
        TestApp {
            app: create_routes().with_state(state),
            store,
            blobs,
        }
    }

    /// 写入 blob 并注册元数据，模拟一次成功合成的落盘结果
    async fn seed_artifact(test: &TestApp, filename: &str, data: &[u8]) -> AudioArtifact {
        let path = test.blobs.write(filename, data).await.unwrap();
        test.store.create(NewAudioArtifact {
            title: "hello".to_string(),
            text: "hello".to_string(),
            model_path: "/models/tts".to_string(),
            parameters: SynthesisParameters {
                speed: 1.0,
                stream: false,
                seed: 0,
            },
            filename: filename.to_string(),
            format: OutputFormat::Wav,
            duration: 2.5,
            created_at: Utc::now(),
            file_size: data.len() as u64,
            file_path: path,
        })
    }

    fn get(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let test = test_app(dir.path()).await;

        let response = test.app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let dir = tempfile::tempdir().unwrap();
        let test = test_app(dir.path()).await;

        let response = test.app.oneshot(get("/api/audio")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_get_unknown_artifact_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let test = test_app(dir.path()).await;

        let response = test.app.oneshot(get("/api/audio/missing")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_and_download_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let test = test_app(dir.path()).await;
        let artifact = seed_artifact(&test, "audio_1_abc.wav", b"RIFFdata").await;

        let response = test
            .app
            .clone()
            .oneshot(get(&format!("/api/audio/{}", artifact.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["filename"], "audio_1_abc.wav");
        assert_eq!(json["fileSize"], 8);
        assert_eq!(json["format"], "wav");

        let response = test
            .app
            .oneshot(get(&format!("/api/audio/{}/download", artifact.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/wav"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"RIFFdata");
    }

    #[tokio::test]
    async fn test_stream_artifact_sets_playback_headers() {
        let dir = tempfile::tempdir().unwrap();
        let test = test_app(dir.path()).await;
        let artifact = seed_artifact(&test, "audio_2_def.wav", b"RIFFdata").await;

        let response = test
            .app
            .oneshot(get(&format!("/api/audio/{}/stream", artifact.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCEPT_RANGES).unwrap(),
            "bytes"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-cache"
        );
    }

    #[tokio::test]
    async fn test_stream_dangling_entry_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let test = test_app(dir.path()).await;
        let artifact = seed_artifact(&test, "audio_3_ghi.wav", b"RIFFdata").await;

        // blob 在元数据之外被移除，形成悬挂条目
        assert!(test.blobs.delete("audio_3_ghi.wav").await);

        let response = test
            .app
            .oneshot(get(&format!("/api/audio/{}/stream", artifact.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_artifact_twice() {
        let dir = tempfile::tempdir().unwrap();
        let test = test_app(dir.path()).await;
        let artifact = seed_artifact(&test, "audio_4_jkl.wav", b"RIFFdata").await;

        let response = test
            .app
            .clone()
            .oneshot(delete(&format!("/api/audio/{}", artifact.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);

        // 第二次删除：条目已不存在
        let response = test
            .app
            .oneshot(delete(&format!("/api/audio/{}", artifact.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_reports_deleted_count() {
        let dir = tempfile::tempdir().unwrap();
        let test = test_app(dir.path()).await;
        seed_artifact(&test, "audio_5_mno.wav", b"a").await;
        seed_artifact(&test, "audio_6_pqr.wav", b"b").await;

        let response = test.app.oneshot(delete("/api/audio")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["deletedCount"], 2);
    }
}
