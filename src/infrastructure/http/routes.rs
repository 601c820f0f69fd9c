//! HTTP Routes
//!
//! API Endpoints:
//! - /health                      GET     健康检查
//! - /api/tts/synthesize         POST    合成语音（multipart，可选 promptAudio 文件）
//! - /api/audio                  GET     产物列表（created_at 降序）
//! - /api/audio                  DELETE  清空全部产物
//! - /api/audio/:id              GET     产物元数据
//! - /api/audio/:id              DELETE  删除产物（blob + 元数据）
//! - /api/audio/:id/download     GET     下载音频
//! - /api/audio/:id/stream       GET     播放音频

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tts/synthesize", post(handlers::synthesize))
        .nest("/audio", audio_routes())
}

/// Audio 路由
fn audio_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_audio).delete(handlers::clear_audio),
        )
        .route(
            "/:id",
            get(handlers::get_audio).delete(handlers::delete_audio),
        )
        .route("/:id/download", get(handlers::download_audio))
        .route("/:id/stream", get(handlers::stream_audio))
}
