//! Vocalis - 语音合成服务
//!
//! 启动流程: 配置加载 → 日志初始化 → 适配器装配（显式依赖注入）→
//! HTTP 服务器（带优雅关闭）

use std::sync::Arc;

use vocalis::application::{ArtifactService, SynthesisOrchestrator};
use vocalis::config::{load_config, print_config};
use vocalis::infrastructure::http::{AppState, HttpServer, ServerConfig};
use vocalis::infrastructure::worker::{ProcessWorkerConfig, ProcessWorkerEngine};
// use vocalis::infrastructure::worker::FakeWorkerEngine;
use vocalis::infrastructure::{FileBlobRepository, InMemoryArtifactStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},vocalis={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Vocalis - 语音合成服务");
    print_config(&config);

    // 托管目录幂等创建
    let blobs = Arc::new(
        FileBlobRepository::new(&config.storage.audio_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to init blob repository: {}", e))?,
    );

    // 内存产物注册表，生命周期 = 进程生命周期
    let store = Arc::new(InMemoryArtifactStore::new());

    // 子进程推理引擎
    let worker = Arc::new(ProcessWorkerEngine::new(ProcessWorkerConfig {
        program: config.worker.program.clone(),
        script_path: config.worker.script_path.clone(),
    }));

    // // 本地开发无 Python 运行时时可改用 Fake 引擎
    // let worker = Arc::new(FakeWorkerEngine::with_defaults());

    let orchestrator = SynthesisOrchestrator::new(worker, blobs.clone());
    let artifacts = ArtifactService::new(store, blobs);

    let state = AppState::new(
        orchestrator,
        artifacts,
        config.storage.max_upload_size,
        config.worker.default_model_dir.clone(),
    );

    // HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    // 请求体上限 = 上传上限 + multipart 文本字段余量
    server_config.body_limit = config.storage.max_upload_size as usize + 1024 * 1024;
    if config.server.static_files.enabled {
        server_config.static_dir = Some(config.server.static_files.dir.clone());
    }

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
