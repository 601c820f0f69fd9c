//! Fake Worker Engine - 用于测试的推理 worker
//!
//! 不启动任何进程，向目标路径写入占位音频并自报成功

use async_trait::async_trait;

use crate::application::ports::{WorkerEnginePort, WorkerError, WorkerInvocation, WorkerResult};

/// Fake Worker 配置
#[derive(Debug, Clone)]
pub struct FakeWorkerConfig {
    /// 固定上报的音频时长（秒）
    pub duration_secs: f64,
    /// 写出的占位音频字节数
    pub file_size: usize,
    /// 模拟推理延迟（毫秒）
    pub latency_ms: u64,
}

impl Default for FakeWorkerConfig {
    fn default() -> Self {
        Self {
            duration_secs: 2.5,
            file_size: 1024,
            latency_ms: 200,
        }
    }
}

/// Fake Worker Engine
///
/// 本地开发无 Python 运行时时替代 ProcessWorkerEngine
pub struct FakeWorkerEngine {
    config: FakeWorkerConfig,
}

impl FakeWorkerEngine {
    pub fn new(config: FakeWorkerConfig) -> Self {
        tracing::info!(
            duration_secs = config.duration_secs,
            file_size = config.file_size,
            "FakeWorkerEngine initialized"
        );
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeWorkerConfig::default())
    }
}

#[async_trait]
impl WorkerEnginePort for FakeWorkerEngine {
    async fn invoke(&self, invocation: &WorkerInvocation) -> Result<WorkerResult, WorkerError> {
        tracing::debug!(
            text_len = invocation.text.len(),
            mode = %invocation.mode,
            "FakeWorkerEngine: writing placeholder audio"
        );

        // 模拟推理延迟
        tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;

        tokio::fs::write(&invocation.output_path, vec![0u8; self.config.file_size])
            .await
            .map_err(|e| WorkerError::ExecutionFailed {
                exit_code: -1,
                stderr: format!("Failed to write placeholder audio: {}", e),
            })?;

        Ok(WorkerResult {
            success: true,
            duration: Some(self.config.duration_secs),
            error: None,
            sample_rate: Some(22050),
            note: Some("placeholder audio".to_string()),
        })
    }
}
