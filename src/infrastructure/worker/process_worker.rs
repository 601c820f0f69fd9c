//! Process Worker Engine - 子进程推理实现
//!
//! 每次调用 spawn 一个 worker 进程：参数 JSON 作为唯一实参传入，
//! 完整捕获 stdout/stderr，等待退出后按协议映射结果。
//! 不重试、不设超时；挂起的 worker 会阻塞对应请求

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

use crate::application::ports::{WorkerEnginePort, WorkerError, WorkerInvocation, WorkerResult};

/// Process Worker 配置
#[derive(Debug, Clone)]
pub struct ProcessWorkerConfig {
    /// 解释器或可执行程序（如 python3）
    pub program: String,
    /// worker 脚本路径
    pub script_path: PathBuf,
}

impl Default for ProcessWorkerConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            script_path: PathBuf::from("scripts/synthesis_worker.py"),
        }
    }
}

/// 子进程 worker 引擎
pub struct ProcessWorkerEngine {
    config: ProcessWorkerConfig,
}

impl ProcessWorkerEngine {
    pub fn new(config: ProcessWorkerConfig) -> Self {
        tracing::info!(
            program = %config.program,
            script = %config.script_path.display(),
            "ProcessWorkerEngine initialized"
        );
        Self { config }
    }
}

#[async_trait]
impl WorkerEnginePort for ProcessWorkerEngine {
    async fn invoke(&self, invocation: &WorkerInvocation) -> Result<WorkerResult, WorkerError> {
        let payload = serde_json::to_string(invocation).map_err(|e| {
            WorkerError::LaunchFailed(format!("Failed to encode invocation: {}", e))
        })?;

        tracing::debug!(
            mode = %invocation.mode,
            output_path = %invocation.output_path,
            "Spawning synthesis worker"
        );

        let output = Command::new(&self.config.program)
            .arg(&self.config.script_path)
            .arg(&payload)
            .output()
            .await
            .map_err(|e| WorkerError::LaunchFailed(e.to_string()))?;

        if !output.status.success() {
            // 被信号终止时没有退出码，映射为 -1
            let exit_code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::warn!(exit_code = exit_code, "Worker exited abnormally");
            return Err(WorkerError::ExecutionFailed { exit_code, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let trimmed = stdout.trim();
        serde_json::from_str::<WorkerResult>(trimmed).map_err(|_| {
            WorkerError::ProtocolViolation {
                raw_output: trimmed.to_string(),
            }
        })
    }
}
