//! 应用层错误定义
//!
//! 合成全链路的失败在 Orchestrator 边界统一收敛为 SynthesisError，
//! 任何失败路径都不会使进程退出

use thiserror::Error;

use crate::application::ports::WorkerError;
use crate::domain::synthesis::ValidationError;

/// 合成失败
///
/// 携带失败原因与从进入编排到失败的耗时
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct SynthesisError {
    pub kind: SynthesisErrorKind,
    /// 失败路径同样记录耗时，供观测使用
    pub elapsed_ms: u64,
}

impl SynthesisError {
    pub fn new(kind: impl Into<SynthesisErrorKind>, elapsed_ms: u64) -> Self {
        Self {
            kind: kind.into(),
            elapsed_ms,
        }
    }
}

/// 合成失败原因
#[derive(Debug, Error)]
pub enum SynthesisErrorKind {
    /// 请求字段校验失败，发生在任何进程启动之前
    #[error("Validation error: {0}")]
    Validation(String),

    /// 模式需要参考音频但未上传，同样是前置检查
    #[error("Mode requires a prompt audio clip but none was supplied")]
    MissingPromptAudio,

    /// worker 进程无法启动
    #[error("Failed to launch synthesis worker: {0}")]
    WorkerLaunch(String),

    /// worker 非零退出
    #[error("Synthesis worker exited with code {exit_code}: {stderr}")]
    WorkerExecution { exit_code: i32, stderr: String },

    /// worker 输出不符合结果协议
    #[error("Synthesis worker returned malformed output: {raw_output}")]
    WorkerProtocol { raw_output: String },

    /// worker 正常退出但自报失败
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// worker 自报成功但输出文件无法 stat
    #[error("Worker reported success but output file is unreadable: {path}")]
    ArtifactFileMissing { path: String },

    #[error("IO error: {0}")]
    Io(String),
}

impl From<ValidationError> for SynthesisErrorKind {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<WorkerError> for SynthesisErrorKind {
    fn from(err: WorkerError) -> Self {
        match err {
            WorkerError::LaunchFailed(msg) => Self::WorkerLaunch(msg),
            WorkerError::ExecutionFailed { exit_code, stderr } => {
                Self::WorkerExecution { exit_code, stderr }
            }
            WorkerError::ProtocolViolation { raw_output } => Self::WorkerProtocol { raw_output },
        }
    }
}

impl SynthesisErrorKind {
    /// 是否为调用方请求问题（而非服务端/worker 故障）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::MissingPromptAudio | Self::SynthesisFailed(_)
        )
    }
}
