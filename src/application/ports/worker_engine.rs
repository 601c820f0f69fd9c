//! Worker Engine Port - 推理 worker 抽象
//!
//! 定义外部合成进程的调用协议：一次请求对应一次调用，
//! 参数打包为单个 JSON 实参，结果从标准输出读取。
//! 具体实现在 infrastructure/worker 层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Worker 调用错误
#[derive(Debug, Error)]
pub enum WorkerError {
    /// 进程无法启动（程序缺失、权限不足等）
    #[error("Failed to launch worker process: {0}")]
    LaunchFailed(String),

    /// 进程以非零状态退出
    #[error("Worker exited with code {exit_code}: {stderr}")]
    ExecutionFailed { exit_code: i32, stderr: String },

    /// 退出码为 0 但标准输出无法解析为结果结构
    #[error("Worker produced unparseable output: {raw_output}")]
    ProtocolViolation { raw_output: String },
}

/// Worker 调用参数
///
/// 字段名为 worker 侧约定的 camelCase wire 格式，序列化后
/// 作为唯一命令行实参传入
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerInvocation {
    pub text: String,
    pub mode: String,
    pub spk_id: String,
    pub prompt_text: String,
    /// 参考音频临时文件的绝对路径，无参考音频时为 null
    pub prompt_audio_path: Option<String>,
    pub instruct_text: String,
    /// worker 写出音频的目标路径
    pub output_path: String,
    pub output_format: String,
    pub speed: f32,
    pub stream: bool,
    pub seed: i64,
    pub model_dir: String,
}

/// Worker 结果
///
/// 从标准输出解析；success 为必需字段，其余可选
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerResult {
    pub success: bool,
    /// 音频时长（秒）
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Worker Engine Port
///
/// 一次调用 = 一次合成请求；协议层不做重试
#[async_trait]
pub trait WorkerEnginePort: Send + Sync {
    /// 调用 worker 并等待其退出，将结果映射为结构化响应
    ///
    /// 副作用：worker 应当已将音频写入 invocation.output_path，
    /// 协议层不验证，由调用方 stat 确认
    async fn invoke(&self, invocation: &WorkerInvocation) -> Result<WorkerResult, WorkerError>;
}
