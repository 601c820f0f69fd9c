//! Application State
//!
//! 进程启动时显式装配一次，经 Arc 注入所有 handler；
//! 不使用任何全局可变状态

use crate::application::{ArtifactService, SynthesisOrchestrator};

/// 应用状态
pub struct AppState {
    pub orchestrator: SynthesisOrchestrator,
    pub artifacts: ArtifactService,
    /// 参考音频上传大小上限（字节）
    pub max_upload_size: u64,
    /// 请求未指定 modelPath 时使用的模型目录
    pub default_model_dir: String,
}

impl AppState {
    pub fn new(
        orchestrator: SynthesisOrchestrator,
        artifacts: ArtifactService,
        max_upload_size: u64,
        default_model_dir: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator,
            artifacts,
            max_upload_size,
            default_model_dir: default_model_dir.into(),
        }
    }
}
