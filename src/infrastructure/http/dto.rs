//! Data Transfer Objects
//!
//! 响应字段为 camelCase，沿用既有前端契约

use serde::Serialize;

use crate::domain::synthesis::{AudioArtifact, SynthesisParameters};

/// 产物元数据响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFileResponse {
    pub id: String,
    pub title: String,
    pub text: String,
    pub model_path: String,
    pub parameters: SynthesisParameters,
    pub filename: String,
    pub format: String,
    pub duration: f64,
    pub created_at: String,
    pub file_size: u64,
    pub file_path: String,
}

impl From<AudioArtifact> for AudioFileResponse {
    fn from(artifact: AudioArtifact) -> Self {
        Self {
            id: artifact.id,
            title: artifact.title,
            text: artifact.text,
            model_path: artifact.model_path,
            parameters: artifact.parameters,
            filename: artifact.filename,
            format: artifact.format.as_str().to_string(),
            duration: artifact.duration,
            created_at: artifact.created_at.to_rfc3339(),
            file_size: artifact.file_size,
            file_path: artifact.file_path.to_string_lossy().into_owned(),
        }
    }
}

/// 合成成功响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResponse {
    pub success: bool,
    pub audio_file: AudioFileResponse,
    /// 合成耗时（毫秒）
    pub processing_time: u64,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}

/// 删除单个产物响应
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// 清空产物响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub success: bool,
    pub deleted_count: u64,
}
