//! Synthesis Context - Audio Artifact

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use super::{OutputFormat, SynthesisParameters};

/// 标题最大长度（字符数），超出部分截断并追加省略号
const MAX_TITLE_CHARS: usize = 30;

/// 音频产物元数据
///
/// 不变量:
/// - 只在 worker 成功且输出文件 stat 成功后创建
/// - created_at 创建后不可变
/// - id 由 Store 分配，全局唯一且不复用
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub id: String,
    pub title: String,
    pub text: String,
    pub model_path: String,
    pub parameters: SynthesisParameters,
    /// 托管目录下的文件名，含格式扩展名
    pub filename: String,
    pub format: OutputFormat,
    /// 音频时长（秒），worker 未上报时为 0
    pub duration: f64,
    pub created_at: DateTime<Utc>,
    /// 文件字节数，来自合成完成后的 stat
    pub file_size: u64,
    /// 底层 blob 的绝对路径
    pub file_path: PathBuf,
}

/// 未注册的产物描述
///
/// Orchestrator 的输出；id 在注册进 Store 时才分配
#[derive(Debug, Clone)]
pub struct NewAudioArtifact {
    pub title: String,
    pub text: String,
    pub model_path: String,
    pub parameters: SynthesisParameters,
    pub filename: String,
    pub format: OutputFormat,
    pub duration: f64,
    pub created_at: DateTime<Utc>,
    pub file_size: u64,
    pub file_path: PathBuf,
}

impl NewAudioArtifact {
    /// 分配 id，转为已注册产物
    pub fn with_id(self, id: impl Into<String>) -> AudioArtifact {
        AudioArtifact {
            id: id.into(),
            title: self.title,
            text: self.text,
            model_path: self.model_path,
            parameters: self.parameters,
            filename: self.filename,
            format: self.format,
            duration: self.duration,
            created_at: self.created_at,
            file_size: self.file_size,
            file_path: self.file_path,
        }
    }
}

/// 元数据部分更新
///
/// None 字段保持原值不变
#[derive(Debug, Clone, Default)]
pub struct ArtifactPatch {
    pub title: Option<String>,
    pub duration: Option<f64>,
}

impl ArtifactPatch {
    /// 合并到现有产物
    pub fn apply(self, artifact: &mut AudioArtifact) {
        if let Some(title) = self.title {
            artifact.title = title;
        }
        if let Some(duration) = self.duration {
            artifact.duration = duration;
        }
    }
}

/// 从合成文本派生标题：前 30 个字符，截断时追加省略号
pub fn derive_title(text: &str) -> String {
    let mut chars = text.chars();
    let title: String = chars.by_ref().take(MAX_TITLE_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", title)
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title_short_text() {
        assert_eq!(derive_title("hello"), "hello");
    }

    #[test]
    fn test_derive_title_exact_boundary() {
        let text = "a".repeat(30);
        assert_eq!(derive_title(&text), text);
    }

    #[test]
    fn test_derive_title_truncates() {
        let text = "a".repeat(31);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), 33);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_derive_title_multibyte() {
        // 按字符截断，不会切断多字节序列
        let text = "语".repeat(40);
        let title = derive_title(&text);
        assert_eq!(title, format!("{}...", "语".repeat(30)));
    }

    #[test]
    fn test_patch_merges_partial_fields() {
        let new = NewAudioArtifact {
            title: "t".to_string(),
            text: "t".to_string(),
            model_path: "/m".to_string(),
            parameters: SynthesisParameters {
                speed: 1.0,
                stream: false,
                seed: 0,
            },
            filename: "audio_1_abc.wav".to_string(),
            format: OutputFormat::Wav,
            duration: 1.0,
            created_at: Utc::now(),
            file_size: 44,
            file_path: PathBuf::from("/data/audio/audio_1_abc.wav"),
        };
        let mut artifact = new.with_id("id-1");

        ArtifactPatch {
            title: Some("renamed".to_string()),
            duration: None,
        }
        .apply(&mut artifact);

        assert_eq!(artifact.title, "renamed");
        assert_eq!(artifact.duration, 1.0);
    }
}
