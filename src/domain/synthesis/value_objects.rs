//! Synthesis Context - Value Objects

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// SFT/Instruct 模式的默认预训练音色
///
/// 推理 worker 按字面值识别此 ID，不做翻译
pub const DEFAULT_SPEAKER: &str = "中性";

/// 输出音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Wav,
    Mp3,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            _ => Err(ValidationError::UnknownFormat(s.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.extension()
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Wav
    }
}

/// 合成模式
///
/// 闭合的模式集合，每个变体只携带该模式必需的字段。
/// 字段在构造时校验，运行期不再做字段存在性检查。
///
/// 不变量:
/// - ZeroShot 的 prompt_text 非空
/// - Instruct/Instruct2 的 instruct_text 非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisMode {
    /// 预训练音色推理
    Sft { speaker_id: String },
    /// 零样本音色复刻（需要参考音频 + 参考文本）
    ZeroShot { prompt_text: String },
    /// 跨语言复刻（需要参考音频）
    CrossLingual,
    /// 指令控制推理
    Instruct {
        speaker_id: String,
        instruct_text: String,
    },
    /// 指令控制推理（参考音频版本）
    Instruct2 { instruct_text: String },
}

impl SynthesisMode {
    /// 从请求字段构造模式
    ///
    /// 逐模式检查必需字段，缺失即返回 ValidationError
    pub fn from_parts(
        mode: &str,
        speaker_id: Option<String>,
        prompt_text: Option<String>,
        instruct_text: Option<String>,
    ) -> Result<Self, ValidationError> {
        let speaker_id = non_empty(speaker_id).unwrap_or_else(|| DEFAULT_SPEAKER.to_string());

        match mode {
            "sft" => Ok(Self::Sft { speaker_id }),
            "zero_shot" => {
                let prompt_text = non_empty(prompt_text)
                    .ok_or(ValidationError::MissingPromptText("zero_shot"))?;
                Ok(Self::ZeroShot { prompt_text })
            }
            "cross_lingual" => Ok(Self::CrossLingual),
            "instruct" => {
                let instruct_text = non_empty(instruct_text)
                    .ok_or(ValidationError::MissingInstructText("instruct"))?;
                Ok(Self::Instruct {
                    speaker_id,
                    instruct_text,
                })
            }
            "instruct2" => {
                let instruct_text = non_empty(instruct_text)
                    .ok_or(ValidationError::MissingInstructText("instruct2"))?;
                Ok(Self::Instruct2 { instruct_text })
            }
            other => Err(ValidationError::UnknownMode(other.to_string())),
        }
    }

    /// 该模式是否需要上传参考音频
    pub fn requires_prompt_audio(&self) -> bool {
        matches!(
            self,
            Self::ZeroShot { .. } | Self::CrossLingual | Self::Instruct2 { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sft { .. } => "sft",
            Self::ZeroShot { .. } => "zero_shot",
            Self::CrossLingual => "cross_lingual",
            Self::Instruct { .. } => "instruct",
            Self::Instruct2 { .. } => "instruct2",
        }
    }

    /// 模式携带的音色 ID（仅 Sft/Instruct 有意义）
    pub fn speaker_id(&self) -> Option<&str> {
        match self {
            Self::Sft { speaker_id } | Self::Instruct { speaker_id, .. } => Some(speaker_id),
            _ => None,
        }
    }

    /// 参考音频对应的文本（仅 ZeroShot 有意义）
    pub fn prompt_text(&self) -> Option<&str> {
        match self {
            Self::ZeroShot { prompt_text } => Some(prompt_text),
            _ => None,
        }
    }

    /// 风格指令文本（仅 Instruct/Instruct2 有意义）
    pub fn instruct_text(&self) -> Option<&str> {
        match self {
            Self::Instruct { instruct_text, .. } | Self::Instruct2 { instruct_text } => {
                Some(instruct_text)
            }
            _ => None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// 合成参数
///
/// 随产物保存，用于溯源
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    /// 语速 (0.5 - 2.0)
    pub speed: f32,
    /// 是否流式推理（worker 内部行为）
    pub stream: bool,
    /// 随机种子，0 表示由 worker 自选
    pub seed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("wav").unwrap(), OutputFormat::Wav);
        assert_eq!(OutputFormat::parse("MP3").unwrap(), OutputFormat::Mp3);
        assert!(OutputFormat::parse("flac").is_err());
    }

    #[test]
    fn test_sft_defaults_to_neutral_speaker() {
        let mode = SynthesisMode::from_parts("sft", None, None, None).unwrap();
        assert_eq!(mode.speaker_id(), Some(DEFAULT_SPEAKER));
        assert!(!mode.requires_prompt_audio());
    }

    #[test]
    fn test_zero_shot_requires_prompt_text() {
        let err = SynthesisMode::from_parts("zero_shot", None, None, None).unwrap_err();
        assert_eq!(err, ValidationError::MissingPromptText("zero_shot"));

        // 空白字符串同样视为缺失
        let err =
            SynthesisMode::from_parts("zero_shot", None, Some("  ".to_string()), None).unwrap_err();
        assert_eq!(err, ValidationError::MissingPromptText("zero_shot"));

        let mode =
            SynthesisMode::from_parts("zero_shot", None, Some("你好".to_string()), None).unwrap();
        assert!(mode.requires_prompt_audio());
        assert_eq!(mode.prompt_text(), Some("你好"));
    }

    #[test]
    fn test_instruct_requires_instruct_text() {
        let err = SynthesisMode::from_parts("instruct", None, None, None).unwrap_err();
        assert_eq!(err, ValidationError::MissingInstructText("instruct"));

        let mode = SynthesisMode::from_parts(
            "instruct",
            Some("speaker-1".to_string()),
            None,
            Some("用温柔的语气".to_string()),
        )
        .unwrap();
        assert_eq!(mode.speaker_id(), Some("speaker-1"));
        assert_eq!(mode.instruct_text(), Some("用温柔的语气"));
        assert!(!mode.requires_prompt_audio());
    }

    #[test]
    fn test_instruct2_requires_prompt_audio() {
        let mode =
            SynthesisMode::from_parts("instruct2", None, None, Some("轻快".to_string())).unwrap();
        assert!(mode.requires_prompt_audio());
        assert_eq!(mode.as_str(), "instruct2");
    }

    #[test]
    fn test_unknown_mode() {
        let err = SynthesisMode::from_parts("vc", None, None, None).unwrap_err();
        assert_eq!(err, ValidationError::UnknownMode("vc".to_string()));
    }
}
