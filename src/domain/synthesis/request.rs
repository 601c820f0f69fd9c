//! Synthesis Context - Synthesis Request

use super::{OutputFormat, SynthesisMode, SynthesisParameters, ValidationError};

/// 合成文本最大长度（字符数）
pub const MAX_TEXT_CHARS: usize = 500;

/// 语速下限
pub const MIN_SPEED: f32 = 0.5;

/// 语速上限
pub const MAX_SPEED: f32 = 2.0;

/// 合成请求
///
/// 模式相关字段由 SynthesisMode 变体携带，构造时已校验；
/// validate() 只负责与模式无关的约束
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub mode: SynthesisMode,
    /// worker 加载的预训练模型目录
    pub model_path: String,
    pub output_format: OutputFormat,
    pub speed: f32,
    pub stream: bool,
    pub seed: i64,
}

impl SynthesisRequest {
    /// 校验文本与语速约束
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let chars = self.text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(ValidationError::TextTooLong {
                actual: chars,
                limit: MAX_TEXT_CHARS,
            });
        }

        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(ValidationError::SpeedOutOfRange(self.speed));
        }

        Ok(())
    }

    /// 提取溯源参数
    pub fn parameters(&self) -> SynthesisParameters {
        SynthesisParameters {
            speed: self.speed,
            stream: self.stream,
            seed: self.seed,
        }
    }
}
