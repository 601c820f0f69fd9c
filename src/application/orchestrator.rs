//! Synthesis Orchestrator
//!
//! 合成入口：前置检查 → 参考音频临时文件 → worker 调用 → 输出 stat →
//! 产物描述组装。产物注册进 Store 是调用方的职责，编排与持久化策略解耦

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::application::error::{SynthesisError, SynthesisErrorKind};
use crate::application::ports::{BlobRepositoryPort, WorkerEnginePort, WorkerInvocation};
use crate::domain::synthesis::{derive_title, NewAudioArtifact, SynthesisRequest, DEFAULT_SPEAKER};

/// 合成成功的输出
#[derive(Debug)]
pub struct SynthesisOutput {
    /// 未注册的产物描述
    pub artifact: NewAudioArtifact,
    /// 从进入编排到完成的墙钟耗时
    pub elapsed_ms: u64,
}

/// 合成编排器
///
/// 每次 synthesize() 对应一次 worker 调用；并发请求各自独立，
/// 不共享 worker 进程，也不做准入控制
pub struct SynthesisOrchestrator {
    worker: Arc<dyn WorkerEnginePort>,
    blobs: Arc<dyn BlobRepositoryPort>,
}

impl SynthesisOrchestrator {
    pub fn new(worker: Arc<dyn WorkerEnginePort>, blobs: Arc<dyn BlobRepositoryPort>) -> Self {
        Self { worker, blobs }
    }

    /// 执行一次合成
    ///
    /// 失败路径保证：不产生产物描述，参考音频临时文件在返回前移除
    pub async fn synthesize(
        &self,
        request: SynthesisRequest,
        prompt_audio: Option<Vec<u8>>,
    ) -> Result<SynthesisOutput, SynthesisError> {
        let started = Instant::now();

        // 前置检查：任何文件系统操作与进程启动之前
        if let Err(err) = request.validate() {
            return Err(SynthesisError::new(err, elapsed_ms(started)));
        }
        if request.mode.requires_prompt_audio() && prompt_audio.is_none() {
            tracing::warn!(mode = request.mode.as_str(), "Prompt audio missing");
            return Err(SynthesisError::new(
                SynthesisErrorKind::MissingPromptAudio,
                elapsed_ms(started),
            ));
        }

        // 唯一输出文件名：毫秒时间戳 + 随机后缀，碰撞概率可忽略
        let filename = format!(
            "audio_{}_{}.{}",
            Utc::now().timestamp_millis(),
            random_suffix(),
            request.output_format.extension()
        );
        let output_path = self.blobs.blob_path(&filename);

        // 参考音频写入托管目录下的临时文件，所有权归本次调用
        let prompt_filename = match (request.mode.requires_prompt_audio(), &prompt_audio) {
            (true, Some(data)) => {
                let name = format!(
                    "prompt_{}_{}.wav",
                    Utc::now().timestamp_millis(),
                    random_suffix()
                );
                if let Err(err) = self.blobs.write(&name, data).await {
                    return Err(SynthesisError::new(
                        SynthesisErrorKind::Io(err.to_string()),
                        elapsed_ms(started),
                    ));
                }
                Some(name)
            }
            _ => None,
        };

        let invocation = WorkerInvocation {
            text: request.text.clone(),
            mode: request.mode.as_str().to_string(),
            spk_id: request
                .mode
                .speaker_id()
                .unwrap_or(DEFAULT_SPEAKER)
                .to_string(),
            prompt_text: request.mode.prompt_text().unwrap_or_default().to_string(),
            prompt_audio_path: prompt_filename
                .as_ref()
                .map(|name| self.blobs.blob_path(name).to_string_lossy().into_owned()),
            instruct_text: request
                .mode
                .instruct_text()
                .unwrap_or_default()
                .to_string(),
            output_path: output_path.to_string_lossy().into_owned(),
            output_format: request.output_format.as_str().to_string(),
            speed: request.speed,
            stream: request.stream,
            seed: request.seed,
            model_dir: request.model_path.clone(),
        };

        let result = self.worker.invoke(&invocation).await;

        // 临时文件清理与调用结果无关
        if let Some(name) = &prompt_filename {
            if !self.blobs.delete(name).await {
                tracing::debug!(filename = %name, "Prompt temp file already gone");
            }
        }

        let result = match result {
            Ok(result) => result,
            Err(err) => {
                let elapsed = elapsed_ms(started);
                tracing::warn!(
                    mode = request.mode.as_str(),
                    elapsed_ms = elapsed,
                    error = %err,
                    "Worker invocation failed"
                );
                return Err(SynthesisError::new(err, elapsed));
            }
        };

        if !result.success {
            let message = result
                .error
                .unwrap_or_else(|| "Voice synthesis failed".to_string());
            let elapsed = elapsed_ms(started);
            tracing::warn!(
                mode = request.mode.as_str(),
                elapsed_ms = elapsed,
                error = %message,
                "Worker reported failure"
            );
            return Err(SynthesisError::new(
                SynthesisErrorKind::SynthesisFailed(message),
                elapsed,
            ));
        }

        // worker 自报成功，stat 确认输出确实落盘
        let metadata = match tokio::fs::metadata(&output_path).await {
            Ok(metadata) => metadata,
            Err(err) => {
                let elapsed = elapsed_ms(started);
                tracing::error!(
                    path = %output_path.display(),
                    elapsed_ms = elapsed,
                    error = %err,
                    "Worker claimed success but output is unreadable"
                );
                return Err(SynthesisError::new(
                    SynthesisErrorKind::ArtifactFileMissing {
                        path: output_path.to_string_lossy().into_owned(),
                    },
                    elapsed,
                ));
            }
        };

        let elapsed = elapsed_ms(started);
        let parameters = request.parameters();
        let artifact = NewAudioArtifact {
            title: derive_title(&request.text),
            text: request.text,
            model_path: request.model_path,
            parameters,
            filename,
            format: request.output_format,
            duration: result.duration.unwrap_or(0.0),
            created_at: Utc::now(),
            file_size: metadata.len(),
            file_path: output_path,
        };

        tracing::info!(
            filename = %artifact.filename,
            file_size = artifact.file_size,
            duration = artifact.duration,
            elapsed_ms = elapsed,
            "Synthesis completed"
        );

        Ok(SynthesisOutput {
            artifact,
            elapsed_ms: elapsed,
        })
    }
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
