//! Synthesis Handler
//!
//! multipart 请求解码 → 领域请求构造 → 编排 → 产物注册

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::domain::synthesis::{OutputFormat, SynthesisMode, SynthesisRequest};
use crate::infrastructure::http::dto::SynthesizeResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// multipart 原始字段
#[derive(Default)]
struct SynthesizeForm {
    text: Option<String>,
    mode: Option<String>,
    spk_id: Option<String>,
    prompt_text: Option<String>,
    instruct_text: Option<String>,
    model_path: Option<String>,
    output_format: Option<String>,
    speed: Option<String>,
    stream: Option<String>,
    seed: Option<String>,
    prompt_audio: Option<Vec<u8>>,
}

/// 合成语音（可选上传参考音频）
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SynthesizeResponse>, ApiError> {
    let mut form = SynthesizeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "text" => form.text = Some(read_text(field, "text").await?),
            "mode" => form.mode = Some(read_text(field, "mode").await?),
            "spkId" => form.spk_id = Some(read_text(field, "spkId").await?),
            "promptText" => form.prompt_text = Some(read_text(field, "promptText").await?),
            "instructText" => form.instruct_text = Some(read_text(field, "instructText").await?),
            "modelPath" => form.model_path = Some(read_text(field, "modelPath").await?),
            "outputFormat" => form.output_format = Some(read_text(field, "outputFormat").await?),
            "speed" => form.speed = Some(read_text(field, "speed").await?),
            "stream" => form.stream = Some(read_text(field, "stream").await?),
            "seed" => form.seed = Some(read_text(field, "seed").await?),
            "promptAudio" => {
                let data = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read prompt audio: {}", e))
                })?;
                if data.len() as u64 > state.max_upload_size {
                    return Err(ApiError::Synthesis {
                        message: format!(
                            "Prompt audio exceeds maximum upload size of {} bytes",
                            state.max_upload_size
                        ),
                        client_error: true,
                    });
                }
                form.prompt_audio = Some(data.to_vec());
            }
            _ => {}
        }
    }

    let request = build_request(&state, &mut form)?;

    let output = state
        .orchestrator
        .synthesize(request, form.prompt_audio)
        .await?;

    // 注册元数据是路由层的职责，编排器只负责产出描述
    let artifact = state.artifacts.register(output.artifact);

    Ok(Json(SynthesizeResponse {
        success: true,
        audio_file: artifact.into(),
        processing_time: output.elapsed_ms,
    }))
}

fn build_request(
    state: &AppState,
    form: &mut SynthesizeForm,
) -> Result<SynthesisRequest, ApiError> {
    let text = form
        .text
        .take()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Synthesis {
            message: "Text is required".to_string(),
            client_error: true,
        })?;

    let mode = SynthesisMode::from_parts(
        form.mode.as_deref().unwrap_or("sft"),
        form.spk_id.take(),
        form.prompt_text.take(),
        form.instruct_text.take(),
    )?;

    let output_format = match form.output_format.take().filter(|s| !s.is_empty()) {
        Some(raw) => OutputFormat::parse(&raw)?,
        None => OutputFormat::default(),
    };

    let speed = parse_number(form.speed.take(), "speed", 1.0_f32)?;
    let seed = parse_number(form.seed.take(), "seed", 0_i64)?;
    let stream = form.stream.as_deref() == Some("true");

    let model_path = form
        .model_path
        .take()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| state.default_model_dir.clone());

    Ok(SynthesisRequest {
        text,
        mode,
        model_path,
        output_format,
        speed,
        stream,
        seed,
    })
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field {}: {}", name, e)))
}

fn parse_number<T: std::str::FromStr>(
    value: Option<String>,
    name: &str,
    default: T,
) -> Result<T, ApiError> {
    match value {
        Some(raw) if !raw.is_empty() => raw.parse().map_err(|_| ApiError::Synthesis {
            message: format!("Invalid value for {}: {}", name, raw),
            client_error: true,
        }),
        _ => Ok(default),
    }
}
