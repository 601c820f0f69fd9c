//! Synthesis Context
//!
//! 语音合成领域模型：合成模式、合成请求、音频产物

mod artifact;
mod errors;
mod request;
mod value_objects;

pub use artifact::{derive_title, ArtifactPatch, AudioArtifact, NewAudioArtifact};
pub use errors::ValidationError;
pub use request::{SynthesisRequest, MAX_SPEED, MAX_TEXT_CHARS, MIN_SPEED};
pub use value_objects::{OutputFormat, SynthesisMode, SynthesisParameters, DEFAULT_SPEAKER};
