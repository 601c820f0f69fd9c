//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（WorkerEngine、ArtifactStore、BlobRepository）
//! - orchestrator: 合成编排器
//! - artifacts: 产物生命周期服务（注册、查询、两步删除）
//! - error: 应用层错误定义

pub mod artifacts;
pub mod error;
pub mod orchestrator;
pub mod ports;

pub use artifacts::ArtifactService;
pub use error::{SynthesisError, SynthesisErrorKind};
pub use orchestrator::{SynthesisOrchestrator, SynthesisOutput};
pub use ports::{
    // Artifact store
    ArtifactStorePort,
    // Blob repository
    BlobError,
    BlobRepositoryPort,
    // Worker engine
    WorkerEnginePort,
    WorkerError,
    WorkerInvocation,
    WorkerResult,
};
