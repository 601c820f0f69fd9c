//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_store;
mod blob_repository;
mod worker_engine;

pub use artifact_store::ArtifactStorePort;
pub use blob_repository::{BlobError, BlobRepositoryPort};
pub use worker_engine::{WorkerEnginePort, WorkerError, WorkerInvocation, WorkerResult};
