//! Vocalis - 语音合成服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Synthesis Context: 合成模式、合成请求、音频产物
//!
//! 应用层 (application/):
//! - Ports: 端口定义（WorkerEngine, ArtifactStore, BlobRepository）
//! - Orchestrator: 合成编排（worker 调用、临时文件、产物组装）
//! - Artifacts: 产物生命周期（注册、查询、两步删除）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（合成、产物查询/下载/删除）
//! - Worker: 子进程推理引擎 + 测试用 fake
//! - Memory: ArtifactStore 内存实现
//! - Storage: 文件系统 blob 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
