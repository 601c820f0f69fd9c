//! Worker Layer - Inference Worker Adapters
//!
//! 实现 WorkerEnginePort：子进程调用与测试用 fake

mod fake_worker;
mod process_worker;

pub use fake_worker::{FakeWorkerConfig, FakeWorkerEngine};
pub use process_worker::{ProcessWorkerConfig, ProcessWorkerEngine};
