//! Artifact Store Port - 产物元数据注册表
//!
//! 进程生命周期内的权威元数据存储，具体实现在 infrastructure/memory 层

use crate::domain::synthesis::{ArtifactPatch, AudioArtifact, NewAudioArtifact};

/// Artifact Store Port
///
/// 所有操作必须支持并发调用；list() 观察一致性快照
pub trait ArtifactStorePort: Send + Sync {
    /// 分配新的唯一 id 并插入，返回存储后的副本。不会失败
    fn create(&self, artifact: NewAudioArtifact) -> AudioArtifact;

    /// 按 id 查询
    fn get(&self, id: &str) -> Option<AudioArtifact>;

    /// 全量列表，按 created_at 降序（最新在前）
    ///
    /// 排序是接口契约的一部分，不是实现细节
    fn list(&self) -> Vec<AudioArtifact>;

    /// 部分更新：patch 中为 None 的字段保持原值
    fn update(&self, id: &str, patch: ArtifactPatch) -> Option<AudioArtifact>;

    /// 删除元数据条目，存在则 true
    ///
    /// 只删元数据，不触碰 blob；两步删除由调用方编排
    fn delete(&self, id: &str) -> bool;
}
