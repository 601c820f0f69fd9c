//! In-Memory Artifact Store Implementation

use dashmap::DashMap;
use uuid::Uuid;

use crate::application::ports::ArtifactStorePort;
use crate::domain::synthesis::{ArtifactPatch, AudioArtifact, NewAudioArtifact};

/// 内存产物注册表
///
/// DashMap 保证并发 create/get/delete 不损坏内部状态；
/// list() 先克隆快照再排序，不会观察到半写入的条目
pub struct InMemoryArtifactStore {
    /// artifact_id -> AudioArtifact
    artifacts: DashMap<String, AudioArtifact>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self {
            artifacts: DashMap::new(),
        }
    }
}

impl Default for InMemoryArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStorePort for InMemoryArtifactStore {
    fn create(&self, artifact: NewAudioArtifact) -> AudioArtifact {
        // v4 uuid：唯一且不复用
        let id = Uuid::new_v4().to_string();
        let artifact = artifact.with_id(id.clone());
        self.artifacts.insert(id, artifact.clone());

        tracing::debug!(
            artifact_id = %artifact.id,
            filename = %artifact.filename,
            "Artifact stored"
        );
        artifact
    }

    fn get(&self, id: &str) -> Option<AudioArtifact> {
        self.artifacts.get(id).map(|entry| entry.clone())
    }

    fn list(&self) -> Vec<AudioArtifact> {
        let mut artifacts: Vec<AudioArtifact> = self
            .artifacts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        // created_at 降序是接口契约
        artifacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        artifacts
    }

    fn update(&self, id: &str, patch: ArtifactPatch) -> Option<AudioArtifact> {
        let mut entry = self.artifacts.get_mut(id)?;
        patch.apply(entry.value_mut());
        Some(entry.clone())
    }

    fn delete(&self, id: &str) -> bool {
        let removed = self.artifacts.remove(id).is_some();
        if removed {
            tracing::debug!(artifact_id = %id, "Artifact metadata removed");
        }
        removed
    }
}
