//! Workflow configuration data service Trait

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::types::WorkflowConfig;

/// Remote workflow service
///
/// Configs belong to a project and are unique by `type` within it.
#[async_trait]
pub trait WorkflowService: Send + Sync {
    /// Fetch one config
    ///
    /// # Arguments
    /// * `project_id` - Owning project
    /// * `id` - Config ID
    async fn get_workflow_config(&self, project_id: i64, id: i64) -> CoreResult<WorkflowConfig>;

    /// List the project's configs, ordered by id
    async fn find_workflow_configs(&self, project_id: i64) -> CoreResult<Vec<WorkflowConfig>>;

    /// Create a config, returning the stored record
    async fn add_workflow_config(
        &self,
        project_id: i64,
        config: &WorkflowConfig,
    ) -> CoreResult<WorkflowConfig>;

    /// Update a config; the service returns no body
    async fn update_workflow_config(&self, project_id: i64, config: &WorkflowConfig)
        -> CoreResult<()>;

    /// Remove a config
    async fn remove_workflow_config(&self, project_id: i64, id: i64) -> CoreResult<()>;
}

/// In-memory workflow service
///
/// Authoritative about duplicate types, independently of any client-side check.
#[derive(Clone, Default)]
pub struct InMemoryWorkflowService {
    configs: Arc<RwLock<BTreeMap<i64, WorkflowConfig>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryWorkflowService {
    /// Create an empty service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowService for InMemoryWorkflowService {
    async fn get_workflow_config(&self, project_id: i64, id: i64) -> CoreResult<WorkflowConfig> {
        self.configs
            .read()
            .await
            .get(&id)
            .filter(|c| c.project_id == Some(project_id))
            .cloned()
            .ok_or_else(|| CoreError::WorkflowConfigNotFound(id.to_string()))
    }

    async fn find_workflow_configs(&self, project_id: i64) -> CoreResult<Vec<WorkflowConfig>> {
        Ok(self
            .configs
            .read()
            .await
            .values()
            .filter(|c| c.project_id == Some(project_id))
            .cloned()
            .collect())
    }

    async fn add_workflow_config(
        &self,
        project_id: i64,
        config: &WorkflowConfig,
    ) -> CoreResult<WorkflowConfig> {
        let mut store = self.configs.write().await;
        let duplicate = store
            .values()
            .any(|c| c.project_id == Some(project_id) && c.config_type == config.config_type);
        if duplicate {
            return Err(CoreError::Remote(format!(
                "Workflow config with type {} already exists for project {project_id}",
                config.config_type
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut stored = config.clone();
        stored.id = Some(id);
        stored.project_id = Some(project_id);
        store.insert(id, stored.clone());
        log::debug!("Added workflow config {id} ({}) to project {project_id}", stored.config_type);
        Ok(stored)
    }

    async fn update_workflow_config(
        &self,
        project_id: i64,
        config: &WorkflowConfig,
    ) -> CoreResult<()> {
        let id = config
            .id
            .ok_or_else(|| CoreError::ValidationError("Workflow config has no id".to_string()))?;
        let mut store = self.configs.write().await;
        let existing = store
            .get_mut(&id)
            .filter(|c| c.project_id == Some(project_id))
            .ok_or_else(|| CoreError::WorkflowConfigNotFound(id.to_string()))?;
        *existing = WorkflowConfig {
            project_id: Some(project_id),
            ..config.clone()
        };
        Ok(())
    }

    async fn remove_workflow_config(&self, project_id: i64, id: i64) -> CoreResult<()> {
        let mut store = self.configs.write().await;
        let owned = store
            .get(&id)
            .is_some_and(|c| c.project_id == Some(project_id));
        if !owned {
            return Err(CoreError::WorkflowConfigNotFound(id.to_string()));
        }
        store.remove(&id);
        Ok(())
    }
}
