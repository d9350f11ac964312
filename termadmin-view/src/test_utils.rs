//! Test helper module
//!
//! Recording wrappers around the in-memory services, plus fixtures.

use std::sync::Mutex;

use async_trait::async_trait;
use termadmin_core::error::{CoreError, CoreResult};
use termadmin_core::traits::{
    InMemoryMetadataService, InMemoryWorkflowService, MetadataService, WorkflowService,
};
use termadmin_core::types::{AttributeName, ProjectContext, TermType, WorkflowConfig};
use tokio::sync::RwLock;

pub fn project() -> ProjectContext {
    ProjectContext::new(12, "UMLS", "latest")
}

pub fn term_type(abbreviation: &str, expanded_form: &str) -> TermType {
    TermType {
        abbreviation: abbreviation.to_string(),
        expanded_form: expanded_form.to_string(),
        terminology: "UMLS".to_string(),
        version: "latest".to_string(),
        ..TermType::default()
    }
}

// ===== RecordingMetadataService =====

pub struct RecordingMetadataService {
    inner: InMemoryMetadataService,
    calls: Mutex<Vec<String>>,
    fetches: Mutex<Vec<(String, String, String, String)>>,
    /// When set, the next write fails with this message
    write_error: RwLock<Option<String>>,
}

impl RecordingMetadataService {
    pub fn new() -> Self {
        Self {
            inner: InMemoryMetadataService::new(),
            calls: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
            write_error: RwLock::new(None),
        }
    }

    pub async fn seed_term_type(&self, abbreviation: &str, expanded_form: &str) {
        self.inner
            .add_term_type(&term_type(abbreviation, expanded_form))
            .await
            .unwrap();
    }

    pub async fn seed_attribute_name(&self, abbreviation: &str, expanded_form: &str) {
        let name = AttributeName {
            abbreviation: abbreviation.to_string(),
            expanded_form: expanded_form.to_string(),
            terminology: "UMLS".to_string(),
            version: "latest".to_string(),
            ..AttributeName::default()
        };
        self.inner.add_attribute_name(&name).await.unwrap();
    }

    pub async fn fail_next_write(&self, message: &str) {
        *self.write_error.write().await = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<(String, String, String, String)> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    fn record_fetch(&self, name: &str, key: &str, terminology: &str, version: &str) {
        self.record(name);
        self.fetches.lock().unwrap().push((
            name.to_string(),
            key.to_string(),
            terminology.to_string(),
            version.to_string(),
        ));
    }

    async fn take_write_error(&self) -> CoreResult<()> {
        match self.write_error.write().await.take() {
            Some(msg) => Err(CoreError::Remote(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MetadataService for RecordingMetadataService {
    async fn get_term_type(
        &self,
        abbreviation: &str,
        terminology: &str,
        version: &str,
    ) -> CoreResult<TermType> {
        self.record_fetch("getTermType", abbreviation, terminology, version);
        self.inner
            .get_term_type(abbreviation, terminology, version)
            .await
    }

    async fn add_term_type(&self, term_type: &TermType) -> CoreResult<TermType> {
        self.record("addTermType");
        self.take_write_error().await?;
        self.inner.add_term_type(term_type).await
    }

    async fn update_term_type(&self, term_type: &TermType) -> CoreResult<Option<TermType>> {
        self.record("updateTermType");
        self.take_write_error().await?;
        self.inner.update_term_type(term_type).await
    }

    async fn get_attribute_name(
        &self,
        abbreviation: &str,
        terminology: &str,
        version: &str,
    ) -> CoreResult<AttributeName> {
        self.record_fetch("getAttributeName", abbreviation, terminology, version);
        self.inner
            .get_attribute_name(abbreviation, terminology, version)
            .await
    }

    async fn add_attribute_name(
        &self,
        attribute_name: &AttributeName,
    ) -> CoreResult<AttributeName> {
        self.record("addAttributeName");
        self.take_write_error().await?;
        self.inner.add_attribute_name(attribute_name).await
    }

    async fn update_attribute_name(
        &self,
        attribute_name: &AttributeName,
    ) -> CoreResult<Option<AttributeName>> {
        self.record("updateAttributeName");
        self.take_write_error().await?;
        self.inner.update_attribute_name(attribute_name).await
    }
}

// ===== RecordingWorkflowService =====

pub struct RecordingWorkflowService {
    inner: InMemoryWorkflowService,
    calls: Mutex<Vec<String>>,
    write_error: RwLock<Option<String>>,
}

impl RecordingWorkflowService {
    pub fn new() -> Self {
        Self {
            inner: InMemoryWorkflowService::new(),
            calls: Mutex::new(Vec::new()),
            write_error: RwLock::new(None),
        }
    }

    pub async fn seed(&self, project_id: i64, config_type: &str) -> WorkflowConfig {
        self.inner
            .add_workflow_config(project_id, &WorkflowConfig::with_type(config_type))
            .await
            .unwrap()
    }

    pub async fn fail_next_write(&self, message: &str) {
        *self.write_error.write().await = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    async fn take_write_error(&self) -> CoreResult<()> {
        match self.write_error.write().await.take() {
            Some(msg) => Err(CoreError::Remote(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WorkflowService for RecordingWorkflowService {
    async fn get_workflow_config(&self, project_id: i64, id: i64) -> CoreResult<WorkflowConfig> {
        self.record("getWorkflowConfig");
        self.inner.get_workflow_config(project_id, id).await
    }

    async fn find_workflow_configs(&self, project_id: i64) -> CoreResult<Vec<WorkflowConfig>> {
        self.record("findWorkflowConfigs");
        self.inner.find_workflow_configs(project_id).await
    }

    async fn add_workflow_config(
        &self,
        project_id: i64,
        config: &WorkflowConfig,
    ) -> CoreResult<WorkflowConfig> {
        self.record("addWorkflowConfig");
        self.take_write_error().await?;
        self.inner.add_workflow_config(project_id, config).await
    }

    async fn update_workflow_config(
        &self,
        project_id: i64,
        config: &WorkflowConfig,
    ) -> CoreResult<()> {
        self.record("updateWorkflowConfig");
        self.take_write_error().await?;
        self.inner.update_workflow_config(project_id, config).await
    }

    async fn remove_workflow_config(&self, project_id: i64, id: i64) -> CoreResult<()> {
        self.record("removeWorkflowConfig");
        self.take_write_error().await?;
        self.inner.remove_workflow_config(project_id, id).await
    }
}
