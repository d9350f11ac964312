//! Workflow config edit dialog

use std::sync::Arc;

use termadmin_core::error::CoreResult;
use termadmin_core::traits::WorkflowService;
use termadmin_core::types::{ProjectContext, WorkflowConfig};

use super::operation::{EditAction, RecordKind, RemoteOperation};
use super::session::{
    Completion, EditSession, ErrorList, SessionState, SubmitError, Ticket, WorkflowOutcome,
};

/// A validated submit waiting to be sent.
#[derive(Debug, Clone)]
pub struct PendingConfigSubmit {
    pub ticket: Ticket,
    pub operation: RemoteOperation,
    pub project_id: i64,
    pub config: WorkflowConfig,
}

/// Add/edit dialog for a project's workflow configs.
///
/// `siblings` are the configs the invoking page already shows; they are only
/// read, to catch duplicate types before going to the server.
pub struct ConfigEditor<S: WorkflowService + ?Sized> {
    service: Arc<S>,
    project: ProjectContext,
    siblings: Arc<[WorkflowConfig]>,
    session: EditSession<WorkflowConfig>,
}

impl<S: WorkflowService + ?Sized> ConfigEditor<S> {
    /// Open an add dialog with an empty config stamped with the project id.
    pub fn add(service: Arc<S>, project: ProjectContext, siblings: Arc<[WorkflowConfig]>) -> Self {
        let blank = WorkflowConfig {
            project_id: Some(project.id),
            ..WorkflowConfig::default()
        };
        Self {
            service,
            project,
            siblings,
            session: EditSession::ready(EditAction::Add, blank),
        }
    }

    /// Open an edit dialog on a copy of `selected`.
    pub fn edit(
        service: Arc<S>,
        project: ProjectContext,
        siblings: Arc<[WorkflowConfig]>,
        selected: &WorkflowConfig,
    ) -> Self {
        Self {
            service,
            project,
            siblings,
            session: EditSession::ready(EditAction::Edit, selected.clone()),
        }
    }

    pub fn action(&self) -> EditAction {
        self.session.action()
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn config(&self) -> Option<&WorkflowConfig> {
        self.session.record()
    }

    pub fn config_mut(&mut self) -> Option<&mut WorkflowConfig> {
        self.session.record_mut()
    }

    pub fn errors(&self) -> &ErrorList {
        self.session.errors()
    }

    pub fn outcome(&self) -> Option<&WorkflowOutcome<WorkflowConfig>> {
        self.session.outcome()
    }

    /// Stamp the project, check for a duplicate type on add and reserve the
    /// single in-flight slot. Clears the error list first.
    pub fn prepare_submit(&mut self) -> Result<PendingConfigSubmit, SubmitError> {
        let action = self.session.action();
        let project_id = self.project.id;
        let siblings = &self.siblings;

        let (ticket, config) = self.session.begin_submit(|config, errors| {
            errors.clear();
            config.project_id = Some(project_id);
            if action == EditAction::Add
                && siblings.iter().any(|c| c.config_type == config.config_type)
            {
                errors.push(format!(
                    "A workflow configuration with type {} already exists.",
                    config.config_type
                ));
                return Err(SubmitError::Invalid);
            }
            Ok(())
        })?;

        Ok(PendingConfigSubmit {
            ticket,
            operation: RemoteOperation::select(RecordKind::WorkflowConfig, action),
            project_id,
            config,
        })
    }

    /// Send a prepared submit to the service.
    ///
    /// Updates return no body, so they resolve to `None`.
    pub async fn dispatch(
        service: &S,
        pending: &PendingConfigSubmit,
    ) -> CoreResult<Option<WorkflowConfig>> {
        log::debug!(
            "Calling {} for project {}",
            pending.operation.name(),
            pending.project_id
        );
        match pending.operation.action() {
            EditAction::Add => service
                .add_workflow_config(pending.project_id, &pending.config)
                .await
                .map(Some),
            EditAction::Edit => service
                .update_workflow_config(pending.project_id, &pending.config)
                .await
                .map(|()| None),
        }
    }

    /// Apply the service response to a prepared submit.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: CoreResult<Option<WorkflowConfig>>,
    ) -> Completion {
        self.session.complete_submit(ticket, result)
    }

    /// Validate, send and apply in one step.
    pub async fn submit(&mut self) -> Result<WorkflowConfig, SubmitError> {
        let pending = self.prepare_submit()?;
        let result = Self::dispatch(&self.service, &pending).await;
        match self.finish_submit(pending.ticket, result) {
            Completion::Applied => match self.session.outcome() {
                Some(WorkflowOutcome::Success(config)) => Ok(config.clone()),
                _ => Err(SubmitError::Ended),
            },
            Completion::Rejected => Err(SubmitError::Remote),
            Completion::Stale => Err(SubmitError::Ended),
        }
    }

    /// Dismiss the dialog.
    pub fn cancel(&mut self) -> WorkflowOutcome<WorkflowConfig> {
        self.session.cancel()
    }
}
