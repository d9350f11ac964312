//! Term type / attribute name edit dialog

use std::sync::Arc;

use termadmin_core::error::{CoreError, CoreResult};
use termadmin_core::traits::MetadataService;
use termadmin_core::types::{MetadataKind, MetadataRecord, ProjectContext};

use super::operation::{EditAction, RemoteOperation};
use super::session::{
    Completion, EditSession, ErrorList, SessionState, SubmitError, Ticket, WorkflowOutcome,
};

/// Notice shown when a required field is blank.
pub const BLANK_FIELDS_NOTICE: &str = "The abbreviation and expanded form cannot be blank.";

/// A validated submit waiting to be sent.
#[derive(Debug, Clone)]
pub struct PendingMetadataSubmit {
    pub ticket: Ticket,
    pub operation: RemoteOperation,
    pub record: MetadataRecord,
}

/// Add/edit dialog for term types and attribute names.
pub struct TermTypeEditor<S: MetadataService + ?Sized> {
    service: Arc<S>,
    kind: MetadataKind,
    project: ProjectContext,
    session: EditSession<MetadataRecord>,
    load: Option<(Ticket, String)>,
}

impl<S: MetadataService + ?Sized> TermTypeEditor<S> {
    /// Open an add dialog. The blank record is stamped with the project's
    /// terminology and version; nothing is sent until submit.
    pub fn add(service: Arc<S>, kind: MetadataKind, project: ProjectContext) -> Self {
        let session = EditSession::ready(EditAction::Add, kind.blank(&project));
        Self {
            service,
            kind,
            project,
            session,
            load: None,
        }
    }

    /// Open an edit dialog for `existing`. The form stays disabled until
    /// [`load`](Self::load) has fetched the canonical record.
    pub fn edit(service: Arc<S>, existing: &MetadataRecord, project: ProjectContext) -> Self {
        let (session, ticket) = EditSession::loading(EditAction::Edit);
        Self {
            service,
            kind: existing.kind(),
            project,
            session,
            load: Some((ticket, existing.abbreviation().to_string())),
        }
    }

    /// Fetch the canonical record for an edit dialog.
    ///
    /// Issues one fetch; later calls, and calls on add dialogs, return
    /// [`Completion::Stale`] without touching the service.
    pub async fn load(&mut self) -> Completion {
        let Some((ticket, key)) = self.load.take() else {
            return Completion::Stale;
        };
        log::info!(
            "Loading {} {key} ({}/{})",
            self.kind.label(),
            self.project.terminology,
            self.project.version
        );
        let result = self.fetch(&key).await;
        self.session.complete_load(ticket, result)
    }

    async fn fetch(&self, key: &str) -> CoreResult<MetadataRecord> {
        let (terminology, version) = (&self.project.terminology, &self.project.version);
        match self.kind {
            MetadataKind::TermType => self
                .service
                .get_term_type(key, terminology, version)
                .await
                .map(MetadataRecord::TermType),
            MetadataKind::AttributeName => self
                .service
                .get_attribute_name(key, terminology, version)
                .await
                .map(MetadataRecord::AttributeName),
        }
    }

    pub fn kind(&self) -> MetadataKind {
        self.kind
    }

    pub fn project(&self) -> &ProjectContext {
        &self.project
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn record(&self) -> Option<&MetadataRecord> {
        self.session.record()
    }

    /// The form's record, editable only while the dialog is ready.
    pub fn record_mut(&mut self) -> Option<&mut MetadataRecord> {
        self.session.record_mut()
    }

    pub fn errors(&self) -> &ErrorList {
        self.session.errors()
    }

    pub fn outcome(&self) -> Option<&WorkflowOutcome<MetadataRecord>> {
        self.session.outcome()
    }

    /// Validate locally and reserve the single in-flight slot.
    ///
    /// A blank field blocks with a notice and leaves the error list as is;
    /// otherwise the list is cleared before sending.
    pub fn prepare_submit(&mut self) -> Result<PendingMetadataSubmit, SubmitError> {
        let operation = RemoteOperation::select(self.kind.into(), self.session.action());
        let (ticket, record) = self.session.begin_submit(|record, errors| {
            if !record.has_required_fields() {
                return Err(SubmitError::Blocked(BLANK_FIELDS_NOTICE.to_string()));
            }
            errors.clear();
            Ok(())
        })?;
        Ok(PendingMetadataSubmit {
            ticket,
            operation,
            record,
        })
    }

    /// Send a prepared submit to the service.
    pub async fn dispatch(
        service: &S,
        operation: RemoteOperation,
        record: &MetadataRecord,
    ) -> CoreResult<Option<MetadataRecord>> {
        log::debug!("Calling {}", operation.name());
        match (operation, record) {
            (RemoteOperation::AddTermType, MetadataRecord::TermType(t)) => service
                .add_term_type(t)
                .await
                .map(|r| Some(MetadataRecord::TermType(r))),
            (RemoteOperation::UpdateTermType, MetadataRecord::TermType(t)) => service
                .update_term_type(t)
                .await
                .map(|r| r.map(MetadataRecord::TermType)),
            (RemoteOperation::AddAttributeName, MetadataRecord::AttributeName(a)) => service
                .add_attribute_name(a)
                .await
                .map(|r| Some(MetadataRecord::AttributeName(r))),
            (RemoteOperation::UpdateAttributeName, MetadataRecord::AttributeName(a)) => service
                .update_attribute_name(a)
                .await
                .map(|r| r.map(MetadataRecord::AttributeName)),
            (op, record) => Err(CoreError::ValidationError(format!(
                "{} cannot submit a {}",
                op.name(),
                record.kind().label()
            ))),
        }
    }

    /// Apply the service response to a prepared submit.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: CoreResult<Option<MetadataRecord>>,
    ) -> Completion {
        self.session.complete_submit(ticket, result)
    }

    /// Validate, send and apply in one step.
    ///
    /// Returns the canonical record once the dialog has closed.
    pub async fn submit(&mut self) -> Result<MetadataRecord, SubmitError> {
        let pending = self.prepare_submit()?;
        let result = Self::dispatch(&self.service, pending.operation, &pending.record).await;
        match self.finish_submit(pending.ticket, result) {
            Completion::Applied => match self.session.outcome() {
                Some(WorkflowOutcome::Success(record)) => Ok(record.clone()),
                _ => Err(SubmitError::Ended),
            },
            Completion::Rejected => Err(SubmitError::Remote),
            Completion::Stale => Err(SubmitError::Ended),
        }
    }

    /// Dismiss the dialog.
    pub fn cancel(&mut self) -> WorkflowOutcome<MetadataRecord> {
        self.load = None;
        self.session.cancel()
    }
}
