//! Edit session state machine
//!
//! A session lives from the moment an add/edit dialog opens until it closes
//! with a record or is dismissed. Remote requests are split into a `begin_*`
//! step that hands out a [`Ticket`] and a `complete_*` step that consumes it,
//! so a completion that no longer matches the session is dropped.

use serde::Serialize;
use termadmin_core::error::CoreResult;
use termadmin_core::types::{AttributeName, MetadataRecord, TermType, WorkflowConfig};
use thiserror::Error;
use uuid::Uuid;

use super::operation::EditAction;

/// Lifecycle of one edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the canonical record; the form is disabled.
    Initializing,
    /// The form is editable and can be submitted.
    Ready,
    /// One submit request is in flight.
    Submitting,
    /// Submitted successfully.
    Closed,
    /// Cancelled by the user.
    Dismissed,
    /// The record could not be loaded; the session cannot continue.
    Failed(String),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Dismissed | Self::Failed(_))
    }
}

/// Terminal result handed back to whoever opened the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome<R> {
    Success(R),
    Cancelled,
}

impl<R> WorkflowOutcome<R> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_record(self) -> Option<R> {
        match self {
            Self::Success(record) => Some(record),
            Self::Cancelled => None,
        }
    }
}

/// Identifies one in-flight request of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    session: Uuid,
    seq: u64,
}

/// What happened to a completion handed to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied.
    Applied,
    /// The request failed; see the error list or the failed state.
    Rejected,
    /// The session had moved on; the result was ignored.
    Stale,
}

/// Why a submit did not reach the remote service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    Busy,
    #[error("The form is not ready")]
    NotReady,
    #[error("The session has ended")]
    Ended,
    /// Blocking notice, shown modally; the error list is untouched.
    #[error("{0}")]
    Blocked(String),
    /// Validation failed; messages are in the error list.
    #[error("Validation failed")]
    Invalid,
    /// The remote service rejected the request; the message is in the error list.
    #[error("Submission failed")]
    Remote,
}

/// Ordered error messages of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<String>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Discard prior messages and keep only `message`.
    pub fn replace_with(&mut self, message: impl Into<String>) {
        self.0.clear();
        self.0.push(message.into());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// State, local record and errors of one add/edit dialog.
#[derive(Debug)]
pub struct EditSession<R> {
    id: Uuid,
    action: EditAction,
    state: SessionState,
    record: Option<R>,
    errors: ErrorList,
    in_flight: Option<Ticket>,
    next_seq: u64,
    outcome: Option<WorkflowOutcome<R>>,
}

impl<R: Clone> EditSession<R> {
    /// A session whose record is available locally.
    pub fn ready(action: EditAction, record: R) -> Self {
        let session = Self::blank(action, SessionState::Ready, Some(record));
        log::debug!("Edit session {} opened ({action:?})", session.id);
        session
    }

    /// A session that waits for the canonical record. Returns the load ticket.
    pub fn loading(action: EditAction) -> (Self, Ticket) {
        let mut session = Self::blank(action, SessionState::Initializing, None);
        let ticket = session.issue_ticket();
        log::debug!("Edit session {} opened, loading record", session.id);
        (session, ticket)
    }

    fn blank(action: EditAction, state: SessionState, record: Option<R>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            state,
            record,
            errors: ErrorList::new(),
            in_flight: None,
            next_seq: 0,
            outcome: None,
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            session: self.id,
            seq: self.next_seq,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Take `ticket` out of flight if it is the current request.
    fn accept(&mut self, ticket: Ticket, expected: &SessionState) -> bool {
        if ticket.session != self.id || self.in_flight != Some(ticket) || &self.state != expected
        {
            log::debug!(
                "Edit session {}: ignoring stale completion #{} (state {:?})",
                self.id,
                ticket.seq,
                self.state
            );
            return false;
        }
        self.in_flight = None;
        true
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn action(&self) -> EditAction {
        self.action
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn record(&self) -> Option<&R> {
        self.record.as_ref()
    }

    /// The editable record; `None` unless the form is [`SessionState::Ready`].
    pub fn record_mut(&mut self) -> Option<&mut R> {
        if self.state == SessionState::Ready {
            self.record.as_mut()
        } else {
            None
        }
    }

    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }

    pub fn outcome(&self) -> Option<&WorkflowOutcome<R>> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<WorkflowOutcome<R>> {
        self.outcome
    }

    /// Apply the result of the initial fetch.
    ///
    /// A failed fetch ends the session in [`SessionState::Failed`].
    pub fn complete_load(&mut self, ticket: Ticket, result: CoreResult<R>) -> Completion {
        if !self.accept(ticket, &SessionState::Initializing) {
            return Completion::Stale;
        }
        match result {
            Ok(record) => {
                self.record = Some(record);
                self.state = SessionState::Ready;
                log::debug!("Edit session {} loaded", self.id);
                Completion::Applied
            }
            Err(e) => {
                e.log(&format!("Edit session {} failed to load", self.id));
                self.state = SessionState::Failed(e.to_string());
                Completion::Rejected
            }
        }
    }

    /// Validate and move to [`SessionState::Submitting`].
    ///
    /// `validate` may adjust the record and the error list. On success the
    /// returned copy of the record is what must be sent.
    pub fn begin_submit<F>(&mut self, validate: F) -> Result<(Ticket, R), SubmitError>
    where
        F: FnOnce(&mut R, &mut ErrorList) -> Result<(), SubmitError>,
    {
        match self.state {
            SessionState::Ready => {}
            SessionState::Submitting => return Err(SubmitError::Busy),
            SessionState::Initializing => return Err(SubmitError::NotReady),
            SessionState::Closed | SessionState::Dismissed | SessionState::Failed(_) => {
                return Err(SubmitError::Ended)
            }
        }
        let Some(record) = self.record.as_mut() else {
            return Err(SubmitError::NotReady);
        };

        if let Err(rejection) = validate(record, &mut self.errors) {
            log::debug!("Edit session {}: submit rejected: {rejection}", self.id);
            return Err(rejection);
        }

        let payload = record.clone();
        self.state = SessionState::Submitting;
        let ticket = self.issue_ticket();
        log::info!("Edit session {}: submitting ({:?})", self.id, self.action);
        Ok((ticket, payload))
    }

    /// Apply the remote response to a submit.
    ///
    /// `Ok(None)` means the service did not echo a record; the submitted local
    /// record becomes the result.
    pub fn complete_submit(&mut self, ticket: Ticket, result: CoreResult<Option<R>>) -> Completion {
        if !self.accept(ticket, &SessionState::Submitting) {
            return Completion::Stale;
        }
        match result {
            Ok(canonical) => {
                let record = canonical.or_else(|| self.record.clone());
                match record {
                    Some(record) => {
                        self.record = Some(record.clone());
                        self.outcome = Some(WorkflowOutcome::Success(record));
                        self.state = SessionState::Closed;
                        log::info!("Edit session {} closed", self.id);
                        Completion::Applied
                    }
                    None => {
                        self.state = SessionState::Ready;
                        Completion::Rejected
                    }
                }
            }
            Err(e) => {
                e.log(&format!("Edit session {}: submit failed", self.id));
                self.errors.replace_with(e.to_string());
                self.state = SessionState::Ready;
                Completion::Rejected
            }
        }
    }

    /// Dismiss the dialog. A session that already closed keeps its success.
    pub fn cancel(&mut self) -> WorkflowOutcome<R> {
        if self.state == SessionState::Closed {
            if let Some(outcome) = &self.outcome {
                return outcome.clone();
            }
        }
        if self.in_flight.take().is_some() {
            log::debug!("Edit session {}: dismissed with a request in flight", self.id);
        }
        self.state = SessionState::Dismissed;
        self.outcome = Some(WorkflowOutcome::Cancelled);
        log::info!("Edit session {} dismissed", self.id);
        WorkflowOutcome::Cancelled
    }
}

/// Records an invoking list can merge a session result into.
pub trait Keyed {
    type Key: PartialEq;

    /// `None` for records the server has not identified yet.
    fn record_key(&self) -> Option<Self::Key>;
}

impl Keyed for WorkflowConfig {
    type Key = i64;

    fn record_key(&self) -> Option<i64> {
        self.id
    }
}

impl Keyed for TermType {
    type Key = (String, String, String);

    fn record_key(&self) -> Option<Self::Key> {
        Some((
            self.terminology.clone(),
            self.version.clone(),
            self.abbreviation.clone(),
        ))
    }
}

impl Keyed for AttributeName {
    type Key = (String, String, String);

    fn record_key(&self) -> Option<Self::Key> {
        Some((
            self.terminology.clone(),
            self.version.clone(),
            self.abbreviation.clone(),
        ))
    }
}

impl Keyed for MetadataRecord {
    type Key = (termadmin_core::types::MetadataKind, String, String, String);

    fn record_key(&self) -> Option<Self::Key> {
        Some((
            self.kind(),
            self.terminology().to_string(),
            self.version().to_string(),
            self.abbreviation().to_string(),
        ))
    }
}

/// Replace the entry with the same key, or append.
pub fn merge_record<R: Keyed>(list: &mut Vec<R>, record: R) {
    let existing = record
        .record_key()
        .and_then(|key| list.iter().position(|r| r.record_key().as_ref() == Some(&key)));
    match existing {
        Some(index) => list[index] = record,
        None => list.push(record),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use termadmin_core::error::CoreError;

    fn accept_all(_: &mut WorkflowConfig, _: &mut ErrorList) -> Result<(), SubmitError> {
        Ok(())
    }

    #[test]
    fn load_success_makes_form_editable() {
        let (mut session, ticket) = EditSession::<WorkflowConfig>::loading(EditAction::Edit);
        assert_eq!(session.state(), &SessionState::Initializing);
        assert!(session.record_mut().is_none());

        let fetched = WorkflowConfig::with_type("QA");
        assert_eq!(
            session.complete_load(ticket, Ok(fetched.clone())),
            Completion::Applied
        );
        assert_eq!(session.state(), &SessionState::Ready);
        assert_eq!(session.record(), Some(&fetched));
        assert!(session.record_mut().is_some());
    }

    #[test]
    fn load_failure_is_fatal() {
        let (mut session, ticket) = EditSession::<WorkflowConfig>::loading(EditAction::Edit);
        let result = session.complete_load(ticket, Err(CoreError::Remote("gone".into())));
        assert_eq!(result, Completion::Rejected);
        assert_eq!(session.state(), &SessionState::Failed("gone".to_string()));
        assert_eq!(session.begin_submit(accept_all), Err(SubmitError::Ended));
    }

    #[test]
    fn submit_while_loading_is_rejected() {
        let (mut session, _ticket) = EditSession::<WorkflowConfig>::loading(EditAction::Edit);
        assert_eq!(session.begin_submit(accept_all), Err(SubmitError::NotReady));
    }

    #[test]
    fn second_submit_while_in_flight_is_busy() {
        let mut session = EditSession::ready(EditAction::Add, WorkflowConfig::with_type("QA"));
        let (ticket, payload) = session.begin_submit(accept_all).unwrap();
        assert_eq!(payload.config_type, "QA");
        assert_eq!(session.state(), &SessionState::Submitting);
        assert!(session.record_mut().is_none());
        assert_eq!(session.begin_submit(accept_all), Err(SubmitError::Busy));

        let mut stored = payload.clone();
        stored.id = Some(4);
        assert_eq!(
            session.complete_submit(ticket, Ok(Some(stored.clone()))),
            Completion::Applied
        );
        assert_eq!(session.outcome(), Some(&WorkflowOutcome::Success(stored)));
    }

    #[test]
    fn missing_echo_falls_back_to_local_record() {
        let mut session = EditSession::ready(EditAction::Edit, WorkflowConfig::with_type("QA"));
        let (ticket, _) = session.begin_submit(accept_all).unwrap();
        session.complete_submit(ticket, Ok(None));
        assert_eq!(session.state(), &SessionState::Closed);
        assert_eq!(
            session.into_outcome(),
            Some(WorkflowOutcome::Success(WorkflowConfig::with_type("QA")))
        );
    }

    #[test]
    fn remote_failure_replaces_errors_and_allows_retry() {
        let mut session = EditSession::ready(EditAction::Add, WorkflowConfig::with_type("QA"));
        let (ticket, _) = session
            .begin_submit(|_, errors| {
                errors.push("old one");
                errors.push("old two");
                Ok(())
            })
            .unwrap();
        let result = session.complete_submit(ticket, Err(CoreError::Remote("E".into())));
        assert_eq!(result, Completion::Rejected);
        assert_eq!(session.errors().as_slice(), ["E".to_string()]);
        assert_eq!(session.state(), &SessionState::Ready);
        assert!(session.begin_submit(accept_all).is_ok());
    }

    #[test]
    fn completion_after_dismissal_is_stale() {
        let mut session = EditSession::ready(EditAction::Add, WorkflowConfig::with_type("QA"));
        let (ticket, payload) = session.begin_submit(accept_all).unwrap();
        assert_eq!(session.cancel(), WorkflowOutcome::Cancelled);
        assert_eq!(
            session.complete_submit(ticket, Ok(Some(payload))),
            Completion::Stale
        );
        assert_eq!(session.state(), &SessionState::Dismissed);
        assert_eq!(session.outcome(), Some(&WorkflowOutcome::Cancelled));
    }

    #[test]
    fn old_ticket_is_stale_after_retry() {
        let mut session = EditSession::ready(EditAction::Add, WorkflowConfig::with_type("QA"));
        let (first, _) = session.begin_submit(accept_all).unwrap();
        session.complete_submit(first, Err(CoreError::Remote("E".into())));
        let (second, _) = session.begin_submit(accept_all).unwrap();
        assert_ne!(first, second);
        assert_eq!(session.complete_submit(first, Ok(None)), Completion::Stale);
        assert_eq!(session.complete_submit(second, Ok(None)), Completion::Applied);
    }

    #[test]
    fn cancel_after_success_keeps_success() {
        let mut session = EditSession::ready(EditAction::Add, WorkflowConfig::with_type("QA"));
        let (ticket, _) = session.begin_submit(accept_all).unwrap();
        session.complete_submit(ticket, Ok(None));
        assert!(session.cancel().is_success());
        assert_eq!(session.state(), &SessionState::Closed);
    }

    #[test]
    fn merge_replaces_by_key_or_appends() {
        let mut list = vec![
            WorkflowConfig {
                id: Some(1),
                ..WorkflowConfig::with_type("A")
            },
            WorkflowConfig {
                id: Some(2),
                ..WorkflowConfig::with_type("B")
            },
        ];
        merge_record(
            &mut list,
            WorkflowConfig {
                id: Some(2),
                admin_config: true,
                ..WorkflowConfig::with_type("B")
            },
        );
        assert_eq!(list.len(), 2);
        assert!(list[1].admin_config);

        merge_record(&mut list, WorkflowConfig::with_type("C"));
        merge_record(&mut list, WorkflowConfig::with_type("D"));
        assert_eq!(list.len(), 4);
    }
}
