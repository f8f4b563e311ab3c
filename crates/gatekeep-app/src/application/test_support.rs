// Shared collaborators for application tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gatekeep_domain::authorization::{AuthorizationManager, AuthorizationOutcome};
use gatekeep_domain::messages::{Command, CommandHandler, Message, Query, QueryHandler};
use gatekeep_domain::shared::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub id: u64,
}

impl Command for Ping {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetReport {
    pub id: u64,
}

impl Query for GetReport {
    type Result = Arc<Report>;
}

#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    pub id: u64,
}

/// Hands out monotonically increasing sequence numbers to observe call order
#[derive(Default)]
pub struct CallSequence {
    next: AtomicUsize,
    entries: Mutex<Vec<(&'static str, usize)>>,
}

impl CallSequence {
    pub fn record(&self, label: &'static str) -> usize {
        let seq = self.next.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().push((label, seq));
        seq
    }

    pub fn position_of(&self, label: &'static str) -> Option<usize> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, seq)| *seq)
    }
}

#[derive(Debug, Clone)]
pub enum Verdict {
    Allow,
    Deny(Option<String>),
    /// The check itself could not be evaluated
    Fail(String),
    /// Deny messages whose `id` is odd, allow the rest
    DenyOddIds,
}

/// Configurable, thread-safe authorization manager
pub struct StubAuthorizationManager {
    verdict: Mutex<Verdict>,
    calls: AtomicUsize,
    seen_ids: Mutex<Vec<u64>>,
    sequence: Option<Arc<CallSequence>>,
    delay: Option<Duration>,
}

impl StubAuthorizationManager {
    pub fn new(verdict: Verdict) -> Self {
        Self {
            verdict: Mutex::new(verdict),
            calls: AtomicUsize::new(0),
            seen_ids: Mutex::new(Vec::new()),
            sequence: None,
            delay: None,
        }
    }

    pub fn with_sequence(mut self, sequence: Arc<CallSequence>) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_verdict(&self, verdict: Verdict) {
        *self.verdict.lock().unwrap() = verdict;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_ids(&self) -> Vec<u64> {
        self.seen_ids.lock().unwrap().clone()
    }
}

fn message_id(message: &dyn Message) -> Option<u64> {
    message
        .downcast_ref::<Ping>()
        .map(|ping| ping.id)
        .or_else(|| message.downcast_ref::<GetReport>().map(|query| query.id))
}

#[async_trait]
impl AuthorizationManager for StubAuthorizationManager {
    async fn authorize(&self, message: &dyn Message) -> Result<AuthorizationOutcome, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let id = message_id(message);
        if let Some(id) = id {
            self.seen_ids.lock().unwrap().push(id);
        }
        if let Some(sequence) = &self.sequence {
            sequence.record("authorize");
        }

        let verdict = self.verdict.lock().unwrap().clone();
        match verdict {
            Verdict::Allow => Ok(AuthorizationOutcome::Authorized),
            Verdict::Deny(reason) => Ok(AuthorizationOutcome::Rejected { reason }),
            Verdict::Fail(msg) => Err(DomainError::Infrastructure(msg)),
            Verdict::DenyOddIds => match id {
                Some(id) if id % 2 == 1 => Ok(AuthorizationOutcome::rejected("odd id")),
                _ => Ok(AuthorizationOutcome::Authorized),
            },
        }
    }
}

/// Command handler that counts invocations and remembers what it saw
#[derive(Default)]
pub struct RecordingPingHandler {
    calls: AtomicUsize,
    seen_ids: Mutex<Vec<u64>>,
    sequence: Option<Arc<CallSequence>>,
    failure: Option<String>,
}

impl RecordingPingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sequence(mut self, sequence: Arc<CallSequence>) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_ids(&self) -> Vec<u64> {
        self.seen_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandHandler<Ping> for RecordingPingHandler {
    async fn handle(&self, command: Ping) -> Result<(), DomainError> {
        if let Some(sequence) = &self.sequence {
            sequence.record("handle");
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_ids.lock().unwrap().push(command.id);

        match &self.failure {
            Some(message) => Err(DomainError::Validation(message.clone())),
            None => Ok(()),
        }
    }
}

/// Query handler returning a shared report per id
///
/// `calls` counts reads that started, `completed` those that ran to the end.
#[derive(Default)]
pub struct ReportHandler {
    calls: AtomicUsize,
    completed: AtomicUsize,
    sequence: Option<Arc<CallSequence>>,
    delay: Option<Duration>,
}

impl ReportHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sequence(mut self, sequence: Arc<CallSequence>) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryHandler<GetReport> for ReportHandler {
    async fn read(&self, query: GetReport) -> Result<Arc<Report>, DomainError> {
        if let Some(sequence) = &self.sequence {
            sequence.record("read");
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(Report { id: query.id }))
    }
}
