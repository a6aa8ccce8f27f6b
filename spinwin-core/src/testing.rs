//! Recording fakes for the wheel's collaborators.

use crate::render::{Notifier, Overlay, WheelRenderer};
use crate::scheduler::Scheduler;
use crate::sink::SubmissionSink;
use crate::types::{Notice, NoticeLevel, SpinRequest, Submission, SubmitOutcome};
use crate::wheel::Collaborators;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Shared, ordered record of every side effect.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().push(event.into());
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events.lock().iter().position(|e| e == event)
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

/// Returns immediately, except for delays at or above `hang_from`, which
/// never complete.
pub struct FakeScheduler {
    log: Arc<EventLog>,
    hang_from: Option<Duration>,
}

#[async_trait]
impl Scheduler for FakeScheduler {
    async fn sleep(&self, duration: Duration) {
        self.log.push(format!("sleep:{}ms", duration.as_millis()));
        match self.hang_from {
            Some(limit) if duration >= limit => std::future::pending::<()>().await,
            _ => tokio::task::yield_now().await,
        }
    }
}

pub struct FakeRenderer {
    log: Arc<EventLog>,
}

#[async_trait]
impl WheelRenderer for FakeRenderer {
    async fn spin(&self, request: SpinRequest) {
        self.log.push(format!("spin:{}", request.prize_index));
    }
}

pub struct FakeOverlay {
    log: Arc<EventLog>,
}

impl Overlay for FakeOverlay {
    fn show(&self) {
        self.log.push("overlay:show");
    }

    fn clear(&self) {
        self.log.push("overlay:clear");
    }
}

pub struct FakeNotifier {
    log: Arc<EventLog>,
    pub notices: Mutex<Vec<Notice>>,
}

impl FakeNotifier {
    pub fn errors(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .cloned()
            .collect()
    }
}

impl Notifier for FakeNotifier {
    fn notify(&self, notice: Notice) {
        self.log.push(format!("notify:{:?}", notice.level));
        self.notices.lock().push(notice);
    }
}

/// Answers with `outcome`, or never answers when `hang` is set.
pub struct FakeSink {
    log: Arc<EventLog>,
    outcome: SubmitOutcome,
    hang: bool,
    pub received: Mutex<Vec<Submission>>,
}

#[async_trait]
impl SubmissionSink for FakeSink {
    async fn submit(&self, submission: &Submission) -> SubmitOutcome {
        self.log.push("submit");
        self.received.lock().push(submission.clone());
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.outcome.clone()
    }
}

pub struct Harness {
    pub log: Arc<EventLog>,
    pub notifier: Arc<FakeNotifier>,
    pub sink: Arc<FakeSink>,
    pub collaborators: Collaborators,
}

pub struct HarnessBuilder {
    outcome: SubmitOutcome,
    hang_from: Option<Duration>,
    hang_sink: bool,
}

impl HarnessBuilder {
    pub fn sink_outcome(mut self, outcome: SubmitOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn hang_from(mut self, duration: Duration) -> Self {
        self.hang_from = Some(duration);
        self
    }

    pub fn hang_sink(mut self) -> Self {
        self.hang_sink = true;
        self
    }

    pub fn build(self) -> Harness {
        let log = Arc::new(EventLog::default());
        let notifier = Arc::new(FakeNotifier {
            log: log.clone(),
            notices: Mutex::new(Vec::new()),
        });
        let sink = Arc::new(FakeSink {
            log: log.clone(),
            outcome: self.outcome,
            hang: self.hang_sink,
            received: Mutex::new(Vec::new()),
        });

        let collaborators = Collaborators {
            renderer: Arc::new(FakeRenderer { log: log.clone() }),
            overlay: Arc::new(FakeOverlay { log: log.clone() }),
            notifier: notifier.clone(),
            sink: sink.clone(),
            scheduler: Arc::new(FakeScheduler {
                log: log.clone(),
                hang_from: self.hang_from,
            }),
        };

        Harness {
            log,
            notifier,
            sink,
            collaborators,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            outcome: SubmitOutcome::Delivered,
            hang_from: None,
            hang_sink: false,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }
}

/// Let spawned tasks run on the current-thread test runtime.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
