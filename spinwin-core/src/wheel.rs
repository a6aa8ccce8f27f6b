use crate::config::WheelConfig;
use crate::error::{Result, SpinError};
use crate::render::{Headless, Notifier, Overlay, WheelRenderer};
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::selector::select_index;
use crate::sink::{LogSink, SubmissionSink};
use crate::types::{Notice, Prize, SpinRequest, SpinState, Stage, Submission, SubmitOutcome};
use crate::validation::validate_email;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Everything the wheel talks to outside itself.
#[derive(Clone)]
pub struct Collaborators {
    pub renderer: Arc<dyn WheelRenderer>,
    pub overlay: Arc<dyn Overlay>,
    pub notifier: Arc<dyn Notifier>,
    pub sink: Arc<dyn SubmissionSink>,
    pub scheduler: Arc<dyn Scheduler>,
}

impl Collaborators {
    /// Log-only rendering, dry-run submissions, real timers.
    pub fn headless() -> Self {
        Self {
            renderer: Arc::new(Headless),
            overlay: Arc::new(Headless),
            notifier: Arc::new(Headless),
            sink: Arc::new(LogSink),
            scheduler: Arc::new(TokioScheduler),
        }
    }
}

/// Result of the "animation complete" signal.
#[derive(Debug, Clone)]
pub enum StopOutcome {
    /// The pointer landed on a spin-again slice; the wheel is already
    /// spinning again towards `selected_index`.
    SpinAgain { selected_index: usize },
    Revealed(Reveal),
}

#[derive(Debug, Clone)]
pub struct Reveal {
    pub spin_id: Uuid,
    pub prize: Prize,
    pub claim_link: String,
    pub attempts: u32,
}

pub struct PrizeWheel {
    config: WheelConfig,
    state: RwLock<SpinState>,
    rng: Mutex<StdRng>,
    renderer: Arc<dyn WheelRenderer>,
    overlay: Arc<dyn Overlay>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn SubmissionSink>,
    scheduler: Arc<dyn Scheduler>,
    timers: Mutex<Vec<JoinHandle<()>>>,
    submissions: Mutex<Vec<JoinHandle<SubmitOutcome>>>,
    disposed: AtomicBool,
    shutdown: Notify,
}

impl PrizeWheel {
    pub fn new(config: WheelConfig, collaborators: Collaborators) -> Result<Self> {
        Self::with_rng(config, collaborators, StdRng::from_entropy())
    }

    /// Reproducible draws, for tests and simulations.
    pub fn with_seed(config: WheelConfig, collaborators: Collaborators, seed: u64) -> Result<Self> {
        Self::with_rng(config, collaborators, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: WheelConfig, collaborators: Collaborators, rng: StdRng) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            "Prize wheel ready with {} slices ({})",
            config.catalog.len(),
            if config.catalog.is_uniform() {
                "uniform"
            } else {
                "weighted"
            }
        );

        Ok(Self {
            config,
            state: RwLock::new(SpinState::default()),
            rng: Mutex::new(rng),
            renderer: collaborators.renderer,
            overlay: collaborators.overlay,
            notifier: collaborators.notifier,
            sink: collaborators.sink,
            scheduler: collaborators.scheduler,
            timers: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
            shutdown: Notify::new(),
        })
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn state(&self) -> SpinState {
        self.state.read().clone()
    }

    pub fn stage(&self) -> Stage {
        self.state.read().stage
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Visitor pressed "spin". Returns the slice the renderer should stop on.
    pub fn start_spin(&self, email: &str) -> Result<usize> {
        self.ensure_live()?;

        if self.stage().is_in_flight() {
            return Err(SpinError::SpinInProgress);
        }

        let email = match validate_email(email) {
            Ok(email) => email,
            Err(e) => {
                if let SpinError::InvalidEmail(msg) = &e {
                    self.notifier.notify(Notice::error(msg.clone()));
                }
                return Err(e);
            }
        };

        let mut state = self.state.write();
        if state.stage.is_in_flight() {
            return Err(SpinError::SpinInProgress);
        }

        if state.stage == Stage::Revealed {
            tracing::debug!("Resetting wheel after previous reveal");
        }

        let index = self.draw();
        let spin_id = Uuid::new_v4();
        *state = SpinState {
            stage: Stage::Spinning,
            selected_index: Some(index),
            email,
            spin_id: Some(spin_id),
            attempts: 1,
            revealed: None,
        };

        tracing::info!("Spin {} started, selected slice {}", spin_id, index);
        Ok(index)
    }

    /// The renderer finished its animation. Runs the reveal sequence through
    /// to the result panel, or re-arms the wheel on a spin-again slice.
    pub async fn handle_stop(&self) -> Result<StopOutcome> {
        self.ensure_live()?;

        let (selected, spin_id, email, attempts) = {
            let mut state = self.state.write();
            if state.stage != Stage::Spinning {
                return Err(SpinError::invalid_state(format!(
                    "Stop signalled while {:?}",
                    state.stage
                )));
            }

            let selected = state
                .selected_index
                .ok_or_else(|| SpinError::internal("Spinning without a selected slice"))?;
            let spin_id = state
                .spin_id
                .ok_or_else(|| SpinError::internal("Spinning without a spin id"))?;

            state.stage = Stage::StopRequested;
            (selected, spin_id, state.email.clone(), state.attempts)
        };

        let result = self.run_reveal(selected, spin_id, email, attempts).await;

        if let Err(e) = &result {
            if !matches!(e, SpinError::Disposed) {
                tracing::error!("Reveal for spin {} failed: {}", spin_id, e);
                self.state.write().stage = Stage::Idle;
            }
        }

        result
    }

    async fn run_reveal(
        &self,
        selected: usize,
        spin_id: Uuid,
        email: String,
        attempts: u32,
    ) -> Result<StopOutcome> {
        let timing = &self.config.timing;

        self.delay(timing.settle_delay).await?;
        self.set_stage(Stage::Aligning);

        let prize = self
            .config
            .calibration
            .align_result(&self.config.catalog, selected)?
            .clone();

        if prize.is_spin_again() {
            tracing::info!(
                "Spin {} landed on '{}', spinning again",
                spin_id,
                prize.label
            );
            self.notifier.notify(Notice::info(format!("{}!", prize.label)));

            self.delay(timing.spin_again_delay).await?;

            let index = self.draw();
            {
                let mut state = self.state.write();
                state.stage = Stage::Spinning;
                state.selected_index = Some(index);
                state.attempts += 1;
            }

            tracing::debug!("Spin {} re-armed on slice {}", spin_id, index);
            return Ok(StopOutcome::SpinAgain {
                selected_index: index,
            });
        }

        self.set_stage(Stage::ConfettiOn);
        self.overlay.show();
        self.schedule_overlay_clear(timing.confetti_duration);

        self.set_stage(Stage::Submitting);
        self.spawn_submission(Submission {
            spin_id,
            email,
            prize_label: prize.label.clone(),
            submitted_at: Utc::now(),
        });

        self.delay(timing.reveal_delay).await?;

        let claim_link = self.config.claim.link_for(&prize.label)?;
        {
            let mut state = self.state.write();
            state.stage = Stage::Revealed;
            state.revealed = Some(prize.clone());
        }

        self.notifier
            .notify(Notice::success(format!("You've won: {}", prize.label)));
        tracing::info!("Spin {} revealed '{}'", spin_id, prize.label);

        Ok(StopOutcome::Revealed(Reveal {
            spin_id,
            prize,
            claim_link,
            attempts,
        }))
    }

    /// Drive a whole spin: start, animate, reveal, following spin-again
    /// slices until a reward comes up.
    pub async fn play(&self, email: &str) -> Result<Reveal> {
        let slice_count = self.config.catalog.len();
        let mut prize_index = self.start_spin(email)?;

        loop {
            self.renderer
                .spin(SpinRequest {
                    prize_index,
                    slice_count,
                })
                .await;

            match self.handle_stop().await? {
                StopOutcome::SpinAgain { selected_index } => prize_index = selected_index,
                StopOutcome::Revealed(reveal) => return Ok(reveal),
            }
        }
    }

    /// The "claim" action on the result panel: deep link to the chat.
    pub fn claim(&self) -> Result<String> {
        self.ensure_live()?;

        let prize = {
            let state = self.state.read();
            match (&state.stage, &state.revealed) {
                (Stage::Revealed, Some(prize)) => prize.clone(),
                _ => return Err(SpinError::invalid_state("No prize to claim yet")),
            }
        };

        let link = self.config.claim.link_for(&prize.label)?;
        self.notifier.notify(Notice::info("Redirecting to chat"));
        tracing::info!("Claim opened for '{}'", prize.label);
        Ok(link)
    }

    /// Wait up to `timeout` for submissions still in flight. Submissions that
    /// finished before a later one started have already been logged and are
    /// not reported again.
    pub async fn flush_submissions(&self, timeout: Duration) -> Vec<SubmitOutcome> {
        let handles: Vec<_> = std::mem::take(&mut *self.submissions.lock());
        let pending = handles.len();
        let mut outcomes = Vec::with_capacity(pending);

        let wait = async {
            for handle in handles {
                match handle.await {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => tracing::warn!("Submission task ended abnormally: {}", e),
                }
            }
        };

        if tokio::time::timeout(timeout, wait).await.is_err() {
            tracing::warn!(
                "Gave up waiting on submissions after {:?} ({} pending)",
                timeout,
                pending
            );
        }

        outcomes
    }

    /// Tear down: cancel pending timers and refuse further transitions.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.shutdown.notify_waiters();
        for timer in self.timers.lock().drain(..) {
            timer.abort();
        }

        tracing::info!("Prize wheel disposed");
    }

    fn draw(&self) -> usize {
        let mut rng = self.rng.lock();
        select_index(&self.config.catalog, &mut *rng)
    }

    fn set_stage(&self, stage: Stage) {
        let mut state = self.state.write();
        tracing::debug!("Stage {:?} -> {:?}", state.stage, stage);
        state.stage = stage;
    }

    fn ensure_live(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(SpinError::Disposed);
        }
        Ok(())
    }

    /// Cosmetic pause that aborts as soon as the wheel is disposed.
    async fn delay(&self, duration: Duration) -> Result<()> {
        // registered before the check so a concurrent dispose is never missed
        let shutdown = self.shutdown.notified();
        self.ensure_live()?;

        tokio::select! {
            _ = self.scheduler.sleep(duration) => {}
            _ = shutdown => {}
        }

        self.ensure_live()
    }

    fn schedule_overlay_clear(&self, after: Duration) {
        let overlay = self.overlay.clone();
        let scheduler = self.scheduler.clone();

        let handle = tokio::spawn(async move {
            scheduler.sleep(after).await;
            overlay.clear();
        });

        let mut timers = self.timers.lock();
        timers.retain(|timer| !timer.is_finished());
        timers.push(handle);
    }

    fn spawn_submission(&self, submission: Submission) {
        let sink = self.sink.clone();

        let handle = tokio::spawn(async move {
            let outcome = sink.submit(&submission).await;
            match &outcome {
                SubmitOutcome::Delivered => {
                    tracing::info!("Submission for spin {} delivered", submission.spin_id)
                }
                SubmitOutcome::Rejected { status } => tracing::warn!(
                    "Collector rejected submission for spin {} with status {}",
                    submission.spin_id,
                    status
                ),
                SubmitOutcome::Failed { reason } => tracing::warn!(
                    "Submission for spin {} failed: {}",
                    submission.spin_id,
                    reason
                ),
            }
            outcome
        });

        let mut submissions = self.submissions.lock();
        submissions.retain(|submission| !submission.is_finished());
        submissions.push(handle);
    }
}

impl Drop for PrizeWheel {
    fn drop(&mut self) {
        for timer in self.timers.get_mut().drain(..) {
            timer.abort();
        }
    }
}
