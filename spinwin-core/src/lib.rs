//! spinwin - prize wheel engine
//!
//! Picks a prize (uniform or weighted), corrects the pick for where the
//! pointer sits on the rendered wheel, and paces the reveal: settle,
//! confetti, best-effort submission of the email/prize pair, result panel.
//! Rendering, timers and the form endpoint are injected.

pub mod aligner;
pub mod catalog;
pub mod config;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod selector;
pub mod sink;
pub mod types;
pub mod validation;
pub mod wheel;

#[cfg(test)]
pub(crate) mod testing;

pub use aligner::{align_result, Calibration};
pub use catalog::Catalog;
pub use config::{ClaimConfig, CollectorConfig, Timing, WheelConfig};
pub use error::{Result, SpinError};
pub use render::{Headless, Notifier, Overlay, WheelRenderer};
pub use scheduler::{Scheduler, TokioScheduler};
pub use selector::{probabilities, select_index};
pub use sink::{HttpFormSink, LogSink, SubmissionSink};
pub use types::{
    Notice, NoticeLevel, Prize, PrizeKind, SpinRequest, SpinState, Stage, Submission,
    SubmitOutcome,
};
pub use validation::validate_email;
pub use wheel::{Collaborators, PrizeWheel, Reveal, StopOutcome};
