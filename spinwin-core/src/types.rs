use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One slice of the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub kind: PrizeKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeKind {
    #[default]
    Reward,
    /// Lands the visitor back on the wheel without claiming anything.
    SpinAgain,
}

impl Prize {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            weight: None,
            kind: PrizeKind::Reward,
        }
    }

    pub fn weighted(label: impl Into<String>, weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Self::new(label)
        }
    }

    pub fn spin_again(label: impl Into<String>) -> Self {
        Self {
            kind: PrizeKind::SpinAgain,
            ..Self::new(label)
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn is_spin_again(&self) -> bool {
        self.kind == PrizeKind::SpinAgain
    }
}

/// Reveal sequence stages, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Idle,
    Spinning,
    StopRequested,
    Aligning,
    ConfettiOn,
    Submitting,
    Revealed,
}

impl Stage {
    /// A spin is in flight from the moment it starts until the result panel shows.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Stage::Spinning
                | Stage::StopRequested
                | Stage::Aligning
                | Stage::ConfettiOn
                | Stage::Submitting
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinState {
    pub stage: Stage,
    pub selected_index: Option<usize>,
    pub email: String,
    pub spin_id: Option<Uuid>,
    /// Wheel turns taken for the current spin, spin-again cycles included.
    pub attempts: u32,
    pub revealed: Option<Prize>,
}

impl Default for SpinState {
    fn default() -> Self {
        Self {
            stage: Stage::Idle,
            selected_index: None,
            email: String::new(),
            spin_id: None,
            attempts: 0,
            revealed: None,
        }
    }
}

/// What the wheel renderer is asked to animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinRequest {
    pub prize_index: usize,
    pub slice_count: usize,
}

/// Email/prize pair forwarded to the form collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub spin_id: Uuid,
    pub email: String,
    pub prize_label: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Delivered,
    Rejected { status: u16 },
    Failed { reason: String },
}

impl SubmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmitOutcome::Delivered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A dismissible message for the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
