//! Presentation capabilities the wheel drives. Hosts plug in their own
//! rendering backend behind these traits.

use crate::types::{Notice, SpinRequest};
use async_trait::async_trait;

/// Animates the wheel; the returned future completing is the
/// "animation complete" signal.
#[async_trait]
pub trait WheelRenderer: Send + Sync {
    async fn spin(&self, request: SpinRequest);
}

/// Celebration overlay shown over the result.
pub trait Overlay: Send + Sync {
    fn show(&self);
    fn clear(&self);
}

/// Transient messages for the visitor.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Renders nothing; every effect goes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

#[async_trait]
impl WheelRenderer for Headless {
    async fn spin(&self, request: SpinRequest) {
        tracing::debug!(
            "Spinning to slice {} of {}",
            request.prize_index,
            request.slice_count
        );
    }
}

impl Overlay for Headless {
    fn show(&self) {
        tracing::debug!("Overlay shown");
    }

    fn clear(&self) {
        tracing::debug!("Overlay cleared");
    }
}

impl Notifier for Headless {
    fn notify(&self, notice: Notice) {
        tracing::info!("[{:?}] {}", notice.level, notice.message);
    }
}
