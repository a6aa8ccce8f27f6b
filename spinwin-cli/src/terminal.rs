use async_trait::async_trait;
use spinwin_core::{
    Calibration, Catalog, Notice, NoticeLevel, Notifier, Overlay, SpinRequest, WheelRenderer,
};
use std::io::Write;
use std::time::Duration;

const SPIN_LOOPS: usize = 3;
const FIRST_TICK_MS: u64 = 40;
const LAST_TICK_MS: u64 = 220;

/// Text wheel: cycles labels past a pointer and slows down onto the slice
/// the pointer will show.
pub struct TerminalWheel {
    catalog: Catalog,
    calibration: Calibration,
    animate: bool,
}

impl TerminalWheel {
    pub fn new(catalog: Catalog, calibration: Calibration, animate: bool) -> Self {
        Self {
            catalog,
            calibration,
            animate,
        }
    }

    fn tick_delay(step: usize, total: usize) -> Duration {
        let progress = step as f64 / total.max(1) as f64;
        let ms = FIRST_TICK_MS as f64 + (LAST_TICK_MS - FIRST_TICK_MS) as f64 * progress * progress;
        Duration::from_millis(ms as u64)
    }
}

#[async_trait]
impl WheelRenderer for TerminalWheel {
    async fn spin(&self, request: SpinRequest) {
        let n = request.slice_count;
        let target = self
            .calibration
            .aligned_index(n, request.prize_index)
            .unwrap_or(request.prize_index);

        if !self.animate {
            return;
        }

        let total = SPIN_LOOPS * n + target;
        let mut stdout = std::io::stdout();
        for step in 0..=total {
            let label = self
                .catalog
                .get(step % n)
                .map(|p| p.label.as_str())
                .unwrap_or("?");
            let _ = write!(stdout, "\r\x1b[2K  ▶ {}", label);
            let _ = stdout.flush();
            tokio::time::sleep(Self::tick_delay(step, total)).await;
        }
        let _ = writeln!(stdout);
    }
}

pub struct TerminalOverlay;

impl Overlay for TerminalOverlay {
    fn show(&self) {
        println!("  🎉 🎊 ✨ 🎉 🎊 ✨ 🎉 🎊 ✨ 🎉");
    }

    fn clear(&self) {
        tracing::debug!("Confetti cleared");
    }
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => eprintln!("  ✖ {}", notice.message),
            NoticeLevel::Success => println!("  ✔ {}", notice.message),
            NoticeLevel::Info => println!("  ℹ {}", notice.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_slow_down() {
        let first = TerminalWheel::tick_delay(0, 20);
        let last = TerminalWheel::tick_delay(20, 20);
        assert_eq!(first, Duration::from_millis(FIRST_TICK_MS));
        assert_eq!(last, Duration::from_millis(LAST_TICK_MS));
        assert!(TerminalWheel::tick_delay(10, 20) < last);
    }

    #[tokio::test]
    async fn test_static_wheel_returns_immediately() {
        let wheel = TerminalWheel::new(Catalog::default(), Calibration::HalfTurn, false);
        wheel
            .spin(SpinRequest {
                prize_index: 0,
                slice_count: 6,
            })
            .await;
    }
}
