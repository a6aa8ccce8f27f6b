use crate::terminal::{TerminalNotifier, TerminalOverlay, TerminalWheel};
use clap::Args;
use dialoguer::{Confirm, Input};
use spinwin_core::{
    Collaborators, HttpFormSink, LogSink, PrizeWheel, Result, SpinError, SubmissionSink, Timing,
    TokioScheduler, WheelConfig,
};
use std::sync::Arc;
use std::time::Duration;

const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct PlayArgs {
    /// Visitor email (prompted for when omitted)
    #[arg(short, long)]
    email: Option<String>,
    /// Log the submission instead of posting it to the collector
    #[arg(long)]
    dry_run: bool,
    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,
    /// Skip animation and pacing delays
    #[arg(long)]
    instant: bool,
}

fn build_sink(config: &WheelConfig, dry_run: bool) -> Result<Arc<dyn SubmissionSink>> {
    if dry_run {
        return Ok(Arc::new(LogSink));
    }

    match HttpFormSink::from_config(&config.collector)? {
        Some(sink) => {
            tracing::debug!("Submitting results to {}", sink.url());
            Ok(Arc::new(sink))
        }
        None => {
            tracing::info!("No collector configured, submissions are only logged");
            Ok(Arc::new(LogSink))
        }
    }
}

fn prompt_email() -> Result<String> {
    Input::<String>::new()
        .with_prompt("Enter your email")
        .interact_text()
        .map_err(|e| SpinError::internal(format!("Prompt failed: {}", e)))
}

pub async fn play(args: PlayArgs, mut config: WheelConfig) -> Result<()> {
    if args.instant {
        config.timing = Timing::instant();
    }

    let collaborators = Collaborators {
        renderer: Arc::new(TerminalWheel::new(
            config.catalog.clone(),
            config.calibration,
            !args.instant,
        )),
        overlay: Arc::new(TerminalOverlay),
        notifier: Arc::new(TerminalNotifier),
        sink: build_sink(&config, args.dry_run)?,
        scheduler: Arc::new(TokioScheduler),
    };

    let wheel = match args.seed {
        Some(seed) => PrizeWheel::with_seed(config, collaborators, seed)?,
        None => PrizeWheel::new(config, collaborators)?,
    };

    let interactive = args.email.is_none();

    println!("Win amazing prizes this week! Enter your email to spin the wheel.");
    println!();

    let reveal = loop {
        let email = match &args.email {
            Some(email) => email.clone(),
            None => prompt_email()?,
        };

        let outcome = tokio::select! {
            outcome = wheel.play(&email) => outcome,
            _ = tokio::signal::ctrl_c() => {
                wheel.dispose();
                return Err(SpinError::Disposed);
            }
        };

        match outcome {
            Ok(reveal) => break reveal,
            // the notifier already told the visitor what was wrong
            Err(SpinError::InvalidEmail(_)) if interactive => continue,
            Err(e) => return Err(e),
        }
    };

    println!();
    println!("🎉 Surprise Gift Awaits!");
    println!("You've won: {}", reveal.prize.label);
    if reveal.attempts > 1 {
        println!("(after {} spins)", reveal.attempts);
    }
    println!();

    let claim = if interactive {
        Confirm::new()
            .with_prompt("Claim now?")
            .default(true)
            .interact()
            .map_err(|e| SpinError::internal(format!("Prompt failed: {}", e)))?
    } else {
        true
    };

    if claim {
        let link = wheel.claim()?;
        println!("Open this link to claim your prize:");
        println!("{}", link);
    }

    let outcomes = wheel.flush_submissions(FLUSH_TIMEOUT).await;
    tracing::debug!("Submission outcomes: {:?}", outcomes);

    wheel.dispose();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_ignores_collector() {
        let mut config = WheelConfig::default();
        config.collector.url = Some("https://forms.example.com/submit".to_string());

        assert!(build_sink(&config, true).is_ok());
        assert!(build_sink(&config, false).is_ok());
    }

    #[test]
    fn test_bad_collector_url_surfaces() {
        let mut config = WheelConfig::default();
        config.collector.url = Some("::nope::".to_string());
        assert!(matches!(
            build_sink(&config, false),
            Err(SpinError::Config(_))
        ));
    }
}
