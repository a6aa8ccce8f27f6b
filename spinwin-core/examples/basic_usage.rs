use spinwin_core::{Collaborators, PrizeWheel, Timing, WheelConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut config = WheelConfig::default();
    config.timing = Timing::instant();

    println!("Prizes on the wheel:");
    for (i, prize) in config.catalog.iter().enumerate() {
        println!("  {}. {}", i + 1, prize.label);
    }

    let wheel = PrizeWheel::new(config, Collaborators::headless())?;

    println!("\nSpinning...");
    let reveal = wheel.play("visitor@example.com").await?;

    println!("You've won: {}", reveal.prize.label);
    println!("Spin ID: {}", reveal.spin_id);
    println!("Claim link: {}", wheel.claim()?);

    wheel.dispose();
    Ok(())
}
