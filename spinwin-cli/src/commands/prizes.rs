use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spinwin_core::{probabilities, select_index, PrizeKind, Result, SpinError, WheelConfig};

#[derive(Subcommand)]
pub enum PrizeCommands {
    /// List the prizes on the wheel
    List,
    /// Draw many spins and compare observed odds with the configured ones
    Simulate {
        /// Number of spins to draw
        #[arg(short, long, default_value_t = 10_000)]
        trials: usize,
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub async fn handle_prize_command(cmd: PrizeCommands, config: &WheelConfig) -> Result<()> {
    match cmd {
        PrizeCommands::List => list_prizes(config),
        PrizeCommands::Simulate { trials, seed } => simulate(config, trials, seed),
    }
}

/// Chance of each slice being the one the pointer shows.
fn award_chances(config: &WheelConfig) -> Result<Vec<f64>> {
    let n = config.catalog.len();
    let mut chances = vec![0.0; n];
    for (selected, p) in probabilities(&config.catalog).into_iter().enumerate() {
        chances[config.calibration.aligned_index(n, selected)?] += p;
    }
    Ok(chances)
}

fn kind_label(kind: PrizeKind) -> &'static str {
    match kind {
        PrizeKind::Reward => "reward",
        PrizeKind::SpinAgain => "spin again",
    }
}

fn list_prizes(config: &WheelConfig) -> Result<()> {
    let catalog = &config.catalog;
    let chances = award_chances(config)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Prize", "Kind", "Weight", "Chance"]);

    for (i, prize) in catalog.iter().enumerate() {
        table.add_row(vec![
            i.to_string(),
            prize.label.clone(),
            kind_label(prize.kind).to_string(),
            format!("{}", catalog.effective_weight(i)),
            format!("{:.1}%", chances[i] * 100.0),
        ]);
    }

    println!(
        "Prize wheel ({} slices, {}):",
        catalog.len(),
        if catalog.is_uniform() {
            "uniform"
        } else {
            "weighted"
        }
    );
    println!("{}", table);
    Ok(())
}

struct Tally {
    selected: Vec<usize>,
    awarded: Vec<usize>,
}

fn tally(config: &WheelConfig, trials: usize, rng: &mut StdRng) -> Result<Tally> {
    let n = config.catalog.len();
    let mut selected = vec![0usize; n];
    let mut awarded = vec![0usize; n];

    for _ in 0..trials {
        let index = select_index(&config.catalog, rng);
        selected[index] += 1;
        awarded[config.calibration.aligned_index(n, index)?] += 1;
    }

    Ok(Tally { selected, awarded })
}

fn simulate(config: &WheelConfig, trials: usize, seed: Option<u64>) -> Result<()> {
    if trials == 0 {
        return Err(SpinError::config("Trials must be greater than 0"));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let expected_selected = probabilities(&config.catalog);
    let expected_awarded = award_chances(config)?;
    let result = tally(config, trials, &mut rng)?;

    let pct = |count: usize| format!("{:.2}%", count as f64 * 100.0 / trials as f64);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "#",
        "Prize",
        "Selected (exp)",
        "Selected (obs)",
        "Awarded (exp)",
        "Awarded (obs)",
    ]);

    for (i, prize) in config.catalog.iter().enumerate() {
        table.add_row(vec![
            i.to_string(),
            prize.label.clone(),
            format!("{:.2}%", expected_selected[i] * 100.0),
            pct(result.selected[i]),
            format!("{:.2}%", expected_awarded[i] * 100.0),
            pct(result.awarded[i]),
        ]);
    }

    println!("Simulated {} spins:", trials);
    println!("{}", table);
    Ok(())
}
