use anyhow::{Context, Result};
use clap::Parser;
use skywrangler_cli::{init_tracing, read_request, write_plan};
use skywrangler_core::{create_mission_with_config, PlannerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a survey mission .plan file", long_about = None)]
struct Args {
    /// Mission parameters JSON file, or `-` for stdin
    #[arg(long, short, default_value = "-")]
    request: PathBuf,

    /// Output .plan file, or `-` for stdout
    #[arg(long, short, default_value = "-")]
    output: PathBuf,

    /// Transit altitude above launch in meters
    #[arg(long, env = "SKYWRANGLER_SAFE_ALTITUDE")]
    safe_altitude: Option<f64>,

    /// Cruise and hover speed in m/s
    #[arg(long, env = "SKYWRANGLER_SPEED")]
    speed: Option<f64>,

    /// Ground station name written into the plan
    #[arg(long, env = "SKYWRANGLER_GROUND_STATION")]
    ground_station: Option<String>,

    /// Write the plan on a single line
    #[arg(long)]
    compact: bool,

    /// Debug logging for the planner
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn planner_config(&self) -> PlannerConfig {
        let mut config = PlannerConfig::default();
        if let Some(safe_altitude) = self.safe_altitude {
            config.safe_altitude_m = safe_altitude;
        }
        if let Some(speed) = self.speed {
            config.cruise_speed_mps = speed;
            config.hover_speed_mps = speed;
        }
        if let Some(ground_station) = &self.ground_station {
            config.ground_station = ground_station.clone();
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = args.planner_config();
    let request = read_request(&args.request)?;
    let plan = create_mission_with_config(&request, &config).context("failed to plan mission")?;
    write_plan(&plan, &args.output, args.compact)?;

    tracing::info!(
        output = %args.output.display(),
        items = plan.mission.items().len(),
        "wrote mission plan"
    );
    Ok(())
}
