use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use signal_sim::simulation::{
    self, ArrivalRates, Engine, Evaluator, Movement, PlanGrid, SignalPlan, Snapshot,
    DEFAULT_EW_GREEN, DEFAULT_HORIZON, DEFAULT_LOST, DEFAULT_NS_GREEN, DEFAULT_PED, DEFAULT_P_EW,
    DEFAULT_P_NS, DEFAULT_P_PED, DEFAULT_RUNS,
};

#[derive(Parser)]
#[command(name = "signal_sim")]
#[command(about = "Signalized intersection delay simulation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drive a single engine and print its state every simulated second
    Run {
        #[command(flatten)]
        plan: PlanArgs,

        #[command(flatten)]
        rates: RateArgs,

        /// Number of simulated seconds
        #[arg(long, default_value_t = 120)]
        seconds: u32,

        /// Seed for the arrival stream (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Print a snapshot every N simulated seconds
        #[arg(long, default_value_t = 1)]
        every: u32,
    },

    /// Mean delays of one plan over many seeded runs
    Evaluate {
        #[command(flatten)]
        plan: PlanArgs,

        #[command(flatten)]
        rates: RateArgs,

        #[command(flatten)]
        experiment: ExperimentArgs,

        /// Run the seeds one after another instead of on the thread pool
        #[arg(long)]
        sequential: bool,
    },

    /// Evaluate a grid of plans and report the trade-off extremes
    Sweep {
        #[command(flatten)]
        rates: RateArgs,

        #[command(flatten)]
        experiment: ExperimentArgs,

        /// Clearance seconds used by every plan in the grid
        #[arg(long, default_value_t = DEFAULT_LOST)]
        lost: u32,
    },
}

#[derive(Args)]
struct PlanArgs {
    /// North-south green time in seconds
    #[arg(long, default_value_t = DEFAULT_NS_GREEN)]
    ns_green: u32,

    /// East-west green time in seconds
    #[arg(long, default_value_t = DEFAULT_EW_GREEN)]
    ew_green: u32,

    /// All-red clearance time in seconds (used twice per cycle)
    #[arg(long, default_value_t = DEFAULT_LOST)]
    lost: u32,

    /// Pedestrian phase time in seconds
    #[arg(long, default_value_t = DEFAULT_PED)]
    ped: u32,
}

impl PlanArgs {
    fn to_plan(&self) -> Result<SignalPlan> {
        SignalPlan::new(self.ns_green, self.ew_green, self.lost, self.ped)
            .context("Invalid signal plan")
    }
}

#[derive(Args)]
struct RateArgs {
    /// Probability of a north-south vehicle arriving each second
    #[arg(long, default_value_t = DEFAULT_P_NS)]
    p_ns: f64,

    /// Probability of an east-west vehicle arriving each second
    #[arg(long, default_value_t = DEFAULT_P_EW)]
    p_ew: f64,

    /// Probability of a pedestrian arriving each second
    #[arg(long, default_value_t = DEFAULT_P_PED)]
    p_ped: f64,
}

impl RateArgs {
    fn to_rates(&self) -> Result<ArrivalRates> {
        ArrivalRates::new(self.p_ns, self.p_ew, self.p_ped).context("Invalid arrival rates")
    }
}

#[derive(Args)]
struct ExperimentArgs {
    /// Simulated seconds per run
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    horizon: u32,

    /// Number of seeded runs per plan
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    runs: u32,
}

impl ExperimentArgs {
    fn to_evaluator(&self, rates: ArrivalRates) -> Result<Evaluator> {
        Evaluator::new(rates, self.horizon, self.runs).context("Invalid experiment settings")
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,signal_sim=info"),
    )
    .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            plan,
            rates,
            seconds,
            seed,
            every,
        } => run_live(plan.to_plan()?, rates.to_rates()?, seconds, seed, every),
        Command::Evaluate {
            plan,
            rates,
            experiment,
            sequential,
        } => run_evaluate(
            plan.to_plan()?,
            experiment.to_evaluator(rates.to_rates()?)?,
            sequential,
        ),
        Command::Sweep {
            rates,
            experiment,
            lost,
        } => run_sweep(experiment.to_evaluator(rates.to_rates()?)?, lost),
    }
}

/// Drive one engine headless, printing snapshots as it goes
fn run_live(
    plan: SignalPlan,
    rates: ArrivalRates,
    seconds: u32,
    seed: Option<u64>,
    every: u32,
) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    info!("Running {} for {}s with seed {}", plan, seconds, seed);

    let mut engine =
        Engine::with_seed(plan, rates, seed).context("Failed to construct engine")?;

    println!("Initial state:");
    print_snapshot(&engine.snapshot());
    println!();

    let every = every.max(1);
    for second in 1..=seconds {
        let snap = engine.step();
        if second % every == 0 {
            print_snapshot(&snap);
        }
    }

    let snap = engine.snapshot();
    println!();
    println!("=== Final State ===");
    println!("Plan: {} (cycle {}s)", plan, plan.cycle_length());
    println!("Elapsed: {}s", snap.clock);
    println!("Vehicles queued: NS={} EW={}", snap.queue_ns, snap.queue_ew);
    println!("Pedestrians waiting: {}", snap.ped_queue);
    if snap.clock > 0 {
        let elapsed = snap.clock as f64;
        println!(
            "Average vehicle delay: {:.2}",
            snap.vehicle_delay as f64 / elapsed
        );
        println!(
            "Average pedestrian delay: {:.2}",
            snap.ped_delay as f64 / elapsed
        );
    }
    Ok(())
}

fn print_snapshot(snap: &Snapshot) {
    let signal = |movement: Movement| {
        if snap.phase.right_of_way() == Some(movement) {
            "GO"
        } else {
            "--"
        }
    };
    println!(
        "{} | NS:{} EW:{} PED:{}",
        snap,
        signal(Movement::NorthSouth),
        signal(Movement::EastWest),
        signal(Movement::Pedestrian)
    );
}

fn run_evaluate(plan: SignalPlan, evaluator: Evaluator, sequential: bool) -> Result<()> {
    #[cfg(feature = "parallel")]
    let metrics = if sequential {
        evaluator.evaluate(&plan)
    } else {
        evaluator.evaluate_parallel(&plan)
    };
    #[cfg(not(feature = "parallel"))]
    let metrics = {
        let _ = sequential;
        evaluator.evaluate(&plan)
    };
    let metrics = metrics.context("Evaluation failed")?;

    println!("Plan: {} (cycle {}s)", plan, plan.cycle_length());
    println!(
        "Runs: {} x {}s, p_ns={} p_ew={} p_ped={}",
        evaluator.runs,
        evaluator.horizon,
        evaluator.rates.p_ns,
        evaluator.rates.p_ew,
        evaluator.rates.p_ped
    );
    println!("Vehicle delay: {:.2}", metrics.vehicle);
    println!("Pedestrian delay: {:.2}", metrics.pedestrian);
    Ok(())
}

fn run_sweep(evaluator: Evaluator, lost: u32) -> Result<()> {
    let grid = PlanGrid {
        lost,
        ..PlanGrid::default()
    };
    let results = simulation::sweep(&evaluator, &grid).context("Sweep failed")?;

    for r in &results {
        println!(
            "NS={:2} EW={:2} PED={:2} | Vehicle={:7.2} Ped={:7.2}",
            r.plan.ns_green, r.plan.ew_green, r.plan.ped, r.metrics.vehicle, r.metrics.pedestrian
        );
    }

    println!();
    if let Some(best) = simulation::min_vehicle_delay(&results) {
        println!(
            "Min vehicle delay: {} | Vehicle={:.2} Ped={:.2}",
            best.plan, best.metrics.vehicle, best.metrics.pedestrian
        );
    }
    if let Some(best) = simulation::min_pedestrian_delay(&results) {
        println!(
            "Min pedestrian delay: {} | Vehicle={:.2} Ped={:.2}",
            best.plan, best.metrics.vehicle, best.metrics.pedestrian
        );
    }
    Ok(())
}
