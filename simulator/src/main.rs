use anyhow::Context;
use breakaway_simulator::{Policy, Simulator};
use breakaway_types::Seed;
use clap::{Parser, ValueEnum};
use commonware_codec::DecodeExt;
use rand::RngCore;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    /// Cash out at the first checkpoint.
    Early,
    /// Cash out at the final checkpoint.
    Late,
    /// Ride to the final checkpoint and shoot.
    Ride,
    /// Coin-flip at every checkpoint.
    Random,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Early => Policy::CashAt(0),
            PolicyArg::Late => Policy::CashAt(3),
            PolicyArg::Ride => Policy::Ride,
            PolicyArg::Random => Policy::Random,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of sessions to play.
    #[arg(short, long, default_value_t = 1000)]
    sessions: u64,

    /// Stake per session in minor currency units.
    #[arg(long, default_value_t = 50)]
    stake: u64,

    /// Table seed as 64 hex characters; random when omitted.
    #[arg(long)]
    seed: Option<String>,

    #[arg(long, value_enum, default_value_t = PolicyArg::Ride)]
    policy: PolicyArg,

    /// Cash out at this checkpoint index (clamped to the final one);
    /// overrides --policy.
    #[arg(long, value_name = "CHECKPOINT")]
    cash_at: Option<usize>,

    /// Emit the aggregated stats as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Log per-session detail.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Create logger
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Parse or generate the table seed
    let seed = match &args.seed {
        Some(hex) => {
            let bytes = commonware_utils::from_hex(hex).context("invalid seed hex format")?;
            Seed::decode(&mut bytes.as_slice()).context("failed to decode seed")?
        }
        None => {
            let mut bytes = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut bytes);
            Seed::new(bytes)
        }
    };
    info!(seed = %commonware_utils::hex(seed.as_bytes()), "table seeded");

    let policy = match args.cash_at {
        Some(checkpoint) => Policy::CashAt(checkpoint),
        None => args.policy.into(),
    };
    let mut simulator = Simulator::new(seed, policy);
    let stats = simulator
        .run(args.sessions, args.stake)
        .context("simulation failed")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("failed to encode stats")?
        );
    } else {
        info!(
            sessions = stats.sessions,
            staked = stats.staked,
            returned = stats.returned,
            rtp_bps = stats.rtp_bps,
            "run complete"
        );
        info!(
            cashouts = stats.cashouts,
            goals = stats.goals,
            crashes = stats.crashes,
            misses = stats.misses,
            bonus_rounds = stats.bonus_rounds,
            max_payout = stats.max_payout,
            "outcomes"
        );
    }

    Ok(())
}
