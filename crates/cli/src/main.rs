use clap::{Parser, Subcommand};

mod commands;

use commands::WorkerKind;

#[derive(Parser)]
#[command(name = "quantbench")]
#[command(about = "Benchmarking harness comparing data engines and concurrency strategies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and write the performance report
    Run {
        /// Market data CSV (overrides config)
        #[arg(long)]
        data: Option<String>,
        /// Portfolio structure JSON (overrides config)
        #[arg(long)]
        portfolio: Option<String>,
        /// Report output path (overrides config)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate synthetic market data and a demo portfolio
    Generate {
        /// Output CSV path
        #[arg(long, default_value = "data/market_data.csv")]
        data: String,
        /// Output portfolio JSON path
        #[arg(long, default_value = "data/portfolio_structure.json")]
        portfolio: String,
        /// Rows per symbol
        #[arg(long, default_value_t = 5_000)]
        rows: usize,
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Profile CSV ingestion only
    Ingest {
        /// Market data CSV (overrides config)
        #[arg(long)]
        data: Option<String>,
    },
    /// Profile rolling analytics only
    Rolling {
        /// Market data CSV (overrides config)
        #[arg(long)]
        data: Option<String>,
    },
    /// Profile the three concurrency strategies only
    Parallel {
        /// Market data CSV (overrides config)
        #[arg(long)]
        data: Option<String>,
    },
    /// Profile portfolio aggregation only
    Portfolio {
        /// Market data CSV (overrides config)
        #[arg(long)]
        data: Option<String>,
        /// Portfolio structure JSON (overrides config)
        #[arg(long)]
        portfolio: Option<String>,
    },
    /// Process-pool worker entry point (spawned internally)
    #[command(hide = true)]
    Worker {
        #[command(subcommand)]
        kind: WorkerKind,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Workers speak JSON on stdout; installing the subscriber there would
    // corrupt the protocol.
    if !matches!(&cli.command, Commands::Worker { .. }) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    match cli.command {
        Commands::Run {
            data,
            portfolio,
            output,
        } => commands::run::execute(data, portfolio, output),
        Commands::Generate {
            data,
            portfolio,
            rows,
            seed,
        } => commands::generate::execute(&data, &portfolio, rows, seed),
        Commands::Ingest { data } => commands::phases::ingest_only(data),
        Commands::Rolling { data } => commands::phases::rolling_only(data),
        Commands::Parallel { data } => commands::phases::parallelism_only(data),
        Commands::Portfolio { data, portfolio } => {
            commands::phases::portfolio_only(data, portfolio)
        }
        Commands::Worker { kind } => commands::worker::execute(&kind),
    }
}
