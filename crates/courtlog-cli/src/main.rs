mod cmd_config;
mod cmd_init;
mod cmd_point;
mod cmd_score;
mod cmd_tail;
mod cmd_undo;
mod config;
mod outcome;
mod session;

use clap::{Parser, Subcommand};
use courtlog_core::Side;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "courtlog", version, about = "Point-by-point tennis match logger")]
struct Cli {
    /// Workspace root (defaults to the nearest directory holding .courtlog/)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a new .courtlog/ workspace and start a match
    Init {
        /// Sudden death at 40-40 instead of deuce/advantage
        #[arg(long)]
        no_ad: bool,
        /// Points needed to win a tiebreak
        #[arg(long)]
        tiebreak_target: Option<u32>,
    },
    /// Log a point and award it to the winner
    Point {
        /// Side that won the point (a/me or b/opp). Omit to log without scoring.
        #[arg(short, long)]
        winner: Option<Side>,
        /// Side serving the point
        #[arg(short, long)]
        server: Option<Side>,
        /// How the point ended
        #[arg(long, value_enum)]
        how: Option<outcome::How>,
        /// First or second serve
        #[arg(long, default_value = "1")]
        serve_number: String,
        /// Serve code (IN, A, W, SF, DF, WB)
        #[arg(long)]
        serve_code: Option<String>,
        /// Return code (IN, NET, LONG, WIDE, UE, FE)
        #[arg(long)]
        return_code: Option<String>,
        /// Rally length (shots or bucket)
        #[arg(long)]
        rally: Option<String>,
        /// Point pattern (RALLY, FIRST, APPROACH, NET, ...)
        #[arg(long)]
        pattern: Option<String>,
        /// Tactic (NEUTRAL, MOVE_OP, DEPTH, ...)
        #[arg(long)]
        tactic: Option<String>,
        /// Final shot type (F, B, V, O, D, L, SLICE)
        #[arg(long)]
        final_shot: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
        /// Any log column as column=value (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,
    },
    /// Undo the last point in both the score and the log
    Undo,
    /// Restore the last undone point
    Redo,
    /// Show the current score
    Score {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Overwrite the score counters (no undo step is recorded)
    Edit {
        sets_a: String,
        sets_b: String,
        games_a: String,
        games_b: String,
        points_a: String,
        points_b: String,
        /// true/false
        tiebreak: String,
    },
    /// Start a new match with the configured scoring rules
    Reset,
    /// Show the latest points from today's log
    Tail {
        /// Number of points to show (0 = all)
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Read or change workspace config
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("COURTLOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Init {
            no_ad,
            tiebreak_target,
        } => {
            let root = match cli.root {
                Some(r) => r,
                None => std::env::current_dir()?,
            };
            cmd_init::execute(&root, no_ad, tiebreak_target)
        }
        Command::Point {
            winner,
            server,
            how,
            serve_number,
            serve_code,
            return_code,
            rally,
            pattern,
            tactic,
            final_shot,
            notes,
            fields,
        } => cmd_point::execute(
            session::locate(cli.root.as_deref())?,
            cmd_point::PointParams {
                winner,
                server,
                how,
                serve_number,
                serve_code,
                return_code,
                rally,
                pattern,
                tactic,
                final_shot,
                notes,
                fields,
            },
        ),
        Command::Undo => cmd_undo::undo(session::locate(cli.root.as_deref())?),
        Command::Redo => cmd_undo::redo(session::locate(cli.root.as_deref())?),
        Command::Score { json } => cmd_score::show(session::locate(cli.root.as_deref())?, json),
        Command::Edit {
            sets_a,
            sets_b,
            games_a,
            games_b,
            points_a,
            points_b,
            tiebreak,
        } => cmd_score::edit(
            session::locate(cli.root.as_deref())?,
            &[sets_a, sets_b, games_a, games_b, points_a, points_b, tiebreak],
        ),
        Command::Reset => cmd_score::reset(session::locate(cli.root.as_deref())?),
        Command::Tail { limit, json } => {
            cmd_tail::execute(session::locate(cli.root.as_deref())?, limit, json)
        }
        Command::Config { cmd } => cmd_config::run(cmd, &session::locate(cli.root.as_deref())?),
    }
}
