mod logging;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use windowagg_core::{
    AggregateFn, AggregateSettings, AggregateValue, Aggregator, Emission, WindowKind,
};

#[derive(Parser, Debug)]
#[command(name = "windowagg")]
#[command(about = "Windowed aggregation over a stream of numbers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read one number per line and print each emitted aggregate as JSON.
    Run {
        #[command(flatten)]
        window: WindowArgs,
        /// Block length for timeTumbling / timeSliding windows.
        #[arg(long, default_value_t = 1000)]
        block_interval_ms: u64,
        /// Sample file; stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Validate window settings and exit.
    Check {
        #[command(flatten)]
        window: WindowArgs,
    },
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// JSON aggregate settings; overrides the inline window flags.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "tumbling")]
    window_type: WindowKind,
    #[arg(long, default_value = "avg")]
    function: AggregateFn,
    #[arg(long, default_value_t = 10)]
    size: usize,
    #[arg(long, default_value_t = 0)]
    resolution: usize,
    /// Also report calls that produced no value.
    #[arg(long)]
    emit_all: bool,
}

impl WindowArgs {
    fn load(&self) -> Result<AggregateSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("invalid aggregate settings in {}", path.display()))?
            }
            None => AggregateSettings::new(self.function, self.window_type, self.size)
                .with_resolution(self.resolution),
        };
        if self.emit_all {
            settings.proceed_only_on_emit = false;
        }
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            window,
            block_interval_ms,
            input,
        } => {
            let aggregator = Aggregator::new(window.load()?)?;
            if aggregator.is_externally_clocked() && block_interval_ms == 0 {
                bail!("--block-interval-ms must be positive for time windows");
            }
            let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &input {
                Some(path) => {
                    let file = tokio::fs::File::open(path)
                        .await
                        .with_context(|| format!("failed to open input {}", path.display()))?;
                    Box::new(BufReader::new(file))
                }
                None => Box::new(BufReader::new(tokio::io::stdin())),
            };
            let mut stdout = std::io::stdout();
            run(
                aggregator,
                reader,
                Duration::from_millis(block_interval_ms),
                &mut stdout,
            )
            .await?;
        }
        Commands::Check { window } => {
            let settings = window.load()?;
            Aggregator::new(settings.clone())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&settings).context("failed to encode settings")?
            );
        }
    }
    Ok(())
}

/// Feeds `input` into the aggregator and writes one JSON report per line to
/// `out`; for time windows a ticker closes a block every `block_interval`,
/// and one last block is closed at end of input.
async fn run<W: Write>(
    mut aggregator: Aggregator,
    input: Box<dyn AsyncBufRead + Unpin + Send>,
    block_interval: Duration,
    out: &mut W,
) -> Result<()> {
    let settings = aggregator.settings();
    info!(
        window = %settings.window_type,
        function = %settings.function,
        size = settings.window_size,
        resolution = settings.resolution,
        "aggregating"
    );

    let clocked = aggregator.is_externally_clocked();
    let mut ticker = tokio::time::interval(block_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let mut lines = input.lines();
    let mut line_no = 0u64;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                line_no += 1;
                let Some(sample) = parse_sample(&line, line_no) else {
                    continue;
                };
                let emission = aggregator.add(sample);
                write_report(out, &aggregator, emission)?;
            }
            _ = ticker.tick(), if clocked => {
                let emission = aggregator.next_block()?;
                write_report(out, &aggregator, emission)?;
            }
        }
    }

    if clocked {
        debug!("end of input, closing final block");
        let emission = aggregator.next_block()?;
        write_report(out, &aggregator, emission)?;
    }
    out.flush().context("failed to flush output")?;
    info!(lines = line_no, "input exhausted");
    Ok(())
}

fn parse_sample(line: &str, line_no: u64) -> Option<f64> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(sample) => Some(sample),
        Err(err) => {
            warn!(line = line_no, input = trimmed, error = %err, "skipping malformed sample");
            None
        }
    }
}

fn write_report<W: Write>(
    out: &mut W,
    aggregator: &Aggregator,
    emission: Emission<AggregateValue>,
) -> Result<()> {
    if let Some(report) = aggregator.report(emission) {
        let line = serde_json::to_string(&report).context("failed to encode report")?;
        writeln!(out, "{line}").context("failed to write report")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
