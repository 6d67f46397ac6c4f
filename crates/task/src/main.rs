//! rootline-worker - solves newline-delimited JSON tasks

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context;
use clap::Parser;
use rootline_task::{
    ChannelSink, Controller, JsonLinesSink, OutcomeSink, SinkError, SolveConfig, SolveTask,
    TaskRecord, Worker,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::{Semaphore, mpsc},
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "rootline-worker")]
#[command(about = "Find real roots of single-variable expressions")]
#[command(version)]
struct Cli {
    /// Task file, one JSON task per line (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Record file, one JSON record per line (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tasks solved at the same time
    #[arg(short, long, default_value_t = 1, env = "ROOTLINE_CONCURRENCY")]
    concurrency: usize,

    /// Scan step used to look for a sign change
    #[arg(long, default_value_t = 0.01, env = "ROOTLINE_STEP")]
    step: f64,

    /// Bisection half-width tolerance
    #[arg(long, default_value_t = 1e-4, env = "ROOTLINE_BISECTION_TOL")]
    bisection_tol: f64,

    /// Newton step and residual tolerance
    #[arg(long, default_value_t = 1e-4, env = "ROOTLINE_NEWTON_TOL")]
    newton_tol: f64,

    /// Newton iteration cap
    #[arg(long, default_value_t = 200, env = "ROOTLINE_NEWTON_MAX_ITERS")]
    newton_max_iters: usize,

    /// Stop solvers as soon as a task's TTL elapses, dropping partial results
    #[arg(long, env = "ROOTLINE_PREEMPT")]
    preempt: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Records own stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = SolveConfig::new(
        cli.step,
        cli.bisection_tol,
        cli.newton_tol,
        cli.newton_max_iters,
    )
    .context("invalid solver options")?
    .with_preemption(cli.preempt);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, cancelling in-flight tasks");
                cancel.cancel();
            }
        }
    });
    let controller = Controller::new(config).with_cancellation(cancel.clone());

    let output: Box<dyn Write + Send> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout()),
    };
    let (tx, mut rx) = mpsc::unbounded_channel::<TaskRecord>();
    let writer = tokio::task::spawn_blocking(move || -> Result<(), SinkError> {
        let mut sink = JsonLinesSink::new(output);
        while let Some(record) = rx.blocking_recv() {
            sink.record(&record)?;
        }
        Ok(())
    });

    let input: Box<dyn AsyncBufRead + Unpin + Send> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let permits = Arc::new(Semaphore::new(cli.concurrency.max(1)));
    let mut jobs = JoinSet::new();
    let mut lines = input.lines();
    let mut line_no = 0_usize;

    loop {
        let line = tokio::select! {
            () = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else { break };
        line_no += 1;

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let task: SolveTask = match serde_json::from_str(line) {
            Ok(task) => task,
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed task");
                continue;
            }
        };

        let permit = Arc::clone(&permits).acquire_owned().await?;
        let mut worker = Worker::new(controller.clone(), ChannelSink::new(tx.clone()));
        jobs.spawn_blocking(move || {
            let _permit = permit;
            if let Err(e) = worker.process(&task) {
                error!(task_id = task.id, error = %e, "task not recorded");
            }
        });
    }

    while let Some(joined) = jobs.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "worker job failed");
        }
    }

    drop(tx);
    writer.await?.context("writing records")?;
    info!("all tasks processed");
    Ok(())
}
