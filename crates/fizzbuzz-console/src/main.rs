//! Terminal front-end for the FizzBuzz ticker.
//!
//! This binary is the composition root: it loads configuration, sets up
//! logging, builds the one [`SequenceEngine`], attaches the
//! [`PresentationController`], and then reads commands from stdin while a
//! renderer task prints every published snapshot to stdout.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `fizzbuzz-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing, to stderr)
//! 3. Create the sequence engine
//! 4. Attach the presentation controller and spawn the renderer
//! 5. Autostart the sequence if configured
//! 6. Run the command loop until `quit`, EOF, or Ctrl-C
//! 7. Dispose the controller and drain the renderer

mod commands;
mod confirm;
mod controller;
mod error;
mod render;

use std::io::Write;
use std::path::Path;

use fizzbuzz_core::config::{ConsoleConfig, DemoConfig, LoggingConfig};
use fizzbuzz_core::engine::SequenceEngine;
use fizzbuzz_types::SequenceItem;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, Outcome};
use crate::controller::PresentationController;
use crate::error::ConsoleError;
use crate::render::Renderer;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "fizzbuzz-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, stdin cannot be
/// read, or the renderer fails.
#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        from_file,
        autostart = config.console.autostart,
        render = ?config.console.render,
        "fizzbuzz-console starting"
    );

    // 3-5. Create the engine, attach the controller and renderer, autostart.
    let (mut controller, render_task) =
        attach_console(Handle::current(), &config.console, std::io::stdout());

    // 6. Command loop.
    let result = command_loop(&mut controller).await;

    // 7. Dispose. Releasing the subscription drops the sender, which ends
    //    the renderer once it has drained the queue.
    controller.dispose();
    render_task.await??;

    info!("fizzbuzz-console shutdown complete");
    result
}

/// Create the engine and attach a controller whose observer feeds a
/// renderer task writing to `out`, then autostart if configured.
///
/// The returned task finishes once the controller is disposed and every
/// queued snapshot has been written.
fn attach_console<W>(
    runtime: Handle,
    config: &ConsoleConfig,
    out: W,
) -> (PresentationController, JoinHandle<Result<(), ConsoleError>>)
where
    W: Write + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<Vec<SequenceItem>>();
    let render_task = runtime.spawn(render::render_loop(rx, Renderer::new(out, config.render)));

    let engine = SequenceEngine::new(runtime);
    let controller = PresentationController::attach(engine, move |items: &[SequenceItem]| {
        // The receiver only goes away once the renderer has failed.
        let _ = tx.send(items.to_vec());
    });

    if config.autostart {
        controller.start();
    }
    (controller, render_task)
}

/// Read commands from stdin and apply them until the user quits, stdin
/// closes, or Ctrl-C is received.
async fn command_loop(controller: &mut PresentationController) -> Result<(), ConsoleError> {
    let mut lines = spawn_stdin_reader();

    loop {
        let line = tokio::select! {
            line = lines.recv() => line.transpose()?,
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Ctrl-C received");
                return Ok(());
            }
        };

        let Some(line) = line else {
            info!("stdin closed");
            return Ok(());
        };

        match line.parse::<Command>() {
            Ok(command) => match commands::execute(controller, command) {
                Outcome::Continue(Some(reply)) => eprintln!("{reply}"),
                Outcome::Continue(None) => {}
                Outcome::Quit => return Ok(()),
            },
            Err(commands::CommandError::Empty) => {}
            Err(e) => eprintln!("{e}"),
        }
    }
}

/// Read stdin on a dedicated thread and forward each line.
///
/// A blocking read never completes on Ctrl-C, and the runtime would wait
/// for it on shutdown if it ran on the blocking pool. A detached thread
/// does not hold the process open.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults.
///
/// Returns the configuration and whether it came from the file.
fn load_config() -> Result<(DemoConfig, bool), ConsoleError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((DemoConfig::from_file(path)?, true))
    } else {
        let mut config = DemoConfig::default();
        config.logging.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }

    if EnvFilter::try_new(&logging.level).is_err() {
        warn!(level = %logging.level, "Invalid log level in config, using info");
    }
}
