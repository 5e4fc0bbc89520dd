//! hookmon – CLI input monitor entry point.
//!
//! Installs the low-level keyboard and mouse hooks and prints every decoded
//! event through `tracing` until Ctrl-C. This is both a diagnostic tool and
//! the reference wiring for host applications embedding [`InputMonitor`].
//!
//! # Usage
//!
//! ```text
//! hookmon [OPTIONS]
//!
//! Options:
//!   --config <PATH>     Path to a config.toml (defaults to the platform dir)
//!   --log-level <LVL>   Override the configured tracing level
//!   --no-keyboard       Do not install the keyboard hook
//!   --no-mouse          Do not install the mouse hook
//!   --quiet-moves       Do not raise raw cursor-move events
//! ```
//!
//! # Architecture overview
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML config with CLI overrides
//!  └─ InputMonitor::from_config()
//!       ├─ WindowsHookEventSource  (hook message-loop thread)
//!       ├─ LiveKeyboardTranslator  (ToUnicode-backed)
//!       └─ run()                   (consumer loop, this thread)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hookmon_win::config::{load_config, MonitorConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Global keyboard/mouse hook monitor.
///
/// Captures system-wide input via low-level Windows hooks and logs every
/// decoded event.
#[derive(Debug, Parser)]
#[command(name = "hookmon", about = "Windows input-hook event monitor", version)]
struct Cli {
    /// Path to a config.toml; defaults to the platform config directory.
    #[arg(long, env = "HOOKMON_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured tracing level (error, warn, info, debug, trace).
    #[arg(long, env = "HOOKMON_LOG")]
    log_level: Option<String>,

    /// Do not install the keyboard hook.
    #[arg(long)]
    no_keyboard: bool,

    /// Do not install the mouse hook.
    #[arg(long)]
    no_mouse: bool,

    /// Do not raise raw cursor-move events (they dominate the log otherwise).
    #[arg(long)]
    quiet_moves: bool,
}

impl Cli {
    /// Loads the config file and applies the CLI overrides on top.
    fn into_config(self) -> anyhow::Result<MonitorConfig> {
        let mut config = load_config(self.config)?;
        if let Some(level) = self.log_level {
            config.monitor.log_level = level;
        }
        if self.no_keyboard {
            config.hooks.keyboard = false;
        }
        if self.no_mouse {
            config.hooks.mouse = false;
        }
        if self.quiet_moves {
            config.monitor.raise_mouse_moves = false;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;

    // Initialise structured logging. Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.monitor.log_level.clone())),
        )
        .init();

    run_monitor(&config)
}

#[cfg(target_os = "windows")]
fn run_monitor(config: &MonitorConfig) -> anyhow::Result<()> {
    use std::sync::Arc;

    use tracing::info;

    use hookmon_win::dispatch::InputMonitor;
    use hookmon_win::hook::windows::WindowsHookEventSource;
    use hookmon_win::hook::HookEventSource;
    use hookmon_win::translate::LiveKeyboardTranslator;

    info!("hookmon starting");

    let source: Arc<WindowsHookEventSource> = Arc::new(WindowsHookEventSource::with_hooks(
        config.hooks.keyboard,
        config.hooks.mouse,
    ));

    // Ctrl-C stops the hook thread, which closes the channel and ends run().
    let stopper = Arc::clone(&source);
    ctrlc::set_handler(move || {
        info!("shutdown signal received");
        stopper.stop();
    })?;

    let mut monitor = InputMonitor::from_config(Box::new(LiveKeyboardTranslator::new()), config);
    monitor.on_key_down(|args| info!(event = ?args.event, "key down"));
    monitor.on_key_up(|args| info!(event = ?args.event, "key up"));
    monitor.on_key_press(|args| info!(character = %args.event.character(), "key press"));
    monitor.on_mouse(|args| info!(event = ?args.event, clicks = args.clicks, "mouse"));

    info!("hookmon ready. Press Ctrl-C to exit.");
    monitor.run(source.as_ref())?;

    info!("hookmon stopped");
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn run_monitor(_config: &MonitorConfig) -> anyhow::Result<()> {
    anyhow::bail!("hookmon installs Windows hooks and only runs on Windows hosts")
}
