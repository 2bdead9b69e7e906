use std::io;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use title_jitter::{AnimationConfig, AnimationError, LoopScheduler, RngSource, TitleAnimator};

use crate::config::{AppConfig, ConfigError};
use crate::constants::DEMO_TITLE;
use crate::logging;
use crate::terminal::TerminalTitle;

/// Terminal demo of the palette tuner's title animation
#[derive(Debug, Parser)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Title text to animate
    #[arg(default_value = DEMO_TITLE)]
    pub title: String,

    /// Write the default configuration and exit
    #[arg(long)]
    pub write_config: bool,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Carry out the command line. Expects the logger to be installed already.
pub fn run_cli(cli: &Cli) -> Result<(), DemoError> {
    let path = cli.config.clone().or_else(AppConfig::default_path);

    if cli.write_config {
        let path = path.ok_or_else(|| {
            ConfigError::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        AppConfig::default().save_to_path(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = path
        .as_deref()
        .and_then(AppConfig::load_from_path)
        .unwrap_or_default();
    logging::set_level(config.log_level);

    run(&config.animation, &cli.title)?;
    Ok(())
}

/// Animate `text` on stdout until the effect settles.
pub fn run(config: &AnimationConfig, text: &str) -> Result<(), AnimationError> {
    let scheduler = LoopScheduler::new();
    let animator = TitleAnimator::new(config.clone(), scheduler.clone())?;

    let title = (!text.is_empty()).then(|| TerminalTitle::new(text, io::stdout()));
    animator.start(title, RngSource::new(StdRng::from_entropy()));

    scheduler.run();
    println!();

    log::info!(
        "Title settled after {} ticks (threshold {:.2})",
        animator.ticks(),
        animator.threshold()
    );
    Ok(())
}
