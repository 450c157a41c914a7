pub mod betting;
pub mod cards;
pub mod error;
pub mod events;
pub mod eval;
pub mod history;
pub mod money;
pub mod pot;
pub mod rng;
pub mod table;

pub use error::{Error, Result};
pub use table::{Table, TableConfig, TableState};

/// Installs a combined terminal + file logger. Only meant for the `replay`
/// binary's own boundary; library code never installs a global logger.
#[cfg(feature = "cli")]
pub fn init(log_path: &std::path::Path) -> anyhow::Result<()> {
    use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, Config::default(), std::fs::File::create(log_path)?),
    ])?;
    Ok(())
}
