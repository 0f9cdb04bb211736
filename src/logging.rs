use color_eyre::{eyre::bail, Result};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Sets up timestamped logging. Dependencies only ever report warnings.
pub fn init(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        2 => LevelFilter::Trace,
        _ => bail!("At most two levels of verbosity are supported, got {verbosity}"),
    };
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_module_level(env!("CARGO_CRATE_NAME"), level)
        .with_utc_timestamps()
        .init()?;
    Ok(())
}
