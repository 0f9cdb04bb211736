mod args;
mod config;
mod download;
mod error;
mod expression;
mod logging;
mod path;
mod response;
mod season;
mod session;

use crate::{config::Config, download::Downloader, session::Logbook};

use chrono::Datelike;
use color_eyre::{
    eyre::{Result, WrapErr},
    Section,
};
use log::{debug, info};

const RULE: &str = "-- --------------------------------------------------------------";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Usage errors exit here, before any request goes out.
    let args = args::parse();
    logging::init(args.verbose)?;
    run(Config::from(args)).await
}

async fn run(config: Config) -> Result<()> {
    info!("{RULE}");
    info!("-- Beginning of the program...");
    info!("{RULE}");
    debug!("{config:?}");

    let logbook = Logbook::new(&config)?;
    let session = logbook
        .login(&config.login, &config.password)
        .await
        .wrap_err("Failed to log into the logbook")
        .suggestion("Check the login and password")?;

    let years = season::range(chrono::Local::now().year(), season::SPAN);
    let seasons = logbook
        .seasons(&session, &years)
        .await
        .wrap_err("Failed to list the workouts")?;

    let downloader = Downloader::new(&logbook, &session, &config);
    let total = downloader
        .all(&seasons)
        .await
        .wrap_err("Failed to download the workouts")
        .suggestion("Try supplying an output directory you can write to")?;

    info!("{RULE}");
    info!("-- {total} workouts downloaded.");
    info!("{RULE}");
    info!("-- End of the program.");
    info!("{RULE}");
    Ok(())
}
