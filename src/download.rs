use crate::{
    config::Config,
    error::{Error, Result},
    path,
    season::Seasons,
    session::{Logbook, Session},
};

use futures::{stream, StreamExt};
use log::{debug, error, info};
use reqwest::{header::COOKIE, StatusCode};
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use tokio::fs;
use url::Url;

/// Endpoint appended to a workout link to export it.
const EXPORT_SUFFIX: &str = "/export/fit";

/// One workout to fetch and where to store it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// The export endpoint of the workout.
    pub url: Url,
    pub path: PathBuf,
}

impl Job {
    pub fn new(dir: &Path, year: i32, link: &str) -> Result<Self> {
        let invalid = || Error::Link {
            link: link.to_string(),
        };
        let url = Url::parse(&format!("{link}{EXPORT_SUFFIX}")).map_err(|_| invalid())?;
        let id = path::workout_id(&url).ok_or_else(invalid)?;
        let path = dir.join(path::workout_file_name(year, id));
        Ok(Job { url, path })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Saved(PathBuf),
    /// The service answered something other than 200, nothing was written.
    Skipped(StatusCode),
}

pub struct Downloader<'a> {
    logbook: &'a Logbook,
    session: &'a Session,
    output: &'a Path,
    /// Number of downloads in flight at once.
    jobs: usize,
}

impl<'a> Downloader<'a> {
    pub fn new(logbook: &'a Logbook, session: &'a Session, config: &'a Config) -> Self {
        Downloader {
            logbook,
            session,
            output: &config.output,
            jobs: config.jobs.max(1),
        }
    }

    /// Downloads a single workout export.
    pub async fn single(&self, job: &Job) -> Result<Outcome> {
        debug!("Downloading {} workout...", job.url);
        let url = &job.url;
        let res = self
            .logbook
            .client
            .get(url.clone())
            .header(COOKIE, self.session.cookie().clone())
            .send()
            .await
            .map_err(Error::network(url))?;

        let status = res.status();
        if status != StatusCode::OK {
            return Ok(Outcome::Skipped(status));
        }

        let body = res.bytes().await.map_err(Error::network(url))?;
        debug!("Saving workout as {}...", job.path.display());
        fs::write(&job.path, &body)
            .await
            .map_err(Error::io(&job.path))?;
        Ok(Outcome::Saved(job.path.clone()))
    }

    /// Downloads all jobs, at most `jobs` at a time, and returns how many were saved.
    pub async fn multiple(&self, list: &[Job]) -> usize {
        stream::iter(list)
            .map(|job| async move { (job, self.single(job).await) })
            .buffer_unordered(self.jobs)
            .fold(0, |saved, (job, outcome)| async move {
                match outcome {
                    Ok(Outcome::Saved(path)) => {
                        debug!("Saved {}", path.display());
                        saved + 1
                    }
                    Ok(Outcome::Skipped(status)) => {
                        debug!("{} responded with status code {status}", job.url);
                        saved
                    }
                    Err(e) => {
                        error!("Failed while downloading workout: {e}");
                        saved
                    }
                }
            })
            .await
    }

    /// Downloads every workout of a season into its own directory.
    pub async fn season(&self, year: i32, links: &BTreeSet<String>) -> Result<usize> {
        info!("Download all workouts for {year} season...");
        let dir = path::season_dir(self.output, year);
        fs::create_dir_all(&dir).await.map_err(Error::io(&dir))?;

        let jobs = links
            .iter()
            .map(|link| Job::new(&dir, year, link))
            .collect::<Result<Vec<_>>>()?;
        let saved = self.multiple(&jobs).await;
        info!(
            "{saved} workouts downloaded for {year} season into {}.",
            self.output.display()
        );
        Ok(saved)
    }

    /// Downloads every season, newest first, and returns the total saved.
    pub async fn all(&self, seasons: &Seasons) -> Result<usize> {
        let mut total = 0;
        for (&year, links) in seasons.iter().rev() {
            info!("-- --------------------------------------------------------------");
            total += self.season(year, links).await?;
        }
        Ok(total)
    }
}
