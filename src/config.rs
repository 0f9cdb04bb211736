use crate::args::Args;
use std::{fmt, num::NonZeroUsize, path::PathBuf, thread};
use tokio::time::Duration;
use url::Url;

/// Everything a run needs, resolved once from the command line.
pub struct Config {
    pub login: String,
    pub password: String,
    /// Root directory receiving one subdirectory per season.
    pub output: PathBuf,
    pub base_url: Url,
    /// Upper bound on downloads in flight.
    pub jobs: usize,
    pub timeout: Option<Duration>,
}

impl From<Args> for Config {
    fn from(value: Args) -> Self {
        let jobs = value.jobs.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        });

        // Endpoints are joined onto the base, which drops a last segment without a slash.
        let mut base_url = value.base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Config {
            login: value.login,
            password: value.password,
            output: PathBuf::from(value.output),
            base_url,
            jobs: jobs.max(1),
            timeout: value.timeout,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("login", &self.login)
            .field("password", &"********")
            .field("output", &self.output)
            .field("base_url", &self.base_url.as_str())
            .field("jobs", &self.jobs)
            .field("timeout", &self.timeout)
            .finish()
    }
}
