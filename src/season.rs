use crate::{
    error::{Error, Result},
    response::ResponseExt,
    session::{Logbook, Session},
};

use log::{info, warn};
use regex::Regex;
use reqwest::{header::COOKIE, StatusCode};
use std::collections::{BTreeMap, BTreeSet};

/// Number of seasons looked back on, the current one included.
pub const SPAN: i32 = 10;

/// Workout links found for each season. Seasons without workouts are absent.
pub type Seasons = BTreeMap<i32, BTreeSet<String>>;

/// Returns `span` seasons from `current` backwards, newest first.
pub fn range(current: i32, span: i32) -> Vec<i32> {
    (current - span + 1..=current).rev().collect()
}

/// Returns the distinct workout links found in a season page.
pub fn extract(pattern: &Regex, html: &str) -> BTreeSet<String> {
    pattern
        .find_iter(html)
        .map(|matched| matched.as_str().to_string())
        .collect()
}

impl Logbook {
    /// Collects the workout links of a single season.
    pub async fn season(&self, session: &Session, year: i32) -> Result<BTreeSet<String>> {
        let url = self.endpoint(&format!("season/{year}"))?;
        let response = self
            .client
            .get(url.clone())
            .header(COOKIE, session.cookie().clone())
            .send()
            .await
            .map_err(Error::network(&url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("{url} was not found, assuming an empty season");
            return Ok(BTreeSet::new());
        }
        if !status.is_success() {
            return Err(Error::Status { url, status });
        }
        if !response.is_html() {
            warn!("{url} responded without content type text/html");
        }

        let html = response.text().await.map_err(Error::network(&url))?;
        Ok(extract(&self.workouts, &html))
    }

    /// Walks through the seasons one at a time, in the given order.
    pub async fn seasons(&self, session: &Session, years: &[i32]) -> Result<Seasons> {
        let mut seasons = Seasons::new();
        for &year in years {
            info!("Looking for {year} season...");
            let links = self.season(session, year).await?;
            if !links.is_empty() {
                seasons.insert(year, links);
            }
        }
        Ok(seasons)
    }
}
