use reqwest::StatusCode;
use std::{io, path::PathBuf};
use thiserror::Error;
use url::Url;

/// Failures at the HTTP and filesystem boundaries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to build the HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("unable to build the workout link pattern")]
    Pattern(#[source] regex::Error),

    /// The service could not be reached or the transfer broke off.
    #[error("request to {url} failed")]
    Network {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status code {status}")]
    Status { url: Url, status: StatusCode },

    /// Login went through but no session was granted.
    #[error("login was rejected, no session cookie was issued")]
    Rejected,

    #[error("{link} is not a workout link")]
    Link { link: String },

    #[error("unable to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn network(url: &Url) -> impl FnOnce(reqwest::Error) -> Error + '_ {
        move |source| Error::Network {
            url: url.clone(),
            source,
        }
    }

    pub(crate) fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
