use crate::{
    config::Config,
    error::{Error, Result},
    expression,
    response::ResponseExt,
};

use log::debug;
use regex::Regex;
use reqwest::{header::HeaderValue, redirect::Policy, Client, ClientBuilder, StatusCode};
use url::Url;

/// An authenticated logbook session. Cloning shares the same cookie.
#[derive(Clone)]
pub struct Session {
    cookie: HeaderValue,
}

impl Session {
    /// Value of the `Cookie` header attached to every authenticated request.
    pub fn cookie(&self) -> &HeaderValue {
        &self.cookie
    }
}

/// Handle on the logbook service, shared by every request of a run.
pub struct Logbook {
    pub(crate) base_url: Url,
    /// The HTTP(S) client used for every request after logging in.
    pub(crate) client: Client,
    /// Matches workout links on season pages.
    pub(crate) workouts: Regex,
    login_client: Client,
}

impl Logbook {
    pub fn new(config: &Config) -> Result<Self> {
        let builder = || {
            let builder = Client::builder();
            match config.timeout {
                Some(timeout) => builder.timeout(timeout),
                None => builder,
            }
        };
        let build = |builder: ClientBuilder| builder.build().map_err(Error::Client);

        let workouts = expression::workout_links(&config.base_url).map_err(Error::Pattern)?;

        Ok(Logbook {
            base_url: config.base_url.clone(),
            client: build(builder())?,
            workouts,
            // The session cookie is set on the login response itself,
            // following the redirect would lose it.
            login_client: build(builder().redirect(Policy::none()))?,
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|_| Error::Link {
            link: format!("{}{path}", self.base_url),
        })
    }

    /// Logs into the service and returns the session to reuse on every request.
    pub async fn login(&self, login: &str, password: &str) -> Result<Session> {
        let url = self.endpoint("login")?;
        debug!("Logging in as {login} at {url}");
        let response = self
            .login_client
            .post(url.clone())
            .form(&[("username", login), ("password", password)])
            .send()
            .await
            .map_err(Error::network(&url))?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(Error::Rejected),
            status if status.is_success() || status.is_redirection() => {}
            status => return Err(Error::Status { url, status }),
        }

        let cookie = response.session_cookie().ok_or(Error::Rejected)?;
        Ok(Session { cookie })
    }
}
