use clap::{ArgAction::Count, Parser};
use std::{ffi::OsString, process};
use thiserror::Error;
use tokio::time::Duration;
use url::Url;

/// Root of the Concept2 logbook.
pub const DEFAULT_BASE_URL: &str = "https://log.concept2.com";

/// Shortest login, password or output directory accepted.
const MIN_LENGTH: usize = 4;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Login of the logbook account
    #[arg(allow_hyphen_values = true)]
    pub login: String,

    /// Password of the logbook account
    #[arg(allow_hyphen_values = true)]
    pub password: String,

    /// Directory to output the workouts
    #[arg(allow_hyphen_values = true)]
    pub output: String,

    /// Number of concurrent downloads, defaults to the number of CPU cores
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Turn debugging information on
    #[arg(short, long, action = Count)]
    pub verbose: u8,

    /// Timeout for every request, no timeout when omitted
    #[arg(short, long, value_parser = parse_seconds, value_name = "SECONDS")]
    pub timeout: Option<Duration>,

    /// Root URL of the logbook service
    #[arg(long, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    pub base_url: Url,
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error(transparent)]
    Invalid(#[from] clap::Error),

    #[error("one or more arguments seem to be too short, at least 4 characters are needed")]
    TooShort,
}

impl UsageError {
    /// Process exit status for this error. Help and version requests are not failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            UsageError::Invalid(e) if !e.use_stderr() => 0,
            UsageError::Invalid(_) => 1,
            UsageError::TooShort => 2,
        }
    }

    pub fn exit(self) -> ! {
        let code = self.exit_code();
        match self {
            UsageError::Invalid(e) => {
                let _ = e.print();
            }
            UsageError::TooShort => eprintln!("{self}"),
        }
        process::exit(code)
    }
}

impl Args {
    fn validate(&self) -> Result<(), UsageError> {
        let short = [&self.login, &self.password, &self.output]
            .iter()
            .any(|value| value.chars().count() < MIN_LENGTH);
        if short {
            return Err(UsageError::TooShort);
        }
        Ok(())
    }
}

pub fn try_parse_from<I, T>(argv: I) -> Result<Args, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv)?;
    args.validate()?;
    Ok(args)
}

pub fn parse() -> Args {
    try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

fn parse_seconds(arg: &str) -> Result<std::time::Duration, std::num::ParseIntError> {
    let seconds = arg.parse()?;
    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit_code(argv: &[&str]) -> i32 {
        match try_parse_from(argv) {
            Ok(_) => panic!("{argv:?} should have been rejected"),
            Err(e) => e.exit_code(),
        }
    }

    #[test]
    fn wrong_argument_count_exits_with_one() {
        assert_eq!(exit_code(&["logbook-fit"]), 1);
        assert_eq!(exit_code(&["logbook-fit", "rower"]), 1);
        assert_eq!(exit_code(&["logbook-fit", "rower", "secret"]), 1);
        assert_eq!(
            exit_code(&["logbook-fit", "rower", "secret", "/tmp/fit", "extra"]),
            1
        );
    }

    #[test]
    fn short_arguments_exit_with_two() {
        assert_eq!(exit_code(&["logbook-fit", "row", "secret", "/tmp/fit"]), 2);
        assert_eq!(exit_code(&["logbook-fit", "rower", "abc", "/tmp/fit"]), 2);
        assert_eq!(exit_code(&["logbook-fit", "rower", "secret", "out"]), 2);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Three characters, five bytes.
        assert_eq!(exit_code(&["logbook-fit", "élé", "secret", "/tmp/fit"]), 2);
        assert!(try_parse_from(["logbook-fit", "rôle", "secret", "/tmp/fit"]).is_ok());
    }

    #[test]
    fn help_is_not_a_failure() {
        assert_eq!(exit_code(&["logbook-fit", "--help"]), 0);
    }

    #[test]
    fn defaults() {
        let args = try_parse_from(["logbook-fit", "rower", "secret", "/tmp/fit"]).unwrap();
        assert_eq!(args.login, "rower");
        assert_eq!(args.password, "secret");
        assert_eq!(args.output, "/tmp/fit");
        assert_eq!(args.jobs, None);
        assert_eq!(args.timeout, None);
        assert_eq!(args.verbose, 0);
        assert_eq!(args.base_url.as_str(), "https://log.concept2.com/");
    }

    #[test]
    fn options() {
        let args = try_parse_from([
            "logbook-fit",
            "-vv",
            "-j",
            "3",
            "--timeout",
            "15",
            "rower",
            "secret",
            "/tmp/fit",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.jobs, Some(3));
        assert_eq!(args.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn values_may_start_with_a_hyphen() {
        let args = try_parse_from(["logbook-fit", "rower", "-s3cret", "/tmp/fit"]).unwrap();
        assert_eq!(args.password, "-s3cret");

        let args = try_parse_from(["logbook-fit", "rower", "--pw1", "/tmp/fit"]).unwrap();
        assert_eq!(args.password, "--pw1");
    }

    #[test]
    fn options_before_hyphenated_values() {
        let args = try_parse_from([
            "logbook-fit",
            "-vv",
            "-j",
            "4",
            "rower",
            "-s3cret",
            "/tmp/fit",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.jobs, Some(4));
        assert_eq!(args.login, "rower");
        assert_eq!(args.password, "-s3cret");
        assert_eq!(args.output, "/tmp/fit");
    }
}
