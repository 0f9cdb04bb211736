use regex::Regex;
use url::Url;

/// Builds the pattern matching workout links of the logbook rooted at `base`,
/// e.g. `https://log.concept2.com/profile/123/log/456`.
pub fn workout_links(base: &Url) -> Result<Regex, regex::Error> {
    let root = regex::escape(base.as_str().trim_end_matches('/'));
    Regex::new(&format!("{root}/profile/[0-9]+/log/[0-9]+"))
}
