use std::path::{Path, PathBuf};
use url::Url;

/// Directory holding the workouts of one season.
pub fn season_dir(root: &Path, year: i32) -> PathBuf {
    root.join(year.to_string())
}

/// Identifier of the workout behind an export URL such as
/// `.../profile/123/log/456/export/fit`, the third segment from the end.
pub fn workout_id(export: &Url) -> Option<&str> {
    export
        .path_segments()?
        .rev()
        .nth(2)
        .filter(|segment| !segment.is_empty())
}

pub fn workout_file_name(year: i32, id: &str) -> String {
    format!("{year}_{id}.fit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_the_log_number() {
        let url = Url::parse("https://log.concept2.com/profile/123/log/456/export/fit").unwrap();
        assert_eq!(workout_id(&url), Some("456"));
    }

    #[test]
    fn short_paths_have_no_id() {
        let url = Url::parse("https://log.concept2.com/fit").unwrap();
        assert_eq!(workout_id(&url), None);
    }

    #[test]
    fn file_name() {
        assert_eq!(workout_file_name(2024, "456"), "2024_456.fit");
        assert_eq!(
            season_dir(Path::new("/tmp/fit"), 2024),
            PathBuf::from("/tmp/fit/2024")
        );
    }
}
