use serde::{Deserialize, Serialize};

const IN_PROGRESS_SUFFIX: &str = "_anime";

/// Closed status vocabulary reported for jobs and builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Success,
    Failure,
    Unstable,
    Aborted,
    NotBuilt,
    Building,
    Unknown,
}

/// Maps a Jenkins ball color (`blue`, `red_anime`, ...) onto [`BuildStatus`].
///
/// Colors carrying the `_anime` suffix are running builds and always map to
/// `Building`. Colors Jenkins may add in the future fall back to `Unknown`.
pub fn classify_color(color: &str) -> BuildStatus {
    if color.ends_with(IN_PROGRESS_SUFFIX) {
        return BuildStatus::Building;
    }

    match color {
        "blue" | "green" => BuildStatus::Success,
        "red" => BuildStatus::Failure,
        "yellow" => BuildStatus::Unstable,
        "aborted" => BuildStatus::Aborted,
        "notbuilt" | "grey" | "disabled" => BuildStatus::NotBuilt,
        _ => BuildStatus::Unknown,
    }
}

/// Maps a build `result` field onto [`BuildStatus`]. A null result means the
/// build has not finished yet.
pub fn classify_result(result: Option<&str>) -> BuildStatus {
    match result {
        None => BuildStatus::Building,
        Some("SUCCESS") => BuildStatus::Success,
        Some("FAILURE") => BuildStatus::Failure,
        Some("UNSTABLE") => BuildStatus::Unstable,
        Some("ABORTED") => BuildStatus::Aborted,
        Some("NOT_BUILT") => BuildStatus::NotBuilt,
        Some(_) => BuildStatus::Unknown,
    }
}
