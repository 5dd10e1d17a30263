use std::fmt;

use url::Url;

use crate::error::{JenkinsError, Result};

/// Which build of a job a query refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildRef {
    Number(u64),
    Last,
    LastSuccessful,
    LastFailed,
    LastCompleted,
}

impl BuildRef {
    /// Parses a build selector. Accepts a build number or one of the
    /// Jenkins permalinks (`lastBuild`, `lastSuccessfulBuild`,
    /// `lastFailedBuild`, `lastCompletedBuild`, also without the `Build`
    /// suffix). Blank input selects the last build.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_start_matches('#');
        if let Ok(number) = trimmed.parse::<u64>() {
            return Ok(Self::Number(number));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "" | "last" | "lastbuild" | "latest" => Ok(Self::Last),
            "lastsuccessful" | "lastsuccessfulbuild" => Ok(Self::LastSuccessful),
            "lastfailed" | "lastfailedbuild" => Ok(Self::LastFailed),
            "lastcompleted" | "lastcompletedbuild" => Ok(Self::LastCompleted),
            _ => Err(JenkinsError::invalid_input(format!(
                "Invalid build number '{raw}': expected a number or lastBuild, \
                 lastSuccessfulBuild, lastFailedBuild, lastCompletedBuild"
            ))),
        }
    }

    pub fn path_segment(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Last => "lastBuild".to_string(),
            Self::LastSuccessful => "lastSuccessfulBuild".to_string(),
            Self::LastFailed => "lastFailedBuild".to_string(),
            Self::LastCompleted => "lastCompletedBuild".to_string(),
        }
    }
}

impl fmt::Display for BuildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "#{n}"),
            other => f.write_str(&other.path_segment()),
        }
    }
}

/// Splits a job name into its folder components. `team/app` lives at
/// `/job/team/job/app/`.
pub fn job_segments(job_name: &str) -> Result<Vec<String>> {
    let parts: Vec<&str> = job_name
        .trim()
        .trim_matches('/')
        .split('/')
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        return Err(JenkinsError::invalid_input("job_name must not be empty"));
    }

    Ok(parts
        .into_iter()
        .flat_map(|part| ["job".to_string(), part.to_string()])
        .collect())
}

/// Appends `segments` to the Jenkins base URL, percent-encoding each one.
pub fn endpoint<S: AsRef<str>>(base: &Url, segments: &[S]) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| JenkinsError::InvalidConfig(format!("'{base}' cannot be a base URL")))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment.as_ref());
        }
    }
    Ok(url)
}

/// Direct download link for a build artifact.
pub fn artifact_url(build_url: &str, relative_path: &str) -> String {
    let base = build_url.trim_end_matches('/');
    format!("{base}/artifact/{relative_path}")
}
