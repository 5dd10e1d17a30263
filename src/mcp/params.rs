//! Argument records for each tool. Field docs become the JSON schema
//! descriptions the assistant sees.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::{JenkinsError, Result};
use crate::jenkins::{BuildRef, DEFAULT_HISTORY_LIMIT};

pub const DEFAULT_HOURS_AGO: u32 = 24;

/// A build number or a permalink name such as `lastBuild`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum BuildSelector {
    Number(u64),
    Name(String),
}

impl BuildSelector {
    pub fn to_build_ref(&self) -> Result<BuildRef> {
        match self {
            Self::Number(n) => Ok(BuildRef::Number(*n)),
            Self::Name(name) => BuildRef::parse(name),
        }
    }
}

fn build_ref_or_last(selector: Option<&BuildSelector>) -> Result<BuildRef> {
    selector.map_or(Ok(BuildRef::Last), BuildSelector::to_build_ref)
}

fn require<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(JenkinsError::invalid_input(format!("{field} is required")));
    }
    Ok(trimmed)
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobParams {
    /// Job name; use `folder/job` for jobs inside folders
    pub job_name: String,
}

impl JobParams {
    pub fn job_name(&self) -> Result<&str> {
        require("jobName", &self.job_name)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildParams {
    /// Job name; use `folder/job` for jobs inside folders
    pub job_name: String,
    /// Build number or permalink (lastBuild, lastSuccessfulBuild, lastFailedBuild, lastCompletedBuild). Defaults to lastBuild
    #[serde(default)]
    pub build_number: Option<BuildSelector>,
}

impl BuildParams {
    pub fn job_name(&self) -> Result<&str> {
        require("jobName", &self.job_name)
    }

    pub fn build(&self) -> Result<BuildRef> {
        build_ref_or_last(self.build_number.as_ref())
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildHistoryParams {
    /// Job name; use `folder/job` for jobs inside folders
    pub job_name: String,
    /// Number of most recent builds to return (default 10, max 100)
    #[serde(default)]
    pub limit: Option<usize>,
}

impl BuildHistoryParams {
    pub fn job_name(&self) -> Result<&str> {
        require("jobName", &self.job_name)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleLogParams {
    /// Job name; use `folder/job` for jobs inside folders
    pub job_name: String,
    /// Build number or permalink. Defaults to lastBuild
    #[serde(default)]
    pub build_number: Option<BuildSelector>,
    /// Return only the last N lines. Omit or use 0 for the whole log (long logs are truncated in the middle)
    #[serde(default)]
    pub tail_lines: Option<i64>,
}

impl ConsoleLogParams {
    pub fn job_name(&self) -> Result<&str> {
        require("jobName", &self.job_name)
    }

    pub fn build(&self) -> Result<BuildRef> {
        build_ref_or_last(self.build_number.as_ref())
    }

    /// Non-positive values disable tail mode.
    pub fn tail_lines(&self) -> Option<usize> {
        self.tail_lines
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchConsoleParams {
    /// Job name; use `folder/job` for jobs inside folders
    pub job_name: String,
    /// Case-insensitive regular expression to look for
    pub pattern: String,
    /// Build number or permalink. Defaults to lastBuild
    #[serde(default)]
    pub build_number: Option<BuildSelector>,
    /// Lines of context before and after each match (default 5)
    #[serde(default)]
    pub context_lines: Option<usize>,
    /// Stop after this many matches (default 50)
    #[serde(default)]
    pub max_matches: Option<usize>,
}

impl SearchConsoleParams {
    pub fn job_name(&self) -> Result<&str> {
        require("jobName", &self.job_name)
    }

    pub fn pattern(&self) -> Result<&str> {
        if self.pattern.is_empty() {
            return Err(JenkinsError::invalid_input("pattern is required"));
        }
        Ok(&self.pattern)
    }

    pub fn build(&self) -> Result<BuildRef> {
        build_ref_or_last(self.build_number.as_ref())
    }

    pub fn max_matches(&self) -> Result<Option<usize>> {
        match self.max_matches {
            Some(0) => Err(JenkinsError::invalid_input("maxMatches must be at least 1")),
            other => Ok(other),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedJobsParams {
    /// Look back this many hours (default 24)
    #[serde(default)]
    pub hours_ago: Option<u32>,
}

impl FailedJobsParams {
    pub fn hours_ago(&self) -> u32 {
        self.hours_ago.unwrap_or(DEFAULT_HOURS_AGO)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchJobsParams {
    /// Glob over job names: `*` matches any run of characters, `?` exactly one. Case-insensitive
    pub pattern: String,
}

impl SearchJobsParams {
    pub fn pattern(&self) -> Result<&str> {
        require("pattern", &self.pattern)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompareBuildsParams {
    /// Job name; use `folder/job` for jobs inside folders
    pub job_name: String,
    /// Baseline build number or permalink
    pub build1: BuildSelector,
    /// Build number or permalink to compare against the baseline
    pub build2: BuildSelector,
}

impl CompareBuildsParams {
    pub fn job_name(&self) -> Result<&str> {
        require("jobName", &self.job_name)
    }

    pub fn builds(&self) -> Result<(BuildRef, BuildRef)> {
        Ok((self.build1.to_build_ref()?, self.build2.to_build_ref()?))
    }
}
