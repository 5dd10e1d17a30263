//! Jenkins JSON payloads as returned by `/api/json`, `/testReport/api/json`,
//! `/wfapi/describe`, `/queue/api/json` and `/computer/api/json`.
//!
//! The `tree` parameter means any field may be absent, so nearly everything
//! is optional or defaulted.

use serde::Deserialize;

/// Root of `/api/json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenkinsRoot {
    pub mode: Option<String>,
    pub num_executors: Option<u32>,
    pub use_security: Option<bool>,
    #[serde(default)]
    pub jobs: Vec<JenkinsJob>,
}

/// A job as listed on the root or fetched from `/job/<name>/api/json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenkinsJob {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub color: Option<String>,
    pub description: Option<String>,
    pub buildable: Option<bool>,
    pub in_queue: Option<bool>,
    #[serde(default)]
    pub health_report: Vec<HealthReport>,
    pub last_build: Option<JenkinsBuild>,
    pub last_successful_build: Option<JenkinsBuild>,
    pub last_failed_build: Option<JenkinsBuild>,
    #[serde(default)]
    pub builds: Vec<JenkinsBuild>,
}

/// Reply to a `builds[...]{m,n}` tree on `/job/<name>/api/json`.
#[derive(Debug, Default, Deserialize)]
pub struct BuildList {
    #[serde(default)]
    pub builds: Vec<JenkinsBuild>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub score: Option<i64>,
    pub description: Option<String>,
}

/// One build. `result` is null while the build is still running.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenkinsBuild {
    pub number: u64,
    #[serde(default)]
    pub url: String,
    pub result: Option<String>,
    /// Start time in epoch milliseconds
    pub timestamp: Option<i64>,
    /// Duration in milliseconds, 0 while running
    #[serde(default)]
    pub duration: i64,
    pub estimated_duration: Option<i64>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub building: bool,
    #[serde(default)]
    pub artifacts: Vec<JenkinsArtifact>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenkinsArtifact {
    pub file_name: String,
    pub relative_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    #[serde(default)]
    pub pass_count: u64,
    #[serde(default)]
    pub fail_count: u64,
    #[serde(default)]
    pub skip_count: u64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub suites: Vec<TestSuite>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub name: String,
    /// PASSED, FIXED, SKIPPED, FAILED or REGRESSION
    #[serde(default)]
    pub status: String,
    pub error_details: Option<String>,
}

/// Pipeline run from the workflow REST API (`wfapi/describe`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub duration_millis: i64,
    #[serde(default)]
    pub stages: Vec<PipelineStage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    pub start_time_millis: Option<i64>,
    #[serde(default)]
    pub duration_millis: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct Queue {
    #[serde(default)]
    pub items: Vec<QueueItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub id: u64,
    pub task: Option<QueueTask>,
    pub why: Option<String>,
    pub in_queue_since: Option<i64>,
    #[serde(default)]
    pub stuck: bool,
    #[serde(default)]
    pub blocked: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueueTask {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComputerSet {
    #[serde(default)]
    pub computer: Vec<Computer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Computer {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub offline: bool,
    #[serde(default)]
    pub temporarily_offline: bool,
    pub offline_cause_reason: Option<String>,
    #[serde(default)]
    pub num_executors: u32,
    #[serde(default)]
    pub idle: bool,
}
