use serde::{Deserialize, Serialize};

use crate::jenkins::BuildStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerHealth {
    pub status: String,
    pub url: String,
    pub version: Option<String>,
    pub mode: Option<String>,
    pub num_executors: Option<u32>,
    pub use_security: Option<bool>,
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub name: String,
    pub url: String,
    pub status: BuildStatus,
    pub last_build_number: Option<u64>,
    pub last_build_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRefSummary {
    pub number: u64,
    pub url: String,
    pub result: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub name: String,
    pub url: String,
    pub status: BuildStatus,
    pub description: Option<String>,
    pub buildable: bool,
    pub in_queue: bool,
    pub health_score: Option<i64>,
    pub health_description: Option<String>,
    pub last_build: Option<BuildRefSummary>,
    pub last_successful_build: Option<BuildRefSummary>,
    pub last_failed_build: Option<BuildRefSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub job_name: String,
    pub number: u64,
    pub url: String,
    pub display_name: Option<String>,
    pub result: Option<String>,
    pub status: BuildStatus,
    pub building: bool,
    pub timestamp: Option<String>,
    pub duration: i64,
    pub estimated_duration: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildHistory {
    pub job_name: String,
    pub total_builds: usize,
    pub builds: Vec<BuildInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedJobInfo {
    pub job_name: String,
    pub build_number: u64,
    pub result: Option<String>,
    pub timestamp: Option<String>,
    pub duration: i64,
    pub url: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFailures {
    pub time_window: String,
    pub total_failures: usize,
    pub failures: Vec<FailedJobInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSnapshot {
    pub number: u64,
    pub result: Option<String>,
    pub duration: i64,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildComparison {
    pub job_name: String,
    pub build1: BuildSnapshot,
    pub build2: BuildSnapshot,
    pub duration_diff: i64,
    pub duration_diff_percent: f64,
    pub result_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedTest {
    pub name: String,
    pub class_name: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub duration: f64,
    pub failed_tests: Vec<FailedTest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageInfo {
    pub name: String,
    pub status: String,
    pub duration_millis: i64,
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineInfo {
    pub job_name: String,
    pub build_number: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub duration_millis: i64,
    pub stages: Vec<StageInfo>,
    pub failed_stage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItemInfo {
    pub id: u64,
    pub job_name: String,
    pub why: String,
    pub in_queue_since: Option<String>,
    pub stuck: bool,
    pub blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    pub total_items: usize,
    pub items: Vec<QueueItemInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Online,
    Offline,
    TemporarilyOffline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub name: String,
    pub status: NodeState,
    pub num_executors: u32,
    pub idle: bool,
    pub offline_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub nodes: Vec<NodeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMatch {
    pub line_number: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSearchResult {
    pub pattern: String,
    pub total_matches: usize,
    pub total_lines: usize,
    pub truncated: bool,
    pub matches: Vec<LogMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInfo {
    pub file_name: String,
    pub relative_path: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactList {
    pub job_name: String,
    pub build_number: u64,
    pub total: usize,
    pub artifacts: Vec<ArtifactInfo>,
}
