use chrono::{DateTime, SecondsFormat, Utc};
use regex::{Regex, RegexBuilder};

use crate::error::{JenkinsError, Result};
use crate::summaries::{
    BuildComparison, BuildInfo, BuildRefSummary, BuildSnapshot, FailedJobInfo, FailedTest,
    JobDetails, JobSummary, NodeInfo, NodeState, NodeStatus, PipelineInfo, QueueItemInfo,
    QueueStatus, RecentFailures, StageInfo, TestResultSummary,
};

use super::status::{classify_color, classify_result};
use super::types::{ComputerSet, JenkinsBuild, JenkinsJob, PipelineRun, Queue, TestReport};

const MS_PER_HOUR: i64 = 3_600_000;
const FAILING_RESULTS: [&str; 2] = ["FAILURE", "UNSTABLE"];
const FAILED_TEST_STATUSES: [&str; 2] = ["FAILED", "REGRESSION"];
const FAILED_STAGE_STATUSES: [&str; 2] = ["FAILED", "ABORTED"];
const MAX_FAILED_TESTS: usize = 20;
const MAX_ERROR_MESSAGE_CHARS: usize = 500;

/// Formats epoch milliseconds as ISO-8601 UTC with millisecond precision,
/// e.g. `1970-01-01T00:00:01.000Z`.
pub fn format_timestamp(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn format_optional_timestamp(millis: Option<i64>) -> Option<String> {
    millis.and_then(format_timestamp)
}

pub fn summarize_job(job: &JenkinsJob) -> JobSummary {
    JobSummary {
        name: job.name.clone(),
        url: job.url.clone(),
        status: classify_color(job.color.as_deref().unwrap_or_default()),
        last_build_number: job.last_build.as_ref().map(|b| b.number),
        last_build_time: job
            .last_build
            .as_ref()
            .and_then(|b| format_optional_timestamp(b.timestamp)),
    }
}

pub fn summarize_jobs(jobs: &[JenkinsJob]) -> Vec<JobSummary> {
    jobs.iter().map(summarize_job).collect()
}

fn build_ref(build: &JenkinsBuild) -> BuildRefSummary {
    BuildRefSummary {
        number: build.number,
        url: build.url.clone(),
        result: build.result.clone(),
        timestamp: format_optional_timestamp(build.timestamp),
    }
}

pub fn job_details(job: &JenkinsJob) -> JobDetails {
    let health = job.health_report.first();

    JobDetails {
        name: job.name.clone(),
        url: job.url.clone(),
        status: classify_color(job.color.as_deref().unwrap_or_default()),
        description: job.description.clone().filter(|d| !d.is_empty()),
        buildable: job.buildable.unwrap_or(false),
        in_queue: job.in_queue.unwrap_or(false),
        health_score: health.and_then(|h| h.score),
        health_description: health.and_then(|h| h.description.clone()),
        last_build: job.last_build.as_ref().map(build_ref),
        last_successful_build: job.last_successful_build.as_ref().map(build_ref),
        last_failed_build: job.last_failed_build.as_ref().map(build_ref),
    }
}

pub fn build_info(job_name: &str, build: &JenkinsBuild) -> BuildInfo {
    BuildInfo {
        job_name: job_name.to_string(),
        number: build.number,
        url: build.url.clone(),
        display_name: build.display_name.clone(),
        result: build.result.clone(),
        status: classify_result(build.result.as_deref()),
        building: build.building || build.result.is_none(),
        timestamp: format_optional_timestamp(build.timestamp),
        duration: build.duration,
        estimated_duration: build.estimated_duration,
    }
}

/// Failed or unstable builds started within the last `hours_ago` hours,
/// newest first.
pub fn failed_jobs(jobs: &[JenkinsJob], hours_ago: u32, now: DateTime<Utc>) -> Vec<FailedJobInfo> {
    let cutoff = now.timestamp_millis() - i64::from(hours_ago) * MS_PER_HOUR;

    let mut failing: Vec<(&JenkinsJob, &JenkinsBuild)> = jobs
        .iter()
        .flat_map(|job| job.builds.iter().map(move |build| (job, build)))
        .filter(|(_, build)| {
            build.timestamp.is_some_and(|ts| ts >= cutoff)
                && build
                    .result
                    .as_deref()
                    .is_some_and(|r| FAILING_RESULTS.contains(&r))
        })
        .collect();

    failing.sort_by(|(_, a), (_, b)| b.timestamp.cmp(&a.timestamp));

    failing
        .into_iter()
        .map(|(job, build)| FailedJobInfo {
            job_name: job.name.clone(),
            build_number: build.number,
            result: build.result.clone(),
            timestamp: format_optional_timestamp(build.timestamp),
            duration: build.duration,
            url: build.url.clone(),
            display_name: build.display_name.clone(),
        })
        .collect()
}

pub fn recent_failures(jobs: &[JenkinsJob], hours_ago: u32, now: DateTime<Utc>) -> RecentFailures {
    let failures = failed_jobs(jobs, hours_ago, now);
    let unit = if hours_ago == 1 { "hour" } else { "hours" };

    RecentFailures {
        time_window: format!("last {hours_ago} {unit}"),
        total_failures: failures.len(),
        failures,
    }
}

/// Compiles a shell-style glob into an anchored, case-insensitive regex.
/// `*` matches any run of characters and `?` exactly one; everything else is
/// literal.
pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut source = String::with_capacity(pattern.len() + 8);
    let mut buf = [0u8; 4];
    source.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|_| JenkinsError::invalid_input(format!("Invalid job name pattern: {pattern}")))
}

pub fn search_jobs(jobs: &[JenkinsJob], pattern: &str) -> Result<Vec<JobSummary>> {
    let regex = glob_to_regex(pattern)?;
    Ok(jobs
        .iter()
        .filter(|job| regex.is_match(&job.name))
        .map(summarize_job)
        .collect())
}

fn snapshot(build: &JenkinsBuild) -> BuildSnapshot {
    BuildSnapshot {
        number: build.number,
        result: build.result.clone(),
        duration: build.duration,
        timestamp: format_optional_timestamp(build.timestamp),
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn compare_builds(job_name: &str, first: &JenkinsBuild, second: &JenkinsBuild) -> BuildComparison {
    let duration_diff = second.duration - first.duration;
    let duration_diff_percent = if first.duration == 0 {
        0.0
    } else {
        let raw = duration_diff as f64 / first.duration as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    };

    BuildComparison {
        job_name: job_name.to_string(),
        build1: snapshot(first),
        build2: snapshot(second),
        duration_diff,
        duration_diff_percent,
        result_changed: first.result != second.result,
    }
}

/// Cuts `text` to at most `max` characters, the last three being `...`.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

pub fn summarize_tests(report: &TestReport) -> TestResultSummary {
    let failed_tests = report
        .suites
        .iter()
        .flat_map(|suite| suite.cases.iter())
        .filter(|case| FAILED_TEST_STATUSES.contains(&case.status.as_str()))
        .take(MAX_FAILED_TESTS)
        .map(|case| FailedTest {
            name: case.name.clone(),
            class_name: case.class_name.clone(),
            error_message: case
                .error_details
                .as_deref()
                .map(|msg| truncate_chars(msg, MAX_ERROR_MESSAGE_CHARS)),
        })
        .collect();

    TestResultSummary {
        total: report.pass_count + report.fail_count + report.skip_count,
        passed: report.pass_count,
        failed: report.fail_count,
        skipped: report.skip_count,
        duration: report.duration,
        failed_tests,
    }
}

pub fn summarize_pipeline(job_name: &str, run: &PipelineRun) -> PipelineInfo {
    let stages = run
        .stages
        .iter()
        .map(|stage| StageInfo {
            name: stage.name.clone(),
            status: stage.status.clone(),
            duration_millis: stage.duration_millis,
            start_time: format_optional_timestamp(stage.start_time_millis),
        })
        .collect();

    let failed_stage = run
        .stages
        .iter()
        .find(|stage| FAILED_STAGE_STATUSES.contains(&stage.status.as_str()))
        .map(|stage| stage.name.clone());

    PipelineInfo {
        job_name: job_name.to_string(),
        build_number: run.id.clone(),
        name: run.name.clone(),
        status: run.status.clone(),
        duration_millis: run.duration_millis,
        stages,
        failed_stage,
    }
}

pub fn summarize_queue(queue: &Queue) -> QueueStatus {
    let items: Vec<QueueItemInfo> = queue
        .items
        .iter()
        .map(|item| QueueItemInfo {
            id: item.id,
            job_name: item
                .task
                .as_ref()
                .and_then(|t| t.name.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            why: item
                .why
                .clone()
                .filter(|w| !w.trim().is_empty())
                .unwrap_or_else(|| "Waiting".to_string()),
            in_queue_since: format_optional_timestamp(item.in_queue_since),
            stuck: item.stuck,
            blocked: item.blocked,
        })
        .collect();

    QueueStatus {
        total_items: items.len(),
        items,
    }
}

pub fn summarize_nodes(computers: &ComputerSet) -> NodeStatus {
    let nodes: Vec<NodeInfo> = computers
        .computer
        .iter()
        .map(|c| {
            let status = match (c.offline, c.temporarily_offline) {
                (true, true) => NodeState::TemporarilyOffline,
                (true, false) => NodeState::Offline,
                (false, _) => NodeState::Online,
            };
            NodeInfo {
                name: c.display_name.clone(),
                status,
                num_executors: c.num_executors,
                idle: c.idle,
                offline_reason: c.offline_cause_reason.clone().filter(|r| !r.is_empty()),
            }
        })
        .collect();

    let online = nodes
        .iter()
        .filter(|n| n.status == NodeState::Online)
        .count();

    NodeStatus {
        total: nodes.len(),
        online,
        offline: nodes.len() - online,
        nodes,
    }
}
