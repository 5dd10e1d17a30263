use chrono::Utc;
use log::info;

use crate::error::Result;
use crate::jenkins::aggregate;
use crate::jenkins::types::{JenkinsJob, JenkinsRoot};
use crate::summaries::{FailedJobInfo, JobDetails, JobSummary, RecentFailures};

use super::{job_resource, JenkinsClient, METADATA_TIMEOUT, SCAN_TIMEOUT};

const JOB_LIST_TREE: &str = "jobs[name,url,color,lastBuild[number,timestamp]]";
const FAILED_SCAN_TREE: &str =
    "jobs[name,url,builds[number,url,result,timestamp,duration,displayName]{0,10}]";
const JOB_DETAIL_TREE: &str = "name,url,color,description,buildable,inQueue,\
    healthReport[score,description],\
    lastBuild[number,url,result,timestamp],\
    lastSuccessfulBuild[number,url,result,timestamp],\
    lastFailedBuild[number,url,result,timestamp]";

impl JenkinsClient {
    async fn fetch_jobs(&self, tree: &str, timeout: std::time::Duration) -> Result<Vec<JenkinsJob>> {
        let url = self.root_url(&["api", "json"])?;
        let root: JenkinsRoot = self.get_json(url, Some(tree), timeout, "job list").await?;
        Ok(root.jobs)
    }

    /// Lists every top-level job with its classified status.
    pub async fn list_jobs(&self) -> Result<Vec<JobSummary>> {
        let jobs = self.fetch_jobs(JOB_LIST_TREE, METADATA_TIMEOUT).await?;
        info!("Fetched {} jobs", jobs.len());
        Ok(aggregate::summarize_jobs(&jobs))
    }

    /// Lists jobs whose name matches a `*`/`?` glob.
    pub async fn search_jobs(&self, pattern: &str) -> Result<Vec<JobSummary>> {
        let jobs = self.fetch_jobs(JOB_LIST_TREE, METADATA_TIMEOUT).await?;
        aggregate::search_jobs(&jobs, pattern)
    }

    pub async fn job_status(&self, job_name: &str) -> Result<JobDetails> {
        let url = self.job_url(job_name, &["api", "json"])?;
        let job: JenkinsJob = self
            .get_json(url, Some(JOB_DETAIL_TREE), METADATA_TIMEOUT, &job_resource(job_name))
            .await?;
        Ok(aggregate::job_details(&job))
    }

    /// Failed and unstable builds from the last `hours_ago` hours, scanning
    /// the ten most recent builds of every job.
    pub async fn failed_jobs(&self, hours_ago: u32) -> Result<Vec<FailedJobInfo>> {
        let jobs = self.fetch_jobs(FAILED_SCAN_TREE, SCAN_TIMEOUT).await?;
        let failures = aggregate::failed_jobs(&jobs, hours_ago, Utc::now());
        info!(
            "Found {} failing builds across {} jobs in the last {hours_ago}h",
            failures.len(),
            jobs.len()
        );
        Ok(failures)
    }

    pub async fn recent_failures(&self, hours_ago: u32) -> Result<RecentFailures> {
        let jobs = self.fetch_jobs(FAILED_SCAN_TREE, SCAN_TIMEOUT).await?;
        Ok(aggregate::recent_failures(&jobs, hours_ago, Utc::now()))
    }
}
