use crate::error::Result;
use crate::jenkins::aggregate;
use crate::jenkins::links::BuildRef;
use crate::jenkins::types::{PipelineRun, TestReport};
use crate::summaries::{PipelineInfo, TestResultSummary};

use super::{build_resource, JenkinsClient, REPORT_TIMEOUT};

const TEST_REPORT_TREE: &str = "passCount,failCount,skipCount,duration,\
    suites[cases[className,name,status,errorDetails]]";

impl JenkinsClient {
    pub async fn test_results(&self, job_name: &str, build: &BuildRef) -> Result<TestResultSummary> {
        let url = self.build_url(job_name, build, &["testReport", "api", "json"])?;
        let report: TestReport = self
            .get_json(
                url,
                Some(TEST_REPORT_TREE),
                REPORT_TIMEOUT,
                &format!("test results for {}", build_resource(job_name, build)),
            )
            .await?;

        Ok(aggregate::summarize_tests(&report))
    }

    /// Stage breakdown from the Pipeline workflow API. This endpoint has no
    /// `tree` support.
    pub async fn pipeline_stages(&self, job_name: &str, build: &BuildRef) -> Result<PipelineInfo> {
        let url = self.build_url(job_name, build, &["wfapi", "describe"])?;
        let run: PipelineRun = self
            .get_json(
                url,
                None,
                REPORT_TIMEOUT,
                &format!("pipeline stages for {}", build_resource(job_name, build)),
            )
            .await?;

        Ok(aggregate::summarize_pipeline(job_name, &run))
    }
}
