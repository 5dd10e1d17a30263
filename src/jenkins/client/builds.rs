use futures::future::try_join;

use crate::error::Result;
use crate::jenkins::aggregate;
use crate::jenkins::links::{artifact_url, BuildRef};
use crate::jenkins::types::{BuildList, JenkinsBuild};
use crate::summaries::{ArtifactInfo, ArtifactList, BuildComparison, BuildHistory, BuildInfo};

use super::{build_resource, job_resource, JenkinsClient, METADATA_TIMEOUT};

const BUILD_TREE: &str = "number,url,result,timestamp,duration,estimatedDuration,displayName,building";
const ARTIFACT_TREE: &str = "number,url,artifacts[fileName,relativePath]";

pub const DEFAULT_HISTORY_LIMIT: usize = 10;
pub const MAX_HISTORY_LIMIT: usize = 100;

impl JenkinsClient {
    async fn fetch_build(&self, job_name: &str, build: &BuildRef) -> Result<JenkinsBuild> {
        let url = self.build_url(job_name, build, &["api", "json"])?;
        self.get_json(
            url,
            Some(BUILD_TREE),
            METADATA_TIMEOUT,
            &build_resource(job_name, build),
        )
        .await
    }

    pub async fn build_status(&self, job_name: &str, build: &BuildRef) -> Result<BuildInfo> {
        let raw = self.fetch_build(job_name, build).await?;
        Ok(aggregate::build_info(job_name, &raw))
    }

    /// The `limit` most recent builds, newest first. `limit` is clamped to
    /// `1..=100`.
    pub async fn build_history(&self, job_name: &str, limit: usize) -> Result<BuildHistory> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        let tree = format!("builds[{BUILD_TREE}]{{0,{limit}}}");
        let url = self.job_url(job_name, &["api", "json"])?;

        let list: BuildList = self
            .get_json(url, Some(&tree), METADATA_TIMEOUT, &job_resource(job_name))
            .await?;

        let builds: Vec<BuildInfo> = list
            .builds
            .iter()
            .take(limit)
            .map(|b| aggregate::build_info(job_name, b))
            .collect();

        Ok(BuildHistory {
            job_name: job_name.to_string(),
            total_builds: builds.len(),
            builds,
        })
    }

    /// Fetches both builds concurrently; fails if either fetch fails.
    pub async fn compare_builds(
        &self,
        job_name: &str,
        first: &BuildRef,
        second: &BuildRef,
    ) -> Result<BuildComparison> {
        let (b1, b2) = try_join(
            self.fetch_build(job_name, first),
            self.fetch_build(job_name, second),
        )
        .await?;

        Ok(aggregate::compare_builds(job_name, &b1, &b2))
    }

    pub async fn build_artifacts(&self, job_name: &str, build: &BuildRef) -> Result<ArtifactList> {
        let url = self.build_url(job_name, build, &["api", "json"])?;
        let raw: JenkinsBuild = self
            .get_json(
                url,
                Some(ARTIFACT_TREE),
                METADATA_TIMEOUT,
                &build_resource(job_name, build),
            )
            .await?;

        let artifacts: Vec<ArtifactInfo> = raw
            .artifacts
            .iter()
            .map(|a| ArtifactInfo {
                file_name: a.file_name.clone(),
                relative_path: a.relative_path.clone(),
                url: artifact_url(&raw.url, &a.relative_path),
            })
            .collect();

        Ok(ArtifactList {
            job_name: job_name.to_string(),
            build_number: raw.number,
            total: artifacts.len(),
            artifacts,
        })
    }
}
