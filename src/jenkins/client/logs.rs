use log::info;

use crate::error::Result;
use crate::jenkins::console;
use crate::jenkins::links::BuildRef;
use crate::summaries::LogSearchResult;

use super::{build_resource, JenkinsClient, SCAN_TIMEOUT};

impl JenkinsClient {
    async fn fetch_console(&self, job_name: &str, build: &BuildRef) -> Result<String> {
        let url = self.build_url(job_name, build, &["consoleText"])?;
        let text = self
            .get_text(url, SCAN_TIMEOUT, &format!("console log of {}", build_resource(job_name, build)))
            .await?;
        info!("Fetched console log for {job_name} {build} ({} bytes)", text.len());
        Ok(text)
    }

    /// Console output of a build. With `tail_lines > 0` only the last lines
    /// are returned; otherwise logs over the configured ceiling are cut in
    /// the middle.
    pub async fn console_log(
        &self,
        job_name: &str,
        build: &BuildRef,
        tail_lines: Option<usize>,
    ) -> Result<String> {
        let text = self.fetch_console(job_name, build).await?;

        Ok(match tail_lines {
            Some(n) if n > 0 => console::tail_lines(&text, n),
            _ => console::truncate_middle(&text, self.log_limits().max_lines),
        })
    }

    pub async fn search_console_log(
        &self,
        job_name: &str,
        build: &BuildRef,
        pattern: &str,
        context_lines: Option<usize>,
        max_matches: Option<usize>,
    ) -> Result<LogSearchResult> {
        let limits = self.log_limits();
        let context = context_lines.unwrap_or(limits.context_lines);
        let max_matches = max_matches.unwrap_or(limits.max_matches);

        // Reject a bad pattern before downloading a potentially large log.
        console::search_lines("", pattern, context, max_matches)?;

        let text = self.fetch_console(job_name, build).await?;
        console::search_lines(&text, pattern, context, max_matches)
    }
}
