//! MCP tool surface over stdio. Each tool validates its arguments, runs one
//! client operation and renders the outcome as a single text block.

mod params;

use log::{error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result as JenkinsResult;
use crate::jenkins::JenkinsClient;

use params::{
    BuildHistoryParams, BuildParams, CompareBuildsParams, ConsoleLogParams, FailedJobsParams,
    JobParams, SearchConsoleParams, SearchJobsParams,
};

pub const SERVER_NAME: &str = "jenkins-mcp";

const INSTRUCTIONS: &str = "Read-only access to a Jenkins server. Job names may be nested \
folders written as folder/job. Build selectors accept a number or one of lastBuild, \
lastSuccessfulBuild, lastFailedBuild, lastCompletedBuild.";

#[derive(Clone)]
pub struct JenkinsMcpServer {
    client: Arc<JenkinsClient>,
    tool_router: ToolRouter<Self>,
}

impl JenkinsMcpServer {
    pub fn new(client: JenkinsClient) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl JenkinsMcpServer {
    #[tool(description = "Check that Jenkins is reachable and report its version, mode and executor count")]
    async fn check_health(&self) -> Result<CallToolResult, McpError> {
        Ok(respond("check_health", self.client.health().await))
    }

    #[tool(description = "List all top-level jobs with their status and last build")]
    async fn list_jobs(&self) -> Result<CallToolResult, McpError> {
        Ok(respond("list_jobs", self.client.list_jobs().await))
    }

    #[tool(description = "Find jobs whose name matches a glob pattern such as *deploy* or api-?")]
    async fn search_jobs(
        &self,
        Parameters(req): Parameters<SearchJobsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let pattern = req.pattern()?;
            self.client.search_jobs(pattern).await
        }
        .await;
        Ok(respond("search_jobs", result))
    }

    #[tool(description = "Get a job's status, description, health report and last build references")]
    async fn get_job_status(
        &self,
        Parameters(req): Parameters<JobParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            self.client.job_status(job).await
        }
        .await;
        Ok(respond("get_job_status", result))
    }

    #[tool(description = "Get the status, timing and URL of one build")]
    async fn get_build_status(
        &self,
        Parameters(req): Parameters<BuildParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            let build = req.build()?;
            self.client.build_status(job, &build).await
        }
        .await;
        Ok(respond("get_build_status", result))
    }

    #[tool(description = "List the most recent builds of a job, newest first")]
    async fn get_build_history(
        &self,
        Parameters(req): Parameters<BuildHistoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            self.client.build_history(job, req.limit()).await
        }
        .await;
        Ok(respond("get_build_history", result))
    }

    #[tool(description = "Get a build's console output. Use tailLines for the end of the log; long logs are truncated in the middle")]
    async fn get_console_log(
        &self,
        Parameters(req): Parameters<ConsoleLogParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            let build = req.build()?;
            self.client.console_log(job, &build, req.tail_lines()).await
        }
        .await;
        Ok(respond_text("get_console_log", result))
    }

    #[tool(description = "Search a build's console output with a case-insensitive regex and return matches with surrounding lines")]
    async fn search_console_log(
        &self,
        Parameters(req): Parameters<SearchConsoleParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            let pattern = req.pattern()?;
            let build = req.build()?;
            let max_matches = req.max_matches()?;
            self.client
                .search_console_log(job, &build, pattern, req.context_lines, max_matches)
                .await
        }
        .await;
        Ok(respond("search_console_log", result))
    }

    #[tool(description = "List failed or unstable builds among each job's 10 most recent builds within the last N hours (default 24)")]
    async fn get_failed_jobs(
        &self,
        Parameters(req): Parameters<FailedJobsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "get_failed_jobs",
            self.client.failed_jobs(req.hours_ago()).await,
        ))
    }

    #[tool(description = "Summarize failures across all jobs within the last N hours (default 24)")]
    async fn get_recent_failures(
        &self,
        Parameters(req): Parameters<FailedJobsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "get_recent_failures",
            self.client.recent_failures(req.hours_ago()).await,
        ))
    }

    #[tool(description = "Compare two builds of a job: results and duration change")]
    async fn compare_builds(
        &self,
        Parameters(req): Parameters<CompareBuildsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            let (first, second) = req.builds()?;
            self.client.compare_builds(job, &first, &second).await
        }
        .await;
        Ok(respond("compare_builds", result))
    }

    #[tool(description = "Get test counts and the first failing tests of a build")]
    async fn get_test_results(
        &self,
        Parameters(req): Parameters<BuildParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            let build = req.build()?;
            self.client.test_results(job, &build).await
        }
        .await;
        Ok(respond("get_test_results", result))
    }

    #[tool(description = "Get the pipeline stages of a build and the first stage that failed")]
    async fn get_pipeline_stages(
        &self,
        Parameters(req): Parameters<BuildParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            let build = req.build()?;
            self.client.pipeline_stages(job, &build).await
        }
        .await;
        Ok(respond("get_pipeline_stages", result))
    }

    #[tool(description = "List items waiting in the build queue and why they are waiting")]
    async fn get_queue_status(&self) -> Result<CallToolResult, McpError> {
        Ok(respond("get_queue_status", self.client.queue_status().await))
    }

    #[tool(description = "List build agents with online state and executor counts")]
    async fn get_node_status(&self) -> Result<CallToolResult, McpError> {
        Ok(respond("get_node_status", self.client.node_status().await))
    }

    #[tool(description = "List the archived artifacts of a build with download URLs")]
    async fn get_build_artifacts(
        &self,
        Parameters(req): Parameters<BuildParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = async {
            let job = req.job_name()?;
            let build = req.build()?;
            self.client.build_artifacts(job, &build).await
        }
        .await;
        Ok(respond("get_build_artifacts", result))
    }
}

#[tool_handler]
impl ServerHandler for JenkinsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

/// Serves tools over stdin/stdout until the peer disconnects.
pub async fn serve_stdio(client: JenkinsClient) -> anyhow::Result<()> {
    info!("Serving {SERVER_NAME} on stdio for {}", client.base_url());

    let service = JenkinsMcpServer::new(client).serve(stdio()).await?;
    service.waiting().await?;

    info!("Client disconnected, shutting down");
    Ok(())
}

/// Pretty JSON on success, `Error: <message>` on failure.
fn render<T: Serialize>(result: JenkinsResult<T>) -> Result<String, String> {
    match result {
        Ok(value) => serde_json::to_string_pretty(&value)
            .map_err(|e| format!("Error: failed to encode response: {e}")),
        Err(e) => Err(format!("Error: {e}")),
    }
}

fn into_tool_result(tool: &str, rendered: Result<String, String>) -> CallToolResult {
    match rendered {
        Ok(text) => {
            info!("Tool {tool} succeeded ({} bytes)", text.len());
            CallToolResult::success(vec![Content::text(text)])
        }
        Err(message) => {
            error!("Tool {tool} failed: {message}");
            CallToolResult::error(vec![Content::text(message)])
        }
    }
}

fn respond<T: Serialize>(tool: &str, result: JenkinsResult<T>) -> CallToolResult {
    into_tool_result(tool, render(result))
}

/// Console text goes out as-is rather than as a JSON string.
fn respond_text(tool: &str, result: JenkinsResult<String>) -> CallToolResult {
    into_tool_result(tool, result.map_err(|e| format!("Error: {e}")))
}
