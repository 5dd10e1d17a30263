use crate::error::{JenkinsError, Result};
use crate::jenkins::aggregate;
use crate::jenkins::types::{ComputerSet, JenkinsRoot, Queue};
use crate::summaries::{NodeStatus, QueueStatus, ServerHealth};

use super::{JenkinsClient, HEALTH_TIMEOUT, METADATA_TIMEOUT};

const HEALTH_TREE: &str = "mode,numExecutors,useSecurity";
const QUEUE_TREE: &str = "items[id,task[name],why,inQueueSince,stuck,blocked]";
const NODE_TREE: &str =
    "computer[displayName,offline,temporarilyOffline,offlineCauseReason,numExecutors,idle]";
const VERSION_HEADER: &str = "x-jenkins";

impl JenkinsClient {
    /// Confirms the server is reachable with the configured credentials and
    /// reports its version.
    pub async fn health(&self) -> Result<ServerHealth> {
        let url = self.root_url(&["api", "json"])?;
        let response = self
            .get(url, Some(HEALTH_TREE), HEALTH_TIMEOUT, "Jenkins root")
            .await?;

        let version = response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let root: JenkinsRoot = response.json().await.map_err(JenkinsError::from_transport)?;

        Ok(ServerHealth {
            status: "ok".to_string(),
            url: self.base_url().to_string(),
            version,
            mode: root.mode,
            num_executors: root.num_executors,
            use_security: root.use_security,
            authenticated: self.is_authenticated(),
        })
    }

    pub async fn queue_status(&self) -> Result<QueueStatus> {
        let url = self.root_url(&["queue", "api", "json"])?;
        let queue: Queue = self
            .get_json(url, Some(QUEUE_TREE), METADATA_TIMEOUT, "build queue")
            .await?;
        Ok(aggregate::summarize_queue(&queue))
    }

    pub async fn node_status(&self) -> Result<NodeStatus> {
        let url = self.root_url(&["computer", "api", "json"])?;
        let computers: ComputerSet = self
            .get_json(url, Some(NODE_TREE), METADATA_TIMEOUT, "node list")
            .await?;
        Ok(aggregate::summarize_nodes(&computers))
    }
}
