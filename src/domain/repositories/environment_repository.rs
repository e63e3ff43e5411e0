use crate::domain::entities::Environment;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    async fn list_environments(&self, project_id: u64) -> Result<Vec<Environment>>;
}
