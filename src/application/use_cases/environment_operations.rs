use crate::domain::{entities::EnvironmentDirectory, repositories::EnvironmentRepository};
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct LoadEnvironments {
    repository: Arc<dyn EnvironmentRepository>,
}

impl LoadEnvironments {
    pub fn new(repository: Arc<dyn EnvironmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, project_id: u64) -> Result<EnvironmentDirectory> {
        let directory = self
            .repository
            .list_environments(project_id)
            .await
            .map(EnvironmentDirectory::new)
            .with_context(|| format!("Failed to load environments for project {}", project_id))?;

        if directory.is_empty() {
            tracing::warn!("Project {} has no environments", project_id);
        } else {
            tracing::debug!(
                "Loaded {} environments for project {}",
                directory.len(),
                project_id
            );
        }
        Ok(directory)
    }
}
