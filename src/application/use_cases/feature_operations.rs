use crate::application::use_cases::LoadEnvironments;
use crate::domain::{
    entities::{FeatureListPage, FilterState},
    repositories::FeatureRepository,
    services::build_api_filter_params,
};
use anyhow::Result;
use std::sync::Arc;

pub struct ListFeatures {
    load_environments: Arc<LoadEnvironments>,
    repository: Arc<dyn FeatureRepository>,
}

impl ListFeatures {
    pub fn new(
        load_environments: Arc<LoadEnvironments>,
        repository: Arc<dyn FeatureRepository>,
    ) -> Self {
        Self {
            load_environments,
            repository,
        }
    }

    /// Lists one page of features. Returns `Ok(None)` without calling the
    /// feature endpoint when the environment key is not part of the project.
    pub async fn execute(
        &self,
        filters: &FilterState,
        environment_api_key: &str,
        project_id: u64,
    ) -> Result<Option<FeatureListPage>> {
        let directory = self.load_environments.execute(project_id).await?;

        let Some(query) = build_api_filter_params(
            filters,
            filters.page,
            environment_api_key,
            project_id,
            &directory,
        ) else {
            tracing::debug!(
                "Environment {} not found in project {}, skipping feature request",
                environment_api_key,
                project_id
            );
            return Ok(None);
        };

        tracing::info!(
            "Listing features for project {} (environment {}, page {})",
            project_id,
            query.environment_id,
            query.page
        );
        let page = self.repository.list_features(&query).await?;
        tracing::debug!("Feature list returned {} of {} features", page.results.len(), page.count);

        Ok(Some(page))
    }
}
