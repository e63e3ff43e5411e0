use crate::domain::entities::FeatureListPage;
use crate::domain::services::FeatureListQuery;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait FeatureRepository: Send + Sync {
    async fn list_features(&self, query: &FeatureListQuery) -> Result<FeatureListPage>;
}
