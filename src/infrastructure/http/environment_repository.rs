use crate::domain::{entities::Environment, repositories::EnvironmentRepository};
use crate::infrastructure::http::ApiClient;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// The environments endpoint answers with either a bare list or a page.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnvironmentList {
    Page { results: Vec<Environment> },
    Bare(Vec<Environment>),
}

impl EnvironmentList {
    fn into_vec(self) -> Vec<Environment> {
        match self {
            EnvironmentList::Page { results } => results,
            EnvironmentList::Bare(environments) => environments,
        }
    }
}

pub struct HttpEnvironmentRepository {
    client: Arc<ApiClient>,
}

impl HttpEnvironmentRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EnvironmentRepository for HttpEnvironmentRepository {
    async fn list_environments(&self, project_id: u64) -> Result<Vec<Environment>> {
        let path = format!("projects/{}/environments/", project_id);
        let list: EnvironmentList = self.client.get_json::<_, ()>(&path, None).await?;
        Ok(list.into_vec())
    }
}
