use crate::domain::{
    entities::FeatureListPage, repositories::FeatureRepository, services::FeatureListQuery,
};
use crate::infrastructure::http::ApiClient;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub struct HttpFeatureRepository {
    client: Arc<ApiClient>,
}

impl HttpFeatureRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeatureRepository for HttpFeatureRepository {
    async fn list_features(&self, query: &FeatureListQuery) -> Result<FeatureListPage> {
        let path = format!("projects/{}/features/", query.project_id);
        let page = self.client.get_json(&path, Some(query)).await?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FilterState, TagId};
    use crate::domain::services::build_api_filter_params;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_filters_with_wire_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/42/features/"))
            .and(query_param("environmentId", "7"))
            .and(query_param("sort_direction", "ASC"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"count": 1, "next": null, "previous": null, "results": [
                    {"id": 1, "name": "dark_mode", "created_date": "2024-01-02T03:04:05Z"}
                ]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let filters = FilterState {
            tags: vec![TagId::Untagged],
            is_enabled: Some(true),
            ..FilterState::default()
        };
        let resolve = |_: &str| -> Option<u64> { Some(7) };
        let query = build_api_filter_params(&filters, 1, "dev-key", 42, &resolve).unwrap();

        let client = Arc::new(ApiClient::new(&format!("{}/api/v1/", server.uri()), None).unwrap());
        let page = HttpFeatureRepository::new(client)
            .list_features(&query)
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].name, "dark_mode");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].url.query(),
            Some(
                "environmentId=7&projectId=42&page=1&page_size=50&is_archived=false\
                 &is_enabled=true&tags=&tag_strategy=INTERSECTION&sort_field=name\
                 &sort_direction=ASC"
            )
        );
    }
}
