use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A feature flag as returned by the project feature list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFeature {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub tags: Vec<u64>,
    #[serde(default)]
    pub owners: Vec<FeatureOwner>,
    #[serde(default)]
    pub group_owners: Vec<FeatureGroupOwner>,
    #[serde(default)]
    pub default_enabled: bool,
    #[serde(default)]
    pub initial_value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureOwner {
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureGroupOwner {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// One page of the paginated feature list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureListPage {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<ProjectFeature>,
}
