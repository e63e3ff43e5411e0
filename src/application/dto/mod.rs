use crate::domain::entities::ProjectFeature;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDto {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub created: String,
    pub archived: bool,
    pub tags: Vec<u64>,
    pub owners: Vec<u64>,
    pub group_owners: Vec<u64>,
}

impl From<ProjectFeature> for FeatureDto {
    fn from(feature: ProjectFeature) -> Self {
        Self {
            id: feature.id,
            name: feature.name,
            description: feature.description,
            created: feature.created_date.format("%Y-%m-%d").to_string(),
            archived: feature.is_archived,
            tags: feature.tags,
            owners: feature.owners.iter().map(|owner| owner.id).collect(),
            group_owners: feature.group_owners.iter().map(|group| group.id).collect(),
        }
    }
}
