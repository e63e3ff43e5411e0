use crate::application::use_cases::*;
use crate::domain::repositories::{EnvironmentRepository, FeatureRepository};
use std::sync::Arc;

pub struct UseCaseContainer {
    pub load_environments: Arc<LoadEnvironments>,
    pub list_features: Arc<ListFeatures>,
}

impl UseCaseContainer {
    pub fn new(
        environment_repository: Arc<dyn EnvironmentRepository>,
        feature_repository: Arc<dyn FeatureRepository>,
    ) -> Self {
        let load_environments = Arc::new(LoadEnvironments::new(environment_repository));

        Self {
            list_features: Arc::new(ListFeatures::new(
                Arc::clone(&load_environments),
                feature_repository,
            )),
            load_environments,
        }
    }
}
