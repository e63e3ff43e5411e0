pub mod filter_params;
pub mod validation;

pub use filter_params::{
    build_api_filter_params, build_url_params, get_filters_from_params, has_active_filters,
    EnvironmentResolver, FeatureListQuery, UrlParams, PAGE_SIZE,
};
pub use validation::EnvironmentKeyValidator;
