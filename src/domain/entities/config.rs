use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1/";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub default_project: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            default_project: None,
        }
    }
}
