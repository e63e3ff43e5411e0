use crate::infrastructure::http::ApiError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

pub struct ApiClient {
    base_url: Url,
    api_token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(api_url: &str, api_token: Option<String>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&with_trailing_slash(api_url))?;
        Ok(Self {
            base_url,
            api_token,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.api_token {
            match HeaderValue::from_str(&format!("Token {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!(
                    "API token contains invalid header characters, sending request without it"
                ),
            }
        }
        headers
    }

    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let mut request = self.http.get(url.clone()).headers(self.headers());
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("GET {} failed with {}", url, status);
            return Err(ApiError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: url.path().to_string(),
            source,
        })
    }
}

fn with_trailing_slash(api_url: &str) -> String {
    if api_url.ends_with('/') {
        api_url.to_string()
    } else {
        format!("{}/", api_url)
    }
}
