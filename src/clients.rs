use reqwest::Client;

use crate::config::Config;
use crate::domain::{ApiError, NeoFeed};

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent("neo-filter/1.0")
            .build()?;

        Ok(Self { client })
    }

    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::UpstreamStatus(resp.status()));
        }
        resp.json().await.map_err(ApiError::Upstream)
    }
}

pub struct NeoClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl NeoClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
            base_url: config.neo_feed_url.clone(),
            api_key: config.nasa_key.clone(),
        })
    }

    pub async fn fetch_feed(&self, start_date: &str, end_date: &str) -> Result<NeoFeed, ApiError> {
        let api_key_param = if self.api_key.is_empty() {
            String::new()
        } else {
            format!("&api_key={}", self.api_key)
        };
        let url = format!(
            "{}?start_date={}&end_date={}{}",
            self.base_url, start_date, end_date, api_key_param
        );
        self.http.get_json(&url).await
    }
}
