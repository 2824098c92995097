//! Base-URL API client speaking the `ResponseMsg` envelope
//!
//! Callers never see an `Err`: transport failures, bad statuses and
//! undecodable bodies all come back as a failed `ResponseMsg` whose message
//! is the error text.

use super::client::HttpClient;
use super::error::HttpError;
use crate::config::HttpConfig;
use crate::response::ResponseMsg;

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub base_url: String,
    client: HttpClient,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, client: HttpClient) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, HttpError> {
        Ok(Self::new(
            config.base_url.clone(),
            HttpClient::from_config(config)?,
        ))
    }

    /// GET `base_url + path`, with `params` appended as `?k=v&...` in order.
    ///
    /// Keys and values are appended as given, without percent-encoding.
    pub async fn get<K, V>(&self, path: &str, params: &[(K, V)]) -> ResponseMsg
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = self.url_with_params(path, params);
        let result = match self.client.get(&url).await {
            Ok(body) => decode_response(&url, &body),
            Err(e) => Err(e),
        };
        into_response(result)
    }

    /// POST `body` as JSON to `base_url + path`.
    pub async fn post(&self, path: &str, body: impl Into<String>) -> ResponseMsg {
        let url = format!("{}{}", self.base_url, path);
        let result = match self.client.post(&url, body).await {
            Ok(body) => decode_response(&url, &body),
            Err(e) => Err(e),
        };
        into_response(result)
    }

    fn url_with_params<K, V>(&self, path: &str, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

fn decode_response(url: &str, body: &str) -> Result<ResponseMsg, HttpError> {
    serde_json::from_str(body).map_err(|e| HttpError::decode(url, e.to_string()))
}

fn into_response(result: Result<ResponseMsg, HttpError>) -> ResponseMsg {
    match result {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!(url = %e.url(), error = %e, "API call failed");
            let message = e.to_string();
            match e.status_code() {
                Some(status) => ResponseMsg::failed_with_status(status as i32, Some(&message)),
                None => ResponseMsg::failed(Some(&message)),
            }
        }
    }
}
