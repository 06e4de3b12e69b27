//! PostgREST-style HTTP adapter

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use super::{DataApi, DataApiError, DataApiResult, Filter, Row};

/// Data API over HTTP (`<base>/rest/v1/<table>`)
///
/// Credentials are checked on every call, so a server started without them
/// still answers each function with a failure envelope.
#[derive(Debug, Clone)]
pub struct RestDataApi {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl RestDataApi {
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.filter(|u| !u.trim().is_empty()),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn request(
        &self,
        method: reqwest::Method,
        table: &str,
        filters: &[Filter],
    ) -> DataApiResult<RequestBuilder> {
        let (Some(base), Some(key)) = (&self.base_url, &self.api_key) else {
            return Err(DataApiError::MissingCredentials);
        };

        let url = format!("{}/rest/v1/{}", base.trim_end_matches('/'), table);
        let query: Vec<(String, String)> = filters.iter().map(Filter::to_query).collect();

        Ok(self
            .client
            .request(method, url)
            .query(&query)
            .header("apikey", key)
            .bearer_auth(key))
    }

    async fn check(response: Response) -> DataApiResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(DataApiError::Rejected { status, body })
    }

    async fn rows(response: Response) -> DataApiResult<Vec<Row>> {
        match response.json::<Value>().await? {
            Value::Array(rows) => Ok(rows),
            other => Err(DataApiError::InvalidResponse(format!(
                "expected an array of rows, got {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl DataApi for RestDataApi {
    fn ready(&self) -> DataApiResult<()> {
        match (&self.base_url, &self.api_key) {
            (Some(_), Some(_)) => Ok(()),
            _ => Err(DataApiError::MissingCredentials),
        }
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> DataApiResult<Vec<Row>> {
        let response = self
            .request(reqwest::Method::GET, table, filters)?
            .query(&[("select", "*")])
            .send()
            .await?;
        Self::rows(Self::check(response).await?).await
    }

    async fn insert(&self, table: &str, row: Row) -> DataApiResult<Vec<Row>> {
        let response = self
            .request(reqwest::Method::POST, table, &[])?
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        Self::rows(Self::check(response).await?).await
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> DataApiResult<()> {
        let response = self
            .request(reqwest::Method::PATCH, table, filters)?
            .json(&patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_credentials_fail_every_call() {
        let api = RestDataApi::new(None, Some("key".to_string()));

        assert!(matches!(
            api.select("ai_agents", &[]).await,
            Err(DataApiError::MissingCredentials)
        ));
        assert!(matches!(
            api.insert("ai_agents", json!({})).await,
            Err(DataApiError::MissingCredentials)
        ));

        assert!(api.ready().is_err());

        let blank = RestDataApi::new(Some("http://localhost".to_string()), Some("  ".to_string()));
        assert!(matches!(
            blank.update("ai_agents", &[], json!({})).await,
            Err(DataApiError::MissingCredentials)
        ));
    }

    #[test]
    fn test_request_shape() {
        let api = RestDataApi::new(
            Some("https://db.example.com/".to_string()),
            Some("secret".to_string()),
        );
        let request = api
            .request(
                reqwest::Method::GET,
                "user_agents",
                &[Filter::eq("user_wallet", "0xabc"), Filter::eq("status", "active")],
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://db.example.com/rest/v1/user_agents?user_wallet=eq.0xabc&status=eq.active"
        );
        assert_eq!(request.headers()["apikey"], "secret");
        assert_eq!(request.headers()["authorization"], "Bearer secret");
    }
}
