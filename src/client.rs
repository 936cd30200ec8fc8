//! http client
//!
//! posts rendered queries as `{"query", "variables"}` json, decodes the
//! graphql envelope, and implements [`Transport`] for the builder.

use crate::builder::QueryBuilder;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ValidationError};
use crate::graphql::GraphQlResponse;
use crate::transport::Transport;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use url::Url;

/// graphql client over http
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = match &config.http_client {
            Some(http) => http.clone(),
            None => {
                let mut builder = reqwest::Client::builder()
                    .default_headers(config.default_headers()?)
                    .user_agent(config.user_agent.clone())
                    .timeout(config.timeout)
                    .danger_accept_invalid_certs(!config.verify_ssl);
                if let Some(customize) = &config.http_client_builder {
                    builder = customize(builder);
                }
                builder.build()?
            }
        };

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// start a query builder bound to this client
    pub fn query(
        &self,
        operation_name: impl Into<String>,
    ) -> std::result::Result<QueryBuilder<'_, Self>, ValidationError> {
        QueryBuilder::new(self, operation_name)
    }

    /// execute a query string and return the raw response envelope
    pub async fn execute_raw(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<GraphQlResponse<serde_json::Value>> {
        self.execute_as(query, variables).await
    }

    /// execute a query string and deserialize the data into `T`
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<GraphQlResponse<T>> {
        self.execute_with(query, variables, |url, body| async move {
            let response = self.http.post(url).json(&body).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok((status, text))
        })
        .await
    }
}

impl Transport for Client {
    async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let response = self.execute_raw(query, Some(variables)).await?;
        Ok(response.into_data())
    }
}

fn parse_graphql_response<T: DeserializeOwned>(
    status: StatusCode,
    text: String,
) -> Result<GraphQlResponse<T>> {
    // error bodies are not always json
    if !status.is_success() && serde_json::from_str::<serde_json::Value>(&text).is_err() {
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: Vec::new(),
            body: text,
            message: format!("graphql http error: {}", status),
        });
    }

    let parsed: GraphQlResponse<T> = serde_json::from_str(&text)?;
    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .first()
            .map(|err| err.message.clone())
            .unwrap_or_else(|| "graphql error".to_string());
        tracing::warn!(
            target: "graphql_builder::client",
            status = status.as_u16(),
            errors = parsed.errors.len(),
            "graphql error response: {}",
            message
        );
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: parsed.errors,
            body: text,
            message,
        });
    }

    if !status.is_success() {
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: Vec::new(),
            body: text,
            message: format!("graphql http error: {}", status),
        });
    }

    Ok(parsed)
}

impl Client {
    pub(crate) async fn execute_with<T: DeserializeOwned, F, Fut>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
        send: F,
    ) -> Result<GraphQlResponse<T>>
    where
        F: FnOnce(Url, serde_json::Value) -> Fut,
        Fut: Future<Output = Result<(StatusCode, String)>>,
    {
        let url = self.config.endpoint.clone();
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or_else(|| serde_json::json!({})),
        });

        tracing::debug!(target: "graphql_builder::client", %url, "sending graphql request");
        let (status, text) = send(url, body).await?;
        tracing::debug!(target: "graphql_builder::client", status = status.as_u16(), "received graphql response");
        parse_graphql_response(status, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn test_client(config: ClientConfig) -> Client {
        config.validate().unwrap();
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("test http client");
        Client {
            config: Arc::new(config),
            http,
        }
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_posts_query_and_variables() {
        let client = test_client(ClientConfig::new("http://localhost:1234/api/graphql"));
        let response = client
            .execute_with::<serde_json::Value, _, _>(
                "query Q {\n    ok()\n}",
                Some(serde_json::json!({"id": 1})),
                |url, body| async move {
                    assert_eq!(url.path(), "/api/graphql");
                    assert_eq!(body["query"], "query Q {\n    ok()\n}");
                    assert_eq!(body["variables"]["id"], 1);
                    Ok((StatusCode::OK, "{\"data\": {\"ok\": true}}".to_string()))
                },
            )
            .await
            .unwrap();

        assert_eq!(response.data.unwrap()["ok"], true);
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_missing_variables_sent_as_empty_object() {
        let client = test_client(ClientConfig::new("http://localhost:1234/graphql"));
        client
            .execute_with::<serde_json::Value, _, _>("query Q {\n\n}", None, |_url, body| async move {
                assert_eq!(body["variables"], serde_json::json!({}));
                Ok((StatusCode::OK, "{\"data\": {}}".to_string()))
            })
            .await
            .unwrap();
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_graphql_error() {
        let client = test_client(ClientConfig::new("http://localhost:1234/graphql"));
        let err = client
            .execute_with::<serde_json::Value, _, _>("query Q {\n\n}", None, |_url, _body| async move {
                Ok((
                    StatusCode::OK,
                    "{\"data\": null, \"errors\": [{\"message\": \"boom\"}]}".to_string(),
                ))
            })
            .await
            .unwrap_err();

        match err {
            Error::GraphQl {
                status, message, errors, ..
            } => {
                assert_eq!(status, Some(200));
                assert_eq!(message, "boom");
                assert_eq!(errors.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_typed_success() {
        #[derive(Debug, Deserialize)]
        struct Data {
            value: i64,
        }
        let client = test_client(ClientConfig::new("http://localhost:1234/graphql"));
        let response = client
            .execute_with::<Data, _, _>("query Q {\n    value()\n}", None, |_url, _body| async move {
                Ok((StatusCode::OK, "{\"data\": {\"value\": 7}}".to_string()))
            })
            .await
            .unwrap();

        assert_eq!(response.data.unwrap().value, 7);
    }

    #[test]
    fn test_invalid_credentials_rejected_on_new() {
        let config = ClientConfig::new("http://localhost:1234/graphql").with_auth_key(1, "bad\nkey");
        let err = Client::new(config).err().expect("expected error");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_query_binds_builder_to_client() {
        let client = Client::new(ClientConfig::new("http://localhost:1234/graphql")).unwrap();
        let mut query = client.query("GetNews").unwrap();
        query.field("title", "", "").unwrap();
        assert_eq!(query.query(), "query GetNews {\n    title()\n}");
        assert!(client.query("not valid").is_err());
    }

    #[test]
    fn test_parse_graphql_response_success() {
        #[derive(Debug, Deserialize)]
        struct Data {
            value: i64,
        }

        let text = "{\"data\": {\"value\": 9}}".to_string();
        let parsed = parse_graphql_response::<Data>(StatusCode::OK, text).unwrap();
        assert_eq!(parsed.data.unwrap().value, 9);
    }

    #[test]
    fn test_parse_graphql_response_http_error() {
        let text = "{\"data\": null}".to_string();
        let err =
            parse_graphql_response::<serde_json::Value>(StatusCode::BAD_GATEWAY, text).unwrap_err();
        assert!(matches!(err, Error::GraphQl { status: Some(502), .. }));
    }

    #[test]
    fn test_parse_graphql_response_non_json_error_body() {
        let err = parse_graphql_response::<serde_json::Value>(
            StatusCode::UNAUTHORIZED,
            "<html>denied</html>".to_string(),
        )
        .unwrap_err();
        assert!(err.is_auth_error());
        assert!(matches!(err, Error::GraphQl { ref body, .. } if body == "<html>denied</html>"));
    }

    #[test]
    fn test_parse_graphql_response_invalid_json() {
        let err = parse_graphql_response::<serde_json::Value>(StatusCode::OK, "nope".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
