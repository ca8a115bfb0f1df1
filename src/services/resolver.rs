use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::http::HttpClient;
use crate::models::{AppError, GreetingRequest, GreetingResult, RemoteGreeting};
use crate::utils::append_query_param;

/// Default location of the remote greeting service
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/greet";

/// Produces greetings, preferring the remote service and falling back to the
/// local template table.
#[derive(Clone)]
pub struct GreetingResolver {
    client: Arc<dyn HttpClient>,
    endpoint: String,
}

impl GreetingResolver {
    #[must_use]
    pub fn new(client: Arc<dyn HttpClient>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolves a greeting for the request.
    ///
    /// Issues a single `GET <endpoint>?name=<name>`. A 2xx response carrying a
    /// string `message` wins regardless of the selected style; every other
    /// outcome resolves locally. Never fails.
    pub async fn resolve(&self, request: &GreetingRequest) -> GreetingResult {
        match self.fetch_remote(&request.name).await {
            Ok(message) => {
                info!(source = "remote", "Resolved greeting");
                GreetingResult::remote(message)
            }
            Err(e) => {
                warn!(error = %e, style = %request.style, "Falling back to local greeting");
                GreetingResult::local(request)
            }
        }
    }

    async fn fetch_remote(&self, name: &str) -> Result<String, AppError> {
        let url = append_query_param(&self.endpoint, "name", name);
        debug!(url = %url, "Requesting remote greeting");

        let body = self.client.get_json_value(&url).await?;
        let greeting: RemoteGreeting = serde_json::from_value(body)
            .map_err(|e| AppError::RemoteGreetingError(format!("Malformed response body: {e}")))?;
        Ok(greeting.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpClient;
    use crate::models::{GreetingSource, GreetingStyle};
    use serde_json::json;

    fn resolver_with(mock: MockHttpClient) -> GreetingResolver {
        GreetingResolver::new(Arc::new(mock), "http://greeter.test/api/greet")
    }

    #[tokio::test]
    async fn test_remote_message_wins_for_any_style() {
        for style in GreetingStyle::ALL {
            let mut mock = MockHttpClient::new();
            mock.expect_get_json_value()
                .times(1)
                .returning(|_| Ok(json!({"message": "Hi there"})));

            let result = resolver_with(mock)
                .resolve(&GreetingRequest::new("Ada", style))
                .await;
            assert_eq!(result, GreetingResult::remote("Hi there"));
        }
    }

    #[tokio::test]
    async fn test_name_is_url_encoded_query_parameter() {
        let mut mock = MockHttpClient::new();
        mock.expect_get_json_value()
            .withf(|url| {
                url.starts_with("http://greeter.test/api/greet?") && url.ends_with("?name=Mary%20Jane")
            })
            .times(1)
            .returning(|_| Ok(json!({"message": "Hey"})));

        let result = resolver_with(mock)
            .resolve(&GreetingRequest::new("Mary Jane", GreetingStyle::Default))
            .await;
        assert_eq!(result.source, GreetingSource::Remote);
    }

    #[tokio::test]
    async fn test_transport_error_falls_back_to_local() {
        let mut mock = MockHttpClient::new();
        mock.expect_get_json_value()
            .times(1)
            .returning(|_| Err(AppError::RemoteGreetingError("connection refused".to_string())));

        let request = GreetingRequest::new("Ada", GreetingStyle::Funny);
        let result = resolver_with(mock).resolve(&request).await;
        assert_eq!(result.source, GreetingSource::Local);
        assert_eq!(
            result.text,
            "Hey Ada, you're awesome! Now go take over the world! 😆"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back_to_local() {
        for body in [json!({}), json!({"message": 42}), json!(["Hi"]), json!("Hi")] {
            let mut mock = MockHttpClient::new();
            mock.expect_get_json_value()
                .times(1)
                .returning(move |_| Ok(body.clone()));

            let request = GreetingRequest::new("", GreetingStyle::Friendly);
            let result = resolver_with(mock).resolve(&request).await;
            assert_eq!(result, GreetingResult::local(&request));
        }
    }

    #[test]
    fn test_resolve_without_runtime_macro() {
        let mut mock = MockHttpClient::new();
        mock.expect_get_json_value()
            .returning(|_| Err(AppError::RemoteGreetingError("timed out".to_string())));

        let request = GreetingRequest::new("Lin", GreetingStyle::Motivational);
        let result = tokio_test::block_on(resolver_with(mock).resolve(&request));
        assert_eq!(result.text, "Lin, you're doing great! Keep pushing forward! 🚀");
    }
}
