use crate::metrics::{ApiMetrics, MetricsCollector, RequestMetrics};
use masterblog_core::{BlogApiError, CoreError, NewPost, Post, SearchQuery};
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Envelope returned by the list endpoint. The search endpoint returns a
/// bare array instead; both shapes are part of the server contract and the
/// client preserves the asymmetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsEnvelope {
    pub posts: Vec<Post>,
}

#[derive(Debug)]
pub struct BlogApiClient {
    http_client: Client,
    metrics: Arc<MetricsCollector>,
}

impl BlogApiClient {
    /// Builds the shared HTTP client. No request timeout is configured: a
    /// hung request leaves the corresponding view waiting.
    pub fn new(user_agent: String) -> Self {
        let metrics = Arc::new(MetricsCollector::new());

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            metrics,
        }
    }

    /// Issues a request against `{base_url}{endpoint}`. Non-2xx statuses are
    /// logged and handed back as completed responses; only transport
    /// failures are errors.
    async fn make_request(
        &self,
        method: Method,
        base_url: &str,
        endpoint: &str,
        query_params: Option<&[(&str, &str)]>,
        body: Option<serde_json::Value>,
    ) -> Result<Response, CoreError> {
        let url = format!("{}{}", base_url, endpoint);
        let start_time = Instant::now();

        let mut request_builder = self.http_client.request(method.clone(), &url);

        // The original client set an explicit JSON content type on every
        // POST, body or not (the like endpoint sends headers only).
        if method == Method::POST || method == Method::PUT {
            request_builder =
                request_builder.header(reqwest::header::CONTENT_TYPE, "application/json");
        }

        if let Some(params) = query_params {
            request_builder = request_builder.query(params);
        }

        if let Some(body) = body {
            request_builder = request_builder.json(&body);
        }

        info!("Requesting {} {}", method, url);
        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);
                self.metrics
                    .record_request(RequestMetrics {
                        endpoint: endpoint.to_string(),
                        method: method.to_string(),
                        status_code: None,
                        response_time: start_time.elapsed(),
                        success: false,
                        error_type: Some("network_error".to_string()),
                    })
                    .await;
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
        } else {
            warn!("Request to {} returned status {}", endpoint, status);
        }

        self.metrics
            .record_request(RequestMetrics {
                endpoint: endpoint.to_string(),
                method: method.to_string(),
                status_code: Some(status.as_u16()),
                response_time: start_time.elapsed(),
                success: status.is_success(),
                error_type: None,
            })
            .await;

        Ok(response)
    }

    pub async fn list_posts(&self, base_url: &str) -> Result<Vec<Post>, CoreError> {
        let response = self
            .make_request(Method::GET, base_url, "/posts", None, None)
            .await?;

        let envelope: PostsEnvelope = response.json().await.map_err(|e| {
            error!("Failed to parse post listing: {}", e);
            CoreError::BlogApi(BlogApiError::InvalidResponse {
                details: "Failed to parse post listing".to_string(),
            })
        })?;

        info!("Retrieved {} posts", envelope.posts.len());
        Ok(envelope.posts)
    }

    pub async fn search_posts(
        &self,
        base_url: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Post>, CoreError> {
        let params = [
            ("title", query.title.as_str()),
            ("sort", query.sort.as_str()),
            ("direction", query.direction.as_str()),
        ];

        let response = self
            .make_request(Method::GET, base_url, "/posts/search", Some(&params), None)
            .await?;

        // Bare array, no envelope.
        let posts: Vec<Post> = response.json().await.map_err(|e| {
            error!("Failed to parse search results: {}", e);
            CoreError::BlogApi(BlogApiError::InvalidResponse {
                details: "Failed to parse search results".to_string(),
            })
        })?;

        info!("Search returned {} posts", posts.len());
        Ok(posts)
    }

    /// The server echoes the created post; any valid JSON body counts as
    /// completion and the payload is not used for rendering.
    pub async fn create_post(&self, base_url: &str, post: &NewPost) -> Result<(), CoreError> {
        let body = serde_json::to_value(post)?;
        let response = self
            .make_request(Method::POST, base_url, "/posts", None, Some(body))
            .await?;

        let created: serde_json::Value = response.json().await.map_err(|e| {
            error!("Failed to parse create-post response: {}", e);
            CoreError::BlogApi(BlogApiError::InvalidResponse {
                details: "Failed to parse create-post response".to_string(),
            })
        })?;

        debug!("Create post response: {}", created);
        Ok(())
    }

    pub async fn update_post(
        &self,
        base_url: &str,
        id: u64,
        post: &NewPost,
    ) -> Result<(), CoreError> {
        let endpoint = format!("/posts/{}", id);
        let body = serde_json::to_value(post)?;
        let response = self
            .make_request(Method::PUT, base_url, &endpoint, None, Some(body))
            .await?;

        let updated: serde_json::Value = response.json().await.map_err(|e| {
            error!("Failed to parse update-post response: {}", e);
            CoreError::BlogApi(BlogApiError::InvalidResponse {
                details: format!("Failed to parse update response for post {}", id),
            })
        })?;

        debug!("Update post response: {}", updated);
        Ok(())
    }

    pub async fn add_comment(
        &self,
        base_url: &str,
        id: u64,
        comment: &str,
    ) -> Result<(), CoreError> {
        let endpoint = format!("/posts/{}/comments", id);
        let body = serde_json::json!({ "comment": comment });
        let response = self
            .make_request(Method::POST, base_url, &endpoint, None, Some(body))
            .await?;

        let post: serde_json::Value = response.json().await.map_err(|e| {
            error!("Failed to parse add-comment response: {}", e);
            CoreError::BlogApi(BlogApiError::InvalidResponse {
                details: format!("Failed to parse comment response for post {}", id),
            })
        })?;

        debug!("Add comment response: {}", post);
        Ok(())
    }

    pub async fn like_post(&self, base_url: &str, id: u64) -> Result<(), CoreError> {
        let endpoint = format!("/posts/{}/like", id);
        let response = self
            .make_request(Method::POST, base_url, &endpoint, None, None)
            .await?;

        let post: serde_json::Value = response.json().await.map_err(|e| {
            error!("Failed to parse like response: {}", e);
            CoreError::BlogApi(BlogApiError::InvalidResponse {
                details: format!("Failed to parse like response for post {}", id),
            })
        })?;

        debug!("Like response: {}", post);
        Ok(())
    }

    /// The original client never read the delete response body, so neither
    /// does this one; completion of the round trip is enough to reload.
    pub async fn delete_post(&self, base_url: &str, id: u64) -> Result<(), CoreError> {
        let endpoint = format!("/posts/{}", id);
        self.make_request(Method::DELETE, base_url, &endpoint, None, None)
            .await?;

        info!("Deleted post {}", id);
        Ok(())
    }

    pub async fn get_metrics(&self) -> ApiMetrics {
        self.metrics.get_metrics().await
    }

    pub async fn reset_metrics(&self) {
        self.metrics.reset_metrics().await;
    }
}
