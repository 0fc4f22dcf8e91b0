// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! HTTP transport for the OctoFit REST API

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::error::{ApiError, ApiResult};
use super::normalize::{collect_positional, collect_records};
use super::resource::{Activities, LeaderboardApi, ResourceApi, ResourceKind, Teams, Users, Workouts};
use crate::config::{Config, Environment};
use crate::constants::endpoints;
use crate::logging::AppLogger;
use crate::models::LeaderboardEntry;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Shared connection to one API origin
///
/// The origin is fixed when the client is built and never re-resolved.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Build a client for the origin chosen by config and environment
    pub fn from_config(config: &Config, env: &Environment) -> Self {
        Self::new(config.api_base(env))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resource<K: ResourceKind>(&self) -> HttpResource<K> {
        HttpResource {
            client: self.clone(),
            _kind: PhantomData,
        }
    }

    pub fn users(&self) -> HttpResource<Users> {
        self.resource()
    }

    pub fn teams(&self) -> HttpResource<Teams> {
        self.resource()
    }

    pub fn activities(&self) -> HttpResource<Activities> {
        self.resource()
    }

    pub fn workouts(&self) -> HttpResource<Workouts> {
        self.resource()
    }

    /// `{base}/{collection}/`
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}/", self.base_url, collection)
    }

    /// `{base}/{collection}/{id}/`
    pub fn record_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}/",
            self.base_url,
            collection,
            urlencoding::encode(id)
        )
    }

    /// `{base}/{collection}/{action}/`, for server actions on the collection
    pub fn collection_action_url(&self, collection: &str, action: &str) -> String {
        format!("{}/{}/{}/", self.base_url, collection, action)
    }

    /// `{base}/{collection}/{id}/{action}/`
    pub fn record_action_url(&self, collection: &str, id: &str, action: &str) -> String {
        format!(
            "{}/{}/{}/{}/",
            self.base_url,
            collection,
            urlencoding::encode(id),
            action
        )
    }

    pub async fn get_json(&self, url: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        let request = self.request(Method::GET, url).query(query);
        let response = self.execute(Method::GET, url, request).await?;
        read_json(response).await
    }

    pub async fn send_json<B>(&self, method: Method, url: &str, body: &B) -> ApiResult<Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = self.request(method.clone(), url).json(body);
        let response = self.execute(method, url, request).await?;
        read_json(response).await
    }

    pub async fn delete_url(&self, url: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, url);
        self.execute(Method::DELETE, url, request).await?;
        Ok(())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
    }

    async fn execute(&self, method: Method, url: &str, request: RequestBuilder) -> ApiResult<Response> {
        let started = Instant::now();
        let path = url.strip_prefix(self.base_url()).unwrap_or(url);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                AppLogger::log_api_failure(method.as_str(), path, &e.to_string());
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        AppLogger::log_api_request(
            method.as_str(),
            path,
            status.as_u16(),
            started.elapsed().as_millis() as u64,
        );

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        };
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

async fn read_json(response: Response) -> ApiResult<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

/// REST client for one resource kind
pub struct HttpResource<K> {
    client: ApiClient,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for HttpResource<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> HttpResource<K> {
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Raw list response before normalization
    pub async fn list_raw(&self) -> ApiResult<Value> {
        self.client
            .get_json(&self.client.collection_url(K::PATH), &[])
            .await
    }
}

#[async_trait]
impl<K: ResourceKind> ResourceApi<K> for HttpResource<K> {
    async fn list(&self) -> ApiResult<Vec<K::Record>> {
        let payload = self.list_raw().await?;
        let records = collect_records(payload);
        debug!("Loaded {} {}", records.len(), K::PLURAL);
        Ok(records)
    }

    async fn get(&self, id: &str) -> ApiResult<K::Record> {
        let payload = self
            .client
            .get_json(&self.client.record_url(K::PATH, id), &[])
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn create(&self, payload: &K::Payload) -> ApiResult<Value> {
        self.client
            .send_json(Method::POST, &self.client.collection_url(K::PATH), payload)
            .await
    }

    async fn update(&self, id: &str, payload: &K::Payload) -> ApiResult<Value> {
        self.client
            .send_json(Method::PUT, &self.client.record_url(K::PATH, id), payload)
            .await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete_url(&self.client.record_url(K::PATH, id))
            .await
    }
}

#[async_trait]
impl LeaderboardApi for ApiClient {
    async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>> {
        let payload = self
            .get_json(&self.collection_url(endpoints::LEADERBOARD), &[])
            .await?;
        Ok(collect_positional(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_kind_scoped_with_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(
            client.collection_url(Users::PATH),
            "http://localhost:8000/api/users/"
        );
        assert_eq!(
            client.record_url(Activities::PATH, "abc123"),
            "http://localhost:8000/api/activities/abc123/"
        );
        assert_eq!(
            client.record_action_url(Teams::PATH, "t1", "add_member"),
            "http://localhost:8000/api/teams/t1/add_member/"
        );
        assert_eq!(
            client.collection_action_url(Workouts::PATH, "recommend"),
            "http://localhost:8000/api/workouts/recommend/"
        );
    }

    #[test]
    fn test_record_ids_are_path_encoded() {
        let client = ApiClient::new("http://localhost:8000/api");
        assert_eq!(
            client.record_url(Users::PATH, "a/b c"),
            "http://localhost:8000/api/users/a%2Fb%20c/"
        );
    }
}
