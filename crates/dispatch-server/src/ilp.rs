//! Read-only client port for the Information-Logistics Platform.
//!
//! The planner treats a missing collection as empty and degrades
//! gracefully, so every accessor flattens transport failures, non-2xx
//! statuses and undecodable bodies into `None` with a warning log.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use dispatch_core::models::{Drone, DronesForServicePoint, ServicePoint};
use dispatch_core::Region;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only accessors for the four upstream collections.
#[async_trait]
pub trait IlpSource: Send + Sync {
    async fn drones(&self) -> Option<Vec<Drone>>;
    async fn service_points(&self) -> Option<Vec<ServicePoint>>;
    async fn drones_for_service_points(&self) -> Option<Vec<DronesForServicePoint>>;
    async fn restricted_areas(&self) -> Option<Vec<Region>>;
}

/// HTTP implementation backed by the ILP REST service.
pub struct IlpClient {
    client: Client,
    base_url: String,
}

impl IlpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Option<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);

        let response = match self.client.get(&url).timeout(FETCH_TIMEOUT).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("ILP fetch {} failed: {}", url, err);
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!("ILP fetch {} returned {}", url, response.status());
            return None;
        }

        match response.json::<Vec<T>>().await {
            Ok(items) => Some(items),
            Err(err) => {
                tracing::warn!("ILP fetch {} returned an undecodable body: {}", url, err);
                None
            }
        }
    }
}

#[async_trait]
impl IlpSource for IlpClient {
    async fn drones(&self) -> Option<Vec<Drone>> {
        self.fetch("/drones").await
    }

    async fn service_points(&self) -> Option<Vec<ServicePoint>> {
        self.fetch("/service-points").await
    }

    async fn drones_for_service_points(&self) -> Option<Vec<DronesForServicePoint>> {
        self.fetch("/drones-for-service-points").await
    }

    async fn restricted_areas(&self) -> Option<Vec<Region>> {
        self.fetch("/restricted-areas").await
    }
}
