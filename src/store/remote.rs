use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::AppError;
use crate::models::order::Order;
use crate::store::{OrderPatch, OrderStore};

// Client for a document-store REST surface: one collection of order
// documents, filtered reads by client_id, partial-field PATCH updates.
// Updates are per-document atomic on the remote side; no retries here.
pub struct RemoteDocumentStore {
    client: reqwest::Client,
    base_url: String,
    collection: String,
}

impl RemoteDocumentStore {
    pub fn new(base_url: String, collection: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Internal(format!("failed to build http client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    fn document_url(&self, order_id: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.collection, order_id)
    }
}

#[async_trait]
impl OrderStore for RemoteDocumentStore {
    async fn orders_for_client(&self, client_id: &str) -> Result<Vec<Order>, AppError> {
        let response = self
            .client
            .get(self.collection_url())
            .query(&[("client_id", client_id)])
            .send()
            .await
            .map_err(|err| AppError::Store(format!("order query failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::Store(format!(
                "order query failed with status {}",
                response.status()
            )));
        }

        response
            .json::<Vec<Order>>()
            .await
            .map_err(|err| AppError::Store(format!("order query returned bad payload: {err}")))
    }

    async fn apply_patch(&self, order_id: &str, patch: OrderPatch) -> Result<(), AppError> {
        let response = self
            .client
            .patch(self.document_url(order_id))
            .json(&patch)
            .send()
            .await
            .map_err(|err| AppError::Store(format!("order update failed: {err}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!(
                "order {} not found",
                order_id
            ))),
            status if status.is_success() => Ok(()),
            status => Err(AppError::Store(format!(
                "order update failed with status {status}"
            ))),
        }
    }
}
