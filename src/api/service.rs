//! 服务信息 API

use std::sync::Arc;

use super::item_path;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::envelope::ListResponseData;
use crate::models::service::{BatchDeleteRequest, Service, ServicePayload, ServiceQuery};
use crate::models::RecordId;

#[derive(Clone)]
pub struct ServiceApi {
    client: Arc<ApiClient>,
}

impl ServiceApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ServiceQuery) -> Result<ListResponseData<Service>> {
        self.client.get("/api/services", query).await
    }

    pub async fn get(&self, id: &RecordId) -> Result<Service> {
        self.client.get(&item_path("/api/services", id), &()).await
    }

    pub async fn create(&self, payload: &ServicePayload) -> Result<Service> {
        self.client.post("/api/services", payload).await
    }

    /// 局部更新
    pub async fn update(&self, id: &RecordId, payload: &ServicePayload) -> Result<Service> {
        self.client
            .patch(&item_path("/api/services", id), payload)
            .await
    }

    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        self.client.delete(&item_path("/api/services", id)).await
    }

    /// 批量删除，一次请求提交全部 id
    pub async fn batch_delete(&self, ids: &[RecordId]) -> Result<()> {
        let body = BatchDeleteRequest { ids: ids.to_vec() };
        self.client
            .delete_with_body("/api/services/batch/delete", &body)
            .await
    }
}
