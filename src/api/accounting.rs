//! 记账管理 API

use std::sync::Arc;

use super::item_path;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::accounting::{AccountingInput, AccountingQuery, AccountingRecord};
use crate::models::envelope::ListResponseData;
use crate::models::RecordId;

#[derive(Clone)]
pub struct AccountingApi {
    client: Arc<ApiClient>,
}

impl AccountingApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 获取记账记录列表
    pub async fn list(
        &self,
        query: &AccountingQuery,
    ) -> Result<ListResponseData<AccountingRecord>> {
        self.client.get("/api/accounting", query).await
    }

    /// 创建记账记录
    pub async fn create(&self, input: &AccountingInput) -> Result<AccountingRecord> {
        self.client.post("/api/accounting", input).await
    }

    /// 更新记账记录
    pub async fn update(&self, id: &RecordId, input: &AccountingInput) -> Result<AccountingRecord> {
        self.client
            .patch(&item_path("/api/accounting", id), input)
            .await
    }

    /// 删除记账记录
    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        self.client.delete(&item_path("/api/accounting", id)).await
    }

    /// 获取记账统计信息，结构由服务端决定
    pub async fn stats(&self, query: &AccountingQuery) -> Result<serde_json::Value> {
        self.client.get("/api/accounting/stats", query).await
    }
}
