//! 费用类型管理 API

use std::sync::Arc;

use super::item_path;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::expense_type::{ExpenseType, ExpenseTypeInput, ExpenseTypeQuery};
use crate::models::RecordId;

#[derive(Clone)]
pub struct ExpenseTypeApi {
    client: Arc<ApiClient>,
}

impl ExpenseTypeApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 列表接口直接返回数组，没有 total
    pub async fn list(&self, query: &ExpenseTypeQuery) -> Result<Vec<ExpenseType>> {
        self.client.get("/api/expense-types", query).await
    }

    pub async fn create(&self, input: &ExpenseTypeInput) -> Result<ExpenseType> {
        self.client.post("/api/expense-types", input).await
    }

    pub async fn update(&self, id: &RecordId, input: &ExpenseTypeInput) -> Result<ExpenseType> {
        self.client
            .patch(&item_path("/api/expense-types", id), input)
            .await
    }

    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        self.client
            .delete(&item_path("/api/expense-types", id))
            .await
    }
}
