//! 文件上传 API

use std::sync::Arc;

use crate::error::Result;
use crate::http::ApiClient;
use crate::models::upload::{UploadFile, UploadResponse};

#[derive(Clone)]
pub struct UploadApi {
    client: Arc<ApiClient>,
}

impl UploadApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 上传单个文件（字段名 file）
    pub async fn upload_file(&self, file: UploadFile) -> Result<UploadResponse> {
        self.client.upload("/api/upload", "file", vec![file]).await
    }

    /// 上传多个文件（重复字段 files）
    pub async fn upload_files(&self, files: Vec<UploadFile>) -> Result<Vec<UploadResponse>> {
        self.client
            .upload("/api/upload/multiple", "files", files)
            .await
    }
}
