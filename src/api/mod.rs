//! 资源 API 模块
//! 每个资源一组函数，每个函数对应一次适配器调用，不含业务逻辑

pub mod accounting;
pub mod auth;
pub mod expense_type;
pub mod service;
pub mod upload;

pub use accounting::AccountingApi;
pub use auth::AuthApi;
pub use expense_type::ExpenseTypeApi;
pub use service::ServiceApi;
pub use upload::UploadApi;

use crate::models::RecordId;

/// 拼接单条资源的路径，id 作为一个路径段并做百分号编码
pub(crate) fn item_path(collection: &str, id: &RecordId) -> String {
    let raw = format!("{}/{}", collection, id);
    let Ok(mut url) = url::Url::parse(&format!("http://localhost{}", collection)) else {
        return raw;
    };

    match url.path_segments_mut() {
        Ok(mut segments) => {
            segments.push(&id.to_string());
        }
        Err(()) => return raw,
    }
    url.path().to_string()
}
