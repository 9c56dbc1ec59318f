//! 响应信封
//! 所有接口响应都包装为 `{ code, data, message? }`

use serde::{Deserialize, Serialize};

/// API 响应信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    /// 缺省时按默认值处理（`Value` 为 null）
    #[serde(default)]
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            data,
            message: None,
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// 业务失败的信封，data 为 null
    pub fn failure(code: i64, message: Option<&str>) -> Self {
        Self {
            code,
            data: serde_json::Value::Null,
            message: message.map(|m| m.to_string()),
        }
    }
}

/// 列表接口的 data 部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponseData<T> {
    /// 服务端匹配的总记录数
    pub total: u64,
    /// 当前页的记录，顺序由服务端决定
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

impl<T> Default for ListResponseData<T> {
    fn default() -> Self {
        Self {
            total: 0,
            list: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_missing_list() {
        let data: ListResponseData<u32> = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert_eq!(data, ListResponseData::default());
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"code":200,"message":"ok"}"#).unwrap();
        assert_eq!(envelope.code, 200);
        assert!(envelope.data.is_null());
        assert_eq!(envelope.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_failure_envelope_omits_absent_message() {
        let json = serde_json::to_value(ApiResponse::failure(500, None)).unwrap();
        assert_eq!(json, serde_json::json!({"code": 500, "data": null}));
    }
}
