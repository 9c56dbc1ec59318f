//! 请求管道的各个阶段
//! 鉴权头注入、请求 ID、查询参数展开、信封解包与失败归类
//!
//! 这些阶段都是独立的纯函数，`ApiClient` 负责把它们串起来。

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ConsoleError;
use crate::http::transport::{HttpRequest, HttpResponse, RequestBody, TransportError};
use crate::models::envelope::ApiResponse;

pub const AUTHORIZATION: &str = "Authorization";
pub const REQUEST_ID: &str = "x-request-id";

/// 有令牌时附加 `Authorization: Bearer <token>`
pub fn attach_bearer(request: &mut HttpRequest, token: Option<&str>) {
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        request.set_header(AUTHORIZATION, format!("Bearer {}", token));
    }
}

/// 生成请求 ID 并写入请求头
pub fn attach_request_id(request: &mut HttpRequest) -> String {
    let request_id = Uuid::new_v4().to_string();
    request.set_header(REQUEST_ID, request_id.clone());
    request_id
}

/// 把查询参数对象展开为键值对
///
/// null 被跳过，数组展开为重复的键，嵌套对象按 JSON 文本发送。
pub fn query_pairs<Q>(params: &Q) -> Result<Vec<(String, String)>, ConsoleError>
where
    Q: Serialize + ?Sized,
{
    let value =
        serde_json::to_value(params).map_err(|e| ConsoleError::RequestConfig(e.to_string()))?;

    let mut pairs = Vec::new();
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, value) in map {
                push_pair(&mut pairs, &key, value);
            }
        }
        other => {
            return Err(ConsoleError::RequestConfig(format!(
                "query params must be an object, got {}",
                other
            )))
        }
    }

    Ok(pairs)
}

fn push_pair(pairs: &mut Vec<(String, String)>, key: &str, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key.to_string(), s)),
        Value::Array(items) => {
            for item in items {
                push_pair(pairs, key, item);
            }
        }
        other => pairs.push((key.to_string(), other.to_string())),
    }
}

/// 序列化 JSON 请求体，`()` 和 null 视为无请求体
pub fn json_body<B>(body: &B) -> Result<RequestBody, ConsoleError>
where
    B: Serialize + ?Sized,
{
    match serde_json::to_value(body).map_err(|e| ConsoleError::RequestConfig(e.to_string()))? {
        Value::Null => Ok(RequestBody::Empty),
        value => Ok(RequestBody::Json(value)),
    }
}

/// 解包响应信封
///
/// 非 2xx 按状态码归类；code 不等于 `success_code` 时返回业务错误；
/// 否则只返回 `data`。
pub fn unwrap_envelope<T>(response: &HttpResponse, success_code: i64) -> Result<T, ConsoleError>
where
    T: DeserializeOwned,
{
    if !response.is_success() {
        return Err(ConsoleError::from_status(response.status));
    }

    let envelope: ApiResponse<Value> = serde_json::from_slice(&response.body).map_err(|e| {
        tracing::error!(status = response.status, error = %e, "Malformed response envelope");
        ConsoleError::business(i64::from(response.status), None)
    })?;

    if envelope.code != success_code {
        return Err(ConsoleError::business(envelope.code, envelope.message));
    }

    serde_json::from_value(envelope.data).map_err(|e| {
        tracing::error!(code = envelope.code, error = %e, "Unexpected response data shape");
        ConsoleError::business(envelope.code, None)
    })
}

/// 传输层错误归类
pub fn classify_transport_error(err: TransportError) -> ConsoleError {
    err.into()
}

/// 请求结果的指标标签
pub fn outcome_label(error: Option<&ConsoleError>) -> &'static str {
    match error {
        None => "ok",
        Some(ConsoleError::Business { .. }) => "business_error",
        Some(ConsoleError::Unauthorized) => "401",
        Some(ConsoleError::Forbidden) => "403",
        Some(ConsoleError::NotFound) => "404",
        Some(ConsoleError::Server) => "500",
        Some(ConsoleError::HttpStatus(_)) => "http_error",
        Some(ConsoleError::Network(_)) => "network_error",
        Some(_) => "request_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::envelope::ApiResponse;
use crate::http::transport::Method;
    use serde_json::json;

    fn ok(value: Value) -> HttpResponse {
        HttpResponse::json(200, &value)
    }

    #[test]
    fn test_attach_bearer_only_with_token() {
        let mut req = HttpRequest::new(Method::Get, "/api/auth/user");
        attach_bearer(&mut req, None);
        assert!(req.header(AUTHORIZATION).is_none());

        attach_bearer(&mut req, Some(""));
        assert!(req.header(AUTHORIZATION).is_none());

        attach_bearer(&mut req, Some("abc"));
        assert_eq!(req.header(AUTHORIZATION), Some("Bearer abc"));
    }

    #[test]
    fn test_request_id_is_unique() {
        let mut a = HttpRequest::new(Method::Get, "/");
        let mut b = HttpRequest::new(Method::Get, "/");
        let id_a = attach_request_id(&mut a);
        let id_b = attach_request_id(&mut b);

        assert_ne!(id_a, id_b);
        assert_eq!(a.header(REQUEST_ID), Some(id_a.as_str()));
    }

    #[test]
    fn test_query_pairs_flattening() {
        let pairs = query_pairs(&json!({
            "keyword": "备案",
            "page": 2,
            "status": null,
            "tags": ["a", "b"],
            "enabled": true
        }))
        .unwrap();

        assert!(pairs.contains(&("keyword".to_string(), "备案".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("enabled".to_string(), "true".to_string())));
        assert_eq!(pairs.iter().filter(|(k, _)| k == "tags").count(), 2);
        assert!(!pairs.iter().any(|(k, _)| k == "status"));

        assert!(query_pairs(&()).unwrap().is_empty());
        assert!(query_pairs(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_json_body_unit_is_empty() {
        assert_eq!(json_body(&()).unwrap(), RequestBody::Empty);
        assert_eq!(
            json_body(&json!({"ids": [1]})).unwrap(),
            RequestBody::Json(json!({"ids": [1]}))
        );
    }

    #[test]
    fn test_unwrap_success_returns_data_only() {
        let data: Value = unwrap_envelope(
            &ok(json!({"code": 200, "data": {"total": 1, "list": [{"id": 1}]}, "message": "ok"})),
            200,
        )
        .unwrap();

        assert_eq!(data, json!({"total": 1, "list": [{"id": 1}]}));
    }

    #[test]
    fn test_unwrap_null_data_as_unit() {
        let _: () = unwrap_envelope(&ok(json!({"code": 200, "data": null})), 200).unwrap();
        let _: () = unwrap_envelope(&ok(json!({"code": 200})), 200).unwrap();
    }

    #[test]
    fn test_unwrap_business_failure() {
        let err = unwrap_envelope::<Value>(
            &ok(json!({"code": 400, "data": null, "message": "用户名或密码错误"})),
            200,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConsoleError::Business {
                code: 400,
                message: "用户名或密码错误".to_string()
            }
        );

        let err =
            unwrap_envelope::<Value>(&ok(json!({"code": 1001, "data": null})), 200).unwrap_err();
        assert_eq!(err.user_message(), "请求失败");
    }

    #[test]
    fn test_unwrap_custom_success_code() {
        let data: u32 = unwrap_envelope(&ok(json!({"code": 0, "data": 5})), 0).unwrap();
        assert_eq!(data, 5);
        assert!(unwrap_envelope::<u32>(&ok(json!({"code": 200, "data": 5})), 0).is_err());
    }

    #[test]
    fn test_unwrap_http_status() {
        let resp = HttpResponse::new(401, "");
        assert_eq!(
            unwrap_envelope::<Value>(&resp, 200).unwrap_err(),
            ConsoleError::Unauthorized
        );

        let resp = HttpResponse::json(404, &json!({"code": 404, "data": null}));
        assert_eq!(
            unwrap_envelope::<Value>(&resp, 200).unwrap_err(),
            ConsoleError::NotFound
        );

        let resp = HttpResponse::new(503, "Service Unavailable");
        assert_eq!(
            unwrap_envelope::<Value>(&resp, 200).unwrap_err(),
            ConsoleError::HttpStatus(503)
        );
    }

    #[test]
    fn test_unwrap_malformed_body() {
        let resp = HttpResponse::new(200, "<html>gateway</html>");
        let err = unwrap_envelope::<Value>(&resp, 200).unwrap_err();
        assert_eq!(err.user_message(), "请求失败");
    }

    #[test]
    fn test_unwrap_wrong_data_shape() {
        let err = unwrap_envelope::<Vec<u32>>(&ok(json!({"code": 200, "data": "x"})), 200)
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Business { code: 200, .. }));
    }
}
