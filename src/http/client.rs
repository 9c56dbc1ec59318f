//! API 请求适配器
//! 在通用传输之上附加令牌、解包信封，并统一处理失败提示

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::error::{ConsoleError, Result};
use crate::http::notify::{NoticeLevel, Notifier};
use crate::http::transport::{HttpRequest, HttpTransport, Method, RequestBody};
use crate::middleware;
use crate::models::upload::UploadFile;
use crate::routes::{Navigator, LOGIN_PATH};
use crate::session::SessionContext;

pub const DEFAULT_SUCCESS_CODE: i64 = 200;

/// API 客户端
///
/// 所有失败都会先在这里提示用户（401 还会清理会话并跳转登录页），
/// 然后以 `Err` 返回给调用方，调用方可以再做自己的处理。
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    success_code: i64,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            notifier,
            navigator,
            success_code: DEFAULT_SUCCESS_CODE,
        }
    }

    pub fn with_success_code(mut self, success_code: i64) -> Self {
        self.success_code = success_code;
        self
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub async fn get<T, Q>(&self, url: &str, params: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = match middleware::query_pairs(params) {
            Ok(query) => query,
            Err(e) => return Err(self.fail(Method::Get, url, e)),
        };
        self.execute(HttpRequest::new(Method::Get, url).with_query(query))
            .await
    }

    pub async fn post<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::Post, url, body).await
    }

    pub async fn put<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::Put, url, body).await
    }

    pub async fn patch<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::Patch, url, body).await
    }

    pub async fn delete<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.execute(HttpRequest::new(Method::Delete, url)).await
    }

    /// 带请求体的 DELETE（批量删除）
    pub async fn delete_with_body<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::Delete, url, body).await
    }

    /// multipart 上传，所有文件使用同一个字段名
    pub async fn upload<T>(&self, url: &str, field: &str, files: Vec<UploadFile>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if files.is_empty() {
            let err = ConsoleError::RequestConfig("no files to upload".to_string());
            return Err(self.fail(Method::Post, url, err));
        }

        let body = RequestBody::Multipart {
            field: field.to_string(),
            files,
        };
        self.execute(HttpRequest::new(Method::Post, url).with_body(body))
            .await
    }

    async fn send_json<T, B>(&self, method: Method, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match middleware::json_body(body) {
            Ok(body) => body,
            Err(e) => return Err(self.fail(method, url, e)),
        };
        self.execute(HttpRequest::new(method, url).with_body(body))
            .await
    }

    async fn execute<T>(&self, mut request: HttpRequest) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let method = request.method;
        let url = request.url.clone();

        let request_id = middleware::attach_request_id(&mut request);
        middleware::attach_bearer(&mut request, self.session.token().as_deref());

        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %method,
            url = %url,
        );

        async move {
            let start = Instant::now();

            let result = match self.transport.send(request).await {
                Ok(response) => {
                    tracing::debug!(
                        status = response.status,
                        elapsed_ms = start.elapsed().as_millis(),
                        "Response received"
                    );
                    middleware::unwrap_envelope::<T>(&response, self.success_code)
                }
                Err(e) => Err(middleware::classify_transport_error(e)),
            };

            metrics::histogram!("console_request_duration_seconds")
                .record(start.elapsed().as_secs_f64());

            match result {
                Ok(data) => {
                    metrics::counter!(
                        "console_requests_total",
                        "method" => method.as_str(),
                        "outcome" => middleware::outcome_label(None)
                    )
                    .increment(1);
                    Ok(data)
                }
                Err(err) => Err(self.fail(method, &url, err)),
            }
        }
        .instrument(span)
        .await
    }

    /// 失败统一出口：记录、401 清理会话并跳转、提示用户
    fn fail(&self, method: Method, url: &str, err: ConsoleError) -> ConsoleError {
        metrics::counter!(
            "console_requests_total",
            "method" => method.as_str(),
            "outcome" => middleware::outcome_label(Some(&err))
        )
        .increment(1);

        tracing::warn!(method = %method, url = %url, error = %err, "Request failed");

        if err.is_unauthorized() {
            if let Err(e) = self.session.clear() {
                tracing::error!(error = %e, "Failed to clear session after 401");
            }
            if let Err(e) = self.navigator.push(LOGIN_PATH) {
                tracing::error!(error = %e, "Failed to redirect to login");
            }
        }

        self.notifier.notify(NoticeLevel::Error, &err.user_message());
        err
    }
}
