//! 测试公共模块
//! 提供脚本化的传输层和控制台装配辅助函数

#![allow(dead_code)]

use admin_console::{
    http::{HttpRequest, HttpResponse, HttpTransport, NoticeQueue, TransportError},
    models::user::UserInfo,
    storage::{MemoryStorage, SessionStorage, TOKEN_KEY, USER_INFO_KEY},
    Console,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// 按顺序回放预设响应并记录收到的请求
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// 预设一个成功信封
    pub fn reply_ok(&self, data: Value) {
        self.push(Ok(HttpResponse::json(
            200,
            &json!({ "code": 200, "data": data, "message": "success" }),
        )));
    }

    /// 预设一个业务失败信封
    pub fn reply_code(&self, code: i64, message: Option<&str>) {
        let body = match message {
            Some(message) => json!({ "code": code, "data": null, "message": message }),
            None => json!({ "code": code, "data": null }),
        };
        self.push(Ok(HttpResponse::json(200, &body)));
    }

    pub fn reply_status(&self, status: u16) {
        self.push(Ok(HttpResponse::new(status, "")));
    }

    pub fn fail_with(&self, err: TransportError) {
        self.push(Err(err));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request sent")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::NoResponse("no scripted response".into())))
    }
}

/// 测试用控制台及其依赖
pub struct TestConsole {
    pub console: Console,
    pub transport: Arc<MockTransport>,
    pub storage: Arc<MemoryStorage>,
    pub notices: Arc<NoticeQueue>,
}

pub fn create_test_console() -> TestConsole {
    let transport = Arc::new(MockTransport::new());
    let storage = Arc::new(MemoryStorage::new());
    let notices = Arc::new(NoticeQueue::new());

    let console = Console::assemble(transport.clone(), storage.clone(), notices.clone(), 200);

    TestConsole {
        console,
        transport,
        storage,
        notices,
    }
}

/// 创建已登录状态的控制台
pub fn create_logged_in_console(token: &str) -> TestConsole {
    let ctx = create_test_console();
    ctx.console
        .session
        .set_session(token, &test_user())
        .expect("Failed to seed session");
    ctx
}

pub fn test_user() -> UserInfo {
    serde_json::from_value(json!({
        "id": 1,
        "username": "admin",
        "email": "admin@example.com"
    }))
    .unwrap()
}

/// 会话两个键是否都已清除
pub fn session_cleared(storage: &MemoryStorage) -> bool {
    storage.get_item(TOKEN_KEY).is_none() && storage.get_item(USER_INFO_KEY).is_none()
}

pub fn json_body(request: &HttpRequest) -> Value {
    match &request.body {
        admin_console::http::RequestBody::Json(value) => value.clone(),
        other => panic!("expected JSON body, got {:?}", other),
    }
}
