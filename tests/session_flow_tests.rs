//! 会话与导航流程集成测试

mod common;

use admin_console::{
    http::Method,
    models::RecordId,
    routes::{Navigator, Page},
    storage::{SessionStorage, TOKEN_KEY, USER_INFO_KEY},
    ConsoleError,
};
use common::*;
use serde_json::json;

fn login_reply(token_field: &str, token: &str) -> serde_json::Value {
    let mut data = json!({
        "user": { "id": 1, "username": "admin", "email": "admin@example.com" }
    });
    data[token_field] = json!(token);
    data
}

#[tokio::test]
async fn test_login_stores_token_and_user() {
    let ctx = create_test_console();
    ctx.transport.reply_ok(login_reply("access_token", "new-token"));

    let user = ctx.console.login("admin", "secret").await.unwrap();

    assert_eq!(user.username, "admin");
    assert_eq!(ctx.storage.get_item(TOKEN_KEY).as_deref(), Some("new-token"));
    let stored: serde_json::Value =
        serde_json::from_str(&ctx.storage.get_item(USER_INFO_KEY).unwrap()).unwrap();
    assert_eq!(stored["username"], "admin");
    assert_eq!(ctx.console.session.current_user(), user);

    let request = ctx.transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/api/auth/login");
    assert_eq!(
        json_body(&request),
        json!({ "username": "admin", "password": "secret" })
    );
    // 登录后进入首页，根路径再转到服务信息
    assert_eq!(ctx.console.router.current().as_deref(), Some("/service/info"));
}

#[tokio::test]
async fn test_login_accepts_token_field() {
    let ctx = create_test_console();
    ctx.transport.reply_ok(login_reply("token", "legacy-token"));

    ctx.console.login("admin", "secret").await.unwrap();

    assert_eq!(ctx.console.session.token().as_deref(), Some("legacy-token"));
}

#[tokio::test]
async fn test_login_failure_leaves_session_untouched() {
    let ctx = create_test_console();
    ctx.transport.reply_code(400, Some("用户名或密码错误"));

    let err = ctx.console.login("admin", "wrong").await.unwrap_err();

    assert_eq!(err.user_message(), "用户名或密码错误");
    assert!(session_cleared(&ctx.storage));
    assert!(ctx.console.router.history().is_empty());
    // 只请求一次，不重试
    assert_eq!(ctx.transport.requests().len(), 1);
}

#[tokio::test]
async fn test_refresh_replaces_token_only() {
    let ctx = create_logged_in_console("old");
    ctx.transport.reply_ok(json!({ "token": "fresh" }));

    ctx.console.session.refresh(&ctx.console.auth).await.unwrap();

    assert_eq!(ctx.console.session.token().as_deref(), Some("fresh"));
    assert_eq!(ctx.console.session.current_user(), test_user());
    assert_eq!(
        ctx.transport.last_request().header("Authorization"),
        Some("Bearer old")
    );
}

#[tokio::test]
async fn test_logout_is_local_only() {
    let ctx = create_logged_in_console("tok");

    ctx.console.logout().unwrap();

    assert!(session_cleared(&ctx.storage));
    assert!(ctx.transport.requests().is_empty());
    assert_eq!(ctx.console.router.current().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_logout_remote_clears_even_when_server_fails() {
    let ctx = create_logged_in_console("tok");
    ctx.transport.reply_status(500);

    ctx.console
        .session
        .logout_remote(&ctx.console.auth)
        .await
        .unwrap();

    let request = ctx.transport.last_request();
    assert_eq!(request.url, "/api/auth/logout");
    assert_eq!(request.header("Authorization"), Some("Bearer tok"));
    assert!(session_cleared(&ctx.storage));
}

#[test]
fn test_start_restores_user_and_guards_first_navigation() {
    let ctx = create_test_console();
    ctx.storage.set_item(TOKEN_KEY, "tok").unwrap();
    ctx.storage
        .set_item(USER_INFO_KEY, r#"{"id":9,"username":"ops"}"#)
        .unwrap();

    let route = ctx.console.start("/login").unwrap();

    assert_eq!(route.page, Page::ServiceInfo);
    assert_eq!(ctx.console.session.current_user().id, RecordId::Number(9));
}

#[test]
fn test_start_without_token_lands_on_login() {
    let ctx = create_test_console();

    let route = ctx.console.start("/data/overview").unwrap();

    assert_eq!(route.page, Page::Login);
    assert!(ctx.console.session.current_user().is_empty());
}

#[test]
fn test_unknown_route_when_logged_in() {
    let ctx = create_logged_in_console("tok");

    let err = ctx.console.router.navigate("/nowhere").unwrap_err();

    assert!(matches!(err, ConsoleError::RouteNotFound(_)));
    assert_eq!(err.user_message(), "页面不存在");
}

#[tokio::test]
async fn test_register_validates_before_sending() {
    let ctx = create_test_console();
    let req = admin_console::models::auth::RegisterRequest {
        username: "newuser".into(),
        password: secrecy::Secret::new("secret123".into()),
        email: None,
        phone: Some("12345678901".into()),
    };

    let err = ctx.console.auth.register(&req).await.unwrap_err();

    assert_eq!(err, ConsoleError::Validation("请输入正确的手机号码".into()));
    assert!(ctx.transport.requests().is_empty());
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let ctx = create_test_console();
    let req = admin_console::models::auth::RegisterRequest {
        username: "newuser".into(),
        password: secrecy::Secret::new("123".into()),
        email: Some("new@example.com".into()),
        phone: Some("13812345678".into()),
    };

    let err = ctx.console.auth.register(&req).await.unwrap_err();

    assert_eq!(
        err,
        ConsoleError::Validation(admin_console::models::auth::PASSWORD_LENGTH_MESSAGE.into())
    );
    assert!(ctx.transport.requests().is_empty());
}

#[tokio::test]
async fn test_register_sends_valid_request() {
    let ctx = create_test_console();
    ctx.transport
        .reply_ok(json!({ "id": 2, "username": "newuser", "phone": "13812345678" }));
    let req = admin_console::models::auth::RegisterRequest {
        username: "newuser".into(),
        password: secrecy::Secret::new("secret123".into()),
        email: None,
        phone: Some("13812345678".into()),
    };

    let user = ctx.console.auth.register(&req).await.unwrap();

    assert_eq!(user.id, RecordId::Number(2));
    let request = ctx.transport.last_request();
    assert_eq!(request.url, "/api/auth/register");
    assert_eq!(
        json_body(&request),
        json!({ "username": "newuser", "password": "secret123", "phone": "13812345678" })
    );
}
