//! 用户认证 API

use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::http::ApiClient;
use crate::models::auth::{LoginRequest, LoginResponseData, RefreshTokenData, RegisterRequest};
use crate::models::user::UserInfo;

#[derive(Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 用户登录
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponseData> {
        self.client.post("/api/auth/login", req).await
    }

    /// 用户注册，提交前先做本地校验
    pub async fn register(&self, req: &RegisterRequest) -> Result<UserInfo> {
        req.validate()?;
        self.client.post("/api/auth/register", req).await
    }

    /// 获取当前用户信息
    pub async fn get_user_info(&self) -> Result<UserInfo> {
        self.client.get("/api/auth/user", &()).await
    }

    /// 刷新令牌
    pub async fn refresh_token(&self) -> Result<RefreshTokenData> {
        self.client.post("/api/auth/refresh", &()).await
    }

    /// 服务端登出
    pub async fn logout(&self) -> Result<()> {
        self.client.post("/api/auth/logout", &()).await
    }
}
