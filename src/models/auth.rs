//! 认证相关模型

use super::user::UserInfo;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, Serializer};
use validator::{Validate, ValidationError};

pub const PASSWORD_LENGTH_MESSAGE: &str = "密码长度为6-64个字符";

/// 登录请求
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(serialize_with = "expose_password")]
    pub password: Secret<String>,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Secret::new(password.into()),
        }
    }
}

/// 注册请求
///
/// 密码长度在整体校验 `validate_register` 中检查。
#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "validate_register"))]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "用户名长度为3-32个字符"))]
    pub username: String,
    #[serde(serialize_with = "expose_password")]
    pub password: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "请输入正确的邮箱地址"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::validation::phone_valid"))]
    pub phone: Option<String>,
}

/// 登录接口的 data 部分
///
/// 后端有的版本返回 `access_token`，有的返回 `token`，两者都接受。
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponseData {
    #[serde(alias = "token")]
    pub access_token: String,
    pub user: UserInfo,
}

/// 刷新令牌接口的 data 部分
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenData {
    #[serde(alias = "access_token")]
    pub token: String,
}

fn expose_password<S>(password: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(password.expose_secret())
}

fn validate_password(password: &Secret<String>) -> Result<(), ValidationError> {
    let len = password.expose_secret().chars().count();
    if !(6..=64).contains(&len) {
        return Err(ValidationError::new("password_length")
            .with_message(PASSWORD_LENGTH_MESSAGE.into()));
    }
    Ok(())
}

fn validate_register(req: &RegisterRequest) -> Result<(), ValidationError> {
    validate_password(&req.password)
}
