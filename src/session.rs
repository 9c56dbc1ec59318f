//! 会话上下文
//! 持有当前用户快照，令牌和用户快照持久化在会话存储中

use std::sync::{Arc, RwLock};

use crate::api::auth::AuthApi;
use crate::error::Result;
use crate::models::auth::LoginRequest;
use crate::models::user::UserInfo;
use crate::storage::{MemoryStorage, SessionStorage, TOKEN_KEY, USER_INFO_KEY};

/// 会话上下文
///
/// 显式创建并向下传递，不做全局单例。令牌只存在存储里，内存里只放用户快照。
/// 两个键依次写入，没有原子性保证。
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
    user: RwLock<UserInfo>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            user: RwLock::new(UserInfo::default()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    /// 当前令牌，空字符串视为没有令牌
    pub fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// 是否已登录，只看令牌是否存在，不校验有效期
    pub fn is_authenticated(&self) -> bool {
        self.has_token()
    }

    pub fn current_user(&self) -> UserInfo {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_user(&self, user: UserInfo) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = user;
    }

    /// 保存登录结果：先写令牌，再写用户快照，最后更新内存
    pub fn set_session(&self, token: &str, user: &UserInfo) -> Result<()> {
        self.storage.set_item(TOKEN_KEY, token)?;
        self.storage.set_item(USER_INFO_KEY, &serde_json::to_string(user)?)?;
        self.set_user(user.clone());
        Ok(())
    }

    /// 登录并保存会话，失败原样返回，不重试
    pub async fn login(&self, auth: &AuthApi, username: &str, password: &str) -> Result<UserInfo> {
        let data = auth.login(&LoginRequest::new(username, password)).await?;
        self.set_session(&data.access_token, &data.user)?;

        tracing::info!(username = %data.user.username, "User logged in");
        Ok(data.user)
    }

    /// 从存储恢复用户快照
    ///
    /// 解析失败只记录日志，用户保持空快照。
    pub fn init_user_info(&self) {
        let Some(raw) = self.storage.get_item(USER_INFO_KEY) else {
            return;
        };

        match serde_json::from_str::<UserInfo>(&raw) {
            Ok(user) => {
                tracing::debug!(username = %user.username, "User info restored");
                self.set_user(user);
            }
            Err(e) => {
                tracing::warn!(error = %e, "解析用户信息失败");
            }
        }
    }

    /// 刷新令牌，只替换存储中的令牌
    pub async fn refresh(&self, auth: &AuthApi) -> Result<()> {
        let data = auth.refresh_token().await?;
        self.storage.set_item(TOKEN_KEY, &data.token)?;
        tracing::debug!("Token refreshed");
        Ok(())
    }

    /// 清理会话：重置内存快照并删除两个键
    ///
    /// 第一个键删除失败时仍会尝试删除第二个，返回第一个错误。
    pub fn clear(&self) -> Result<()> {
        self.set_user(UserInfo::default());
        let token = self.storage.remove_item(TOKEN_KEY);
        let user = self.storage.remove_item(USER_INFO_KEY);
        token.and(user)
    }

    /// 本地登出，不通知服务端
    pub fn logout(&self) -> Result<()> {
        self.clear()?;
        tracing::info!("User logged out");
        Ok(())
    }

    /// 先调用服务端登出接口再清理本地会话
    ///
    /// 服务端失败不影响本地清理。
    pub async fn logout_remote(&self, auth: &AuthApi) -> Result<()> {
        if let Err(e) = auth.logout().await {
            tracing::warn!(error = %e, "Server-side logout failed, clearing local session anyway");
        }
        self.logout()
    }
}
