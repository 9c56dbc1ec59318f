//! 控制台装配
//! 按配置创建存储、会话、路由、请求适配器和各资源 API

use std::sync::Arc;

use crate::api::{AccountingApi, AuthApi, ExpenseTypeApi, ServiceApi, UploadApi};
use crate::config::ConsoleConfig;
use crate::error::Result;
use crate::http::{ApiClient, HttpTransport, Notifier, ReqwestTransport};
use crate::models::user::UserInfo;
use crate::routes::{RouteRecord, Router, HOME_PATH, LOGIN_PATH};
use crate::session::SessionContext;
use crate::storage::{self, SessionStorage};

/// 控制台应用状态
///
/// 各组件都用 Arc 共享，克隆成本低。
#[derive(Clone)]
pub struct Console {
    pub session: Arc<SessionContext>,
    pub router: Arc<Router>,
    pub client: Arc<ApiClient>,
    pub auth: AuthApi,
    pub services: ServiceApi,
    pub accounting: AccountingApi,
    pub expense_types: ExpenseTypeApi,
    pub uploads: UploadApi,
}

impl Console {
    /// 按配置创建，使用 reqwest 传输
    pub fn from_config(config: &ConsoleConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let storage = storage::open_storage(&config.storage)?;
        let transport = Arc::new(ReqwestTransport::new(
            &config.api.base_url,
            config.api.timeout(),
        )?);

        tracing::debug!(
            base_url = %config.api.base_url,
            storage = %config.storage.backend,
            "Console configured"
        );

        Ok(Self::assemble(transport, storage, notifier, config.api.success_code))
    }

    /// 用给定的传输和存储装配
    pub fn assemble(
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
        success_code: i64,
    ) -> Self {
        let session = Arc::new(SessionContext::new(storage));
        let router = Arc::new(Router::new(session.clone()));
        let client = Arc::new(
            ApiClient::new(transport, session.clone(), notifier, router.clone())
                .with_success_code(success_code),
        );

        Self {
            auth: AuthApi::new(client.clone()),
            services: ServiceApi::new(client.clone()),
            accounting: AccountingApi::new(client.clone()),
            expense_types: ExpenseTypeApi::new(client.clone()),
            uploads: UploadApi::new(client.clone()),
            session,
            router,
            client,
        }
    }

    /// 启动：恢复用户快照后执行首次导航（同样经过守卫）
    pub fn start(&self, initial_path: &str) -> Result<&'static RouteRecord> {
        self.session.init_user_info();
        self.router.navigate(initial_path)
    }

    /// 登录成功后进入首页
    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo> {
        let user = self.session.login(&self.auth, username, password).await?;
        self.router.navigate(HOME_PATH)?;
        Ok(user)
    }

    /// 本地登出并回到登录页
    pub fn logout(&self) -> Result<()> {
        self.session.logout()?;
        self.router.navigate(LOGIN_PATH)?;
        Ok(())
    }
}
