//! 页面路由与路由守卫
//! 声明控制台页面，导航前按是否持有令牌决定放行或重定向

use std::sync::{Arc, Mutex};

use crate::error::{ConsoleError, Result};
use crate::session::SessionContext;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// 单次导航允许的最大重定向次数
const MAX_REDIRECTS: usize = 8;

/// 页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Layout,
    ServiceInfo,
    ProductList,
    ExpenseList,
    Knowledge,
    RecordList,
    DataOverview,
    About,
}

/// 路由记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub title: Option<&'static str>,
    pub page: Page,
    /// 访问该路径时转到的子页面
    pub redirect: Option<&'static str>,
}

const fn page(
    path: &'static str,
    name: &'static str,
    title: &'static str,
    page: Page,
) -> RouteRecord {
    RouteRecord {
        path,
        name: Some(name),
        title: Some(title),
        page,
        redirect: None,
    }
}

pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: LOGIN_PATH,
        name: Some("Login"),
        title: None,
        page: Page::Login,
        redirect: None,
    },
    RouteRecord {
        path: HOME_PATH,
        name: None,
        title: None,
        page: Page::Layout,
        redirect: Some("/service/info"),
    },
    page("/service/info", "ServiceInfo", "服务信息", Page::ServiceInfo),
    page("/product/list", "ProductList", "产品列表", Page::ProductList),
    page("/expense/list", "ExpenseList", "费用列表", Page::ExpenseList),
    page("/knowledge", "Knowledge", "知识库", Page::Knowledge),
    page("/record/list", "RecordList", "记账列表", Page::RecordList),
    page("/data/overview", "DataOverview", "数据总览", Page::DataOverview),
    page("/about", "About", "关于我们", Page::About),
];

/// 守卫结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(&'static str),
}

/// 路由守卫
///
/// 已登录访问登录页转到首页；未登录访问其它页面转到登录页；否则放行。
pub fn guard(target: &str, has_token: bool) -> GuardDecision {
    let is_login = target == LOGIN_PATH;
    if is_login && has_token {
        return GuardDecision::Redirect(HOME_PATH);
    }
    if !has_token && !is_login {
        return GuardDecision::Redirect(LOGIN_PATH);
    }
    GuardDecision::Proceed
}

/// 去掉查询串、片段和末尾的斜杠
pub fn normalize_path(path: &str) -> String {
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

pub fn resolve(path: &str) -> Option<&'static RouteRecord> {
    ROUTES.iter().find(|r| r.path == path)
}

/// 导航出口，401 时适配器通过它跳转登录页
pub trait Navigator: Send + Sync {
    /// 导航到目标路径，返回最终停留的路径
    fn push(&self, path: &str) -> Result<String>;
    fn current(&self) -> Option<String>;
}

/// 控制台路由器
pub struct Router {
    session: Arc<SessionContext>,
    history: Mutex<Vec<String>>,
}

impl Router {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self {
            session,
            history: Mutex::new(Vec::new()),
        }
    }

    /// 导航：反复执行守卫和路由重定向，直到停在某个页面
    pub fn navigate(&self, target: &str) -> Result<&'static RouteRecord> {
        let mut path = normalize_path(target);

        for _ in 0..MAX_REDIRECTS {
            if let GuardDecision::Redirect(to) = guard(&path, self.session.has_token()) {
                tracing::debug!(from = %path, to = %to, "Navigation redirected by guard");
                path = to.to_string();
                continue;
            }

            let route = resolve(&path).ok_or_else(|| ConsoleError::RouteNotFound(path.clone()))?;
            if let Some(redirect) = route.redirect {
                path = redirect.to_string();
                continue;
            }

            self.history
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(route.path.to_string());
            tracing::debug!(path = %route.path, "Navigated");
            return Ok(route);
        }

        Err(ConsoleError::RouteNotFound(format!(
            "{}: too many redirects",
            target
        )))
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Navigator for Router {
    fn push(&self, path: &str) -> Result<String> {
        self.navigate(path).map(|route| route.path.to_string())
    }

    fn current(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}
