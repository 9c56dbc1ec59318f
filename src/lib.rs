//! 管理控制台客户端库
//! 登录会话、路由守卫、请求适配器和各资源 API

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod storage;
pub mod telemetry;
pub mod validation;

pub use console::Console;
pub use error::{ConsoleError, Result};
