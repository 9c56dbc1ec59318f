//! HTTP 客户端适配层
//!
//! `transport` 只负责收发原始 HTTP 报文；`client::ApiClient` 在其外层
//! 串起鉴权头、信封解包和错误提示（各阶段见 `crate::middleware`）。

pub mod client;
pub mod notify;
pub mod transport;

pub use client::ApiClient;
pub use notify::{Notice, NoticeLevel, NoticeQueue, Notifier, TracingNotifier};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, ReqwestTransport,
    TransportError,
};
