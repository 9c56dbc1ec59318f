//! 用户提示
//! 请求失败时的轻提示出口，由宿主决定如何展示

use chrono::{DateTime, Utc};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// 一条提示
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// 提示出口
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// 只写日志的提示出口
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error => tracing::error!(notice = %message, "Notice"),
            NoticeLevel::Warning => tracing::warn!(notice = %message, "Notice"),
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!(notice = %message, "Notice"),
        }
    }
}

/// 提示队列
///
/// 宿主界面定期取走并渲染为轻提示。
#[derive(Debug, Default)]
pub struct NoticeQueue {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取走所有待展示的提示
    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self.notices.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *notices)
    }

    pub fn snapshot(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.snapshot().into_iter().map(|n| n.message).collect()
    }

    pub fn len(&self) -> usize {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NoticeQueue {
    fn notify(&self, level: NoticeLevel, message: &str) {
        tracing::debug!(notice = %message, ?level, "Notice queued");
        let mut notices = self.notices.lock().unwrap_or_else(|e| e.into_inner());
        notices.push(Notice {
            level,
            message: message.to_string(),
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_notifier_logs_by_level() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingNotifier.notify(NoticeLevel::Error, "服务器错误");
            TracingNotifier.notify(NoticeLevel::Warning, "即将过期");
            TracingNotifier.notify(NoticeLevel::Success, "保存成功");
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("ERROR") && lines[0].contains("服务器错误"));
        assert!(lines[1].contains("WARN") && lines[1].contains("即将过期"));
        assert!(lines[2].contains("INFO") && lines[2].contains("保存成功"));
    }

    #[test]
    fn test_queue_drain_empties() {
        let queue = NoticeQueue::new();
        queue.notify(NoticeLevel::Error, "服务器错误");
        queue.notify(NoticeLevel::Success, "保存成功");

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.messages(), vec!["服务器错误", "保存成功"]);

        let drained = queue.drain();
        assert_eq!(drained[0].level, NoticeLevel::Error);
        assert!(queue.is_empty());
    }
}
