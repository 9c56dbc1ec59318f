//! 用户信息模型

use super::RecordId;
use serde::{Deserialize, Serialize};

/// 当前登录用户快照
///
/// 登录时整体替换，不做局部修改。默认值是空快照（id 和 username 为空）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserInfo {
    /// 是否为空快照
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.username.is_empty()
    }
}
