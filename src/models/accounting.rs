//! 记账记录模型

use super::RecordId;
use serde::{Deserialize, Serialize};

/// 收支类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountingType {
    Income,
    Expense,
}

/// 记账记录（服务端返回，金额为字符串）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingRecord {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub record_type: AccountingType,
    pub amount: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub transaction_date: String,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// 创建/更新记账记录的请求体
///
/// 创建和局部更新共用，金额以数字提交。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountingInput {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<AccountingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// 记账列表/统计查询条件
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountingQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<AccountingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_server() {
        let record: AccountingRecord = serde_json::from_str(
            r#"{
                "id": 12,
                "type": "expense",
                "amount": "35.50",
                "category": "餐饮",
                "transaction_date": "2025-03-01",
                "payment_method": "wechat"
            }"#,
        )
        .unwrap();

        assert_eq!(record.record_type, AccountingType::Expense);
        assert_eq!(record.amount, "35.50");
        assert!(record.description.is_none());
    }

    #[test]
    fn test_input_amount_is_number() {
        let input = AccountingInput {
            record_type: Some(AccountingType::Income),
            amount: Some(1200.0),
            category: Some("工资".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({"type": "income", "amount": 1200.0, "category": "工资"})
        );
    }
}
