//! 表单字段校验

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub const PHONE_REQUIRED: &str = "手机号不能为空";
pub const PHONE_INVALID: &str = "请输入正确的手机号码";

/// 大陆手机号：1 开头，第二位 3/4/5/7/8，共 11 位
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[34578]\d{9}$").expect("phone pattern is valid"));

/// 手机号校验，先检查必填再检查格式
pub fn phone_valid(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(PHONE_REQUIRED)));
    }
    if !PHONE_PATTERN.is_match(value) {
        return Err(ValidationError::new("phone").with_message(Cow::Borrowed(PHONE_INVALID)));
    }
    Ok(())
}

/// 以回调形式执行校验：通过时回调收到 None，失败时收到错误
pub fn validate_field<V, C>(value: &str, validator: V, callback: C)
where
    V: FnOnce(&str) -> Result<(), ValidationError>,
    C: FnOnce(Option<ValidationError>),
{
    callback(validator(value).err());
}

/// 取第一条校验错误的提示文案（按字段名排序）
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| (field, e)))
        .map(|(field, e)| match &e.message {
            Some(message) => message.to_string(),
            None => format!("{} 校验失败", field),
        })
        .next()
        .unwrap_or_else(|| "参数校验失败".to_string())
}
