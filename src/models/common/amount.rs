//! 金额字段的反序列化
//!
//! 后端的小数字段可能以 JSON 数字或字符串（如 `"25.00"`）返回，
//! 客户端只用于展示，不做任何金额运算。

use serde::Deserializer;
use serde::de::{Error, Unexpected, Visitor};
use std::fmt;

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a string containing a decimal, or null")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value as f64))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value as f64))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
    }
}

/// 可空金额：null / 缺失 / 空字符串均视为 None
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(AmountVisitor)
}

/// 必填金额：与可空金额接受相同的形式，但不允许为空
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer
        .deserialize_any(AmountVisitor)?
        .ok_or_else(|| D::Error::invalid_value(Unexpected::Unit, &"a number or a decimal string"))
}
