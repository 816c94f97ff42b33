use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{PortalError, Result};
use crate::models::homeworks::requests::AddQuestionRequest;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid ISO date regex"));

/// 筛选日期边界：空字符串表示不限，否则必须是 `YYYY-MM-DD`
pub fn validate_date_bound(bound: &str) -> Result<()> {
    if bound.is_empty() {
        return Ok(());
    }
    if !ISO_DATE_RE.is_match(bound) {
        return Err(PortalError::date_parse(format!(
            "Date '{bound}' must use the YYYY-MM-DD format"
        )));
    }
    NaiveDate::parse_from_str(bound, "%Y-%m-%d")?;
    Ok(())
}

/// 解析截止日期
pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if !ISO_DATE_RE.is_match(input) {
        return Err(PortalError::date_parse(format!(
            "Due date '{input}' must use the YYYY-MM-DD format"
        )));
    }
    Ok(NaiveDate::parse_from_str(input, "%Y-%m-%d")?)
}

/// 题目校验
///
/// 正确选项数量不限（可以为 0 个或多个），只校验题干、分值和选项文本。
pub fn validate_question(req: &AddQuestionRequest) -> Result<()> {
    if req.text.trim().is_empty() {
        return Err(PortalError::validation("Question text is required"));
    }
    if req.points <= 0 {
        return Err(PortalError::validation("Question points must be positive"));
    }
    if req.options.is_empty() {
        return Err(PortalError::validation("A question needs at least one option"));
    }
    if req.options.iter().any(|o| o.text.trim().is_empty()) {
        return Err(PortalError::validation("Option text cannot be empty"));
    }
    Ok(())
}
