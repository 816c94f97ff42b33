use chrono::DateTime;

use crate::models::lessons::entities::LessonStatus;

/// 金额展示，例如 `$25.00`；缺失时显示 `-`
pub fn format_amount(symbol: &str, amount: Option<f64>) -> String {
    match amount {
        Some(value) if value < 0.0 => format!("-{symbol}{:.2}", -value),
        Some(value) => format!("{symbol}{value:.2}"),
        None => "-".to_string(),
    }
}

/// 课程时间段，例如 `2026-03-01 10:00-11:00`
///
/// 保留服务端时区偏移；无法解析时原样返回。
pub fn format_lesson_window(start: &str, end: &str) -> String {
    match (DateTime::parse_from_rfc3339(start), DateTime::parse_from_rfc3339(end)) {
        (Ok(s), Ok(e)) if s.date_naive() == e.date_naive() => {
            format!("{} {}-{}", s.format("%Y-%m-%d"), s.format("%H:%M"), e.format("%H:%M"))
        }
        (Ok(s), Ok(e)) => format!("{} - {}", s.format("%Y-%m-%d %H:%M"), e.format("%Y-%m-%d %H:%M")),
        _ => format!("{start} - {end}"),
    }
}

/// 下一状态选项的展示文本，终态返回 None（不显示编辑入口）
pub fn format_status_actions(status: LessonStatus) -> Option<String> {
    let next = status.allowed_next();
    if next.is_empty() {
        return None;
    }
    Some(
        next.iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(" / "),
    )
}
