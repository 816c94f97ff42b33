use crate::models::lessons::entities::LessonHistoryItem;
use crate::models::lessons::requests::{LessonFilter, StatusFilter};

/// 单条课程是否满足筛选条件
///
/// 条件为与关系：状态、学生姓名（不区分大小写的子串）、开始日期区间（闭区间）。
/// 日期按 ISO 前缀做字典序比较。
pub fn matches_filter(lesson: &LessonHistoryItem, filter: &LessonFilter) -> bool {
    if let StatusFilter::Only(status) = filter.status
        && lesson.status != status
    {
        return false;
    }

    let search = filter.search.as_str();
    if !search.is_empty()
        && !lesson
            .student_name
            .to_lowercase()
            .contains(&search.to_lowercase())
    {
        return false;
    }

    let date = lesson.start_date();
    if !filter.from.is_empty() && date < filter.from.as_str() {
        return false;
    }
    if !filter.to.is_empty() && date > filter.to.as_str() {
        return false;
    }

    true
}

pub fn filter_lessons<'a>(
    lessons: &'a [LessonHistoryItem],
    filter: &LessonFilter,
) -> Vec<&'a LessonHistoryItem> {
    lessons
        .iter()
        .filter(|lesson| matches_filter(lesson, filter))
        .collect()
}
