//! 请求级忙碌标记
//!
//! 发起请求期间禁用触发控件：同一动作在前一个请求结束前再次触发直接返回
//! [`PortalError::Busy`]，不会重复发送。标记随 [`BusyGuard`] 释放而清除。

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::errors::{PortalError, Result};

/// 忙碌标记的键：动作 + 实体 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyKey {
    LessonTransition(i64),
    HomeworkCreate,
    QuestionAdd(i64),
    HomeworkDelete(i64),
    HomeworkAssign(i64),
    AssignmentSubmit(i64),
}

impl std::fmt::Display for BusyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusyKey::LessonTransition(id) => write!(f, "lesson #{id} status update"),
            BusyKey::HomeworkCreate => write!(f, "homework creation"),
            BusyKey::QuestionAdd(id) => write!(f, "adding a question to homework #{id}"),
            BusyKey::HomeworkDelete(id) => write!(f, "deleting homework #{id}"),
            BusyKey::HomeworkAssign(id) => write!(f, "assigning homework to lesson #{id}"),
            BusyKey::AssignmentSubmit(id) => write!(f, "submitting assignment #{id}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BusyRegistry {
    in_flight: Arc<DashMap<BusyKey, ()>>,
}

impl BusyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 占用标记；已被占用时返回 Busy
    pub fn acquire(&self, key: BusyKey) -> Result<BusyGuard> {
        match self.in_flight.entry(key) {
            Entry::Occupied(_) => Err(PortalError::busy(format!("{key} is already in progress"))),
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(BusyGuard {
                    key,
                    in_flight: self.in_flight.clone(),
                })
            }
        }
    }

    pub fn is_busy(&self, key: BusyKey) -> bool {
        self.in_flight.contains_key(&key)
    }
}

/// 持有期间标记保持；drop 时释放
#[derive(Debug)]
pub struct BusyGuard {
    key: BusyKey,
    in_flight: Arc<DashMap<BusyKey, ()>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}
