/*!
 * 页面提示（Toast）服务
 *
 * 操作成功或失败后弹出一条短暂提示，经过固定延迟后自动消失。
 * 界面层通过 `subscribe()` 接收显示/消失事件，或随时读取 `active()`。
 *
 * ## 事件
 * ```text
 * Shown(Toast { id: 1, message: "Lesson #7 updated to Completed", .. })
 * Dismissed(1)        // 约 3.2 秒后
 * ```
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

/// 提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown(Toast),
    Dismissed(u64),
}

struct Inner {
    /// 提示 ID -> 当前显示中的提示
    active: DashMap<u64, Toast>,
    next_id: AtomicU64,
    sender: broadcast::Sender<ToastEvent>,
    dismiss_after: Duration,
}

/// 提示管理器，克隆后共享同一组提示
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        let (sender, _) = broadcast::channel(32);
        Self {
            inner: Arc::new(Inner {
                active: DashMap::new(),
                next_id: AtomicU64::new(1),
                sender,
                dismiss_after,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.inner.sender.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.notify(ToastKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.notify(ToastKind::Error, message.into())
    }

    /// 显示提示并安排自动消失；必须在 tokio 运行时内调用
    fn notify(&self, kind: ToastKind, message: String) -> Toast {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast { id, kind, message };
        debug!(id, message = %toast.message, "Showing toast");

        self.inner.active.insert(id, toast.clone());
        // 没有订阅者时发送失败是正常情况
        let _ = self.inner.sender.send(ToastEvent::Shown(toast.clone()));

        let notifier = self.clone();
        let delay = self.inner.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.dismiss(id);
        });

        toast
    }

    /// 手动关闭；已关闭的提示忽略
    pub fn dismiss(&self, id: u64) {
        if self.inner.active.remove(&id).is_some() {
            debug!(id, "Dismissing toast");
            let _ = self.inner.sender.send(ToastEvent::Dismissed(id));
        }
    }

    /// 当前显示中的提示，按出现顺序
    pub fn active(&self) -> Vec<Toast> {
        let mut toasts: Vec<Toast> = self.inner.active.iter().map(|t| t.value().clone()).collect();
        toasts.sort_by_key(|t| t.id);
        toasts
    }
}
