use crate::internal::states::unlock_reactive::{PropertyWatcher, UnlockReactiveProperty};

/// 传输控制句柄：可 clone，在任意任务中调用 [`cancel`](Self::cancel)。
///
/// 取消后传输器停止写入、丢弃在途请求并返回 `StreamError::Cancelled`；输出端保持打开、不收尾。
#[derive(Debug, Clone)]
pub struct StreamController {
    cancelled: UnlockReactiveProperty<bool>,
}

impl StreamController {
    pub(crate) fn new() -> Self {
        Self {
            cancelled: UnlockReactiveProperty::new(false),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.update(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get_current().unwrap_or(false)
    }

    pub(crate) fn watch(&self) -> CancelWatcher {
        CancelWatcher(self.cancelled.watch())
    }
}

/// 传输循环内部持有的取消监听器。
pub(crate) struct CancelWatcher(PropertyWatcher<bool>);

impl CancelWatcher {
    /// 等待取消信号；已取消时立即返回。属性被销毁时永不返回。
    pub(crate) async fn cancelled(&mut self) {
        if self.0.wait_for(|c| *c).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
