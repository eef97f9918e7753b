//! 单阶段钩子适配器：将闭包包装成 [`StreamHook`]，供 `with_xx_hook` 使用。

use std::future::Future;

use async_trait::async_trait;

use crate::internal::streamer::traits::stream_hook::{HookAbort, StreamHook};

/// 仅实现「每次请求前」的钩子适配器。
pub(crate) struct BeforeAttemptHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> StreamHook for BeforeAttemptHookAdapter<F>
where
    F: FnMut(u64, u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
{
    async fn before_attempt(&mut self, offset: u64, attempt: u32) -> Result<(), HookAbort> {
        (self.0)(offset, attempt).await
    }
}

/// 仅实现「每块数据」的钩子适配器。
pub(crate) struct OnChunkHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> StreamHook for OnChunkHookAdapter<F>
where
    F: FnMut(&[u8]) + Send + Sync + 'static,
{
    fn on_chunk(&mut self, chunk: &[u8]) {
        (self.0)(chunk);
    }
}

/// 仅实现「进度」的钩子适配器。
pub(crate) struct OnProgressHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> StreamHook for OnProgressHookAdapter<F>
where
    F: FnMut(u64, Option<u64>) + Send + Sync + 'static,
{
    fn on_progress(&mut self, bytes_done: u64, total: Option<u64>) {
        (self.0)(bytes_done, total);
    }
}

/// 仅实现「完成后」的钩子适配器。
pub(crate) struct AfterCompleteHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> StreamHook for AfterCompleteHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn after_complete(&mut self) {
        (self.0)().await
    }
}
