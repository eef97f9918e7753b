//! 传输流程钩子，供流式传输器在各阶段调用。

use async_trait::async_trait;

/// 钩子请求中止传输时使用的错误。
#[derive(Debug, Clone)]
pub struct HookAbort;

impl std::fmt::Display for HookAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("传输被钩子中止")
    }
}

impl std::error::Error for HookAbort {}

/// 传输流程钩子：在「每次请求前 / 每块数据 / 进度 / 完成后」插入自定义逻辑。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用 `with_before_attempt_hook` / `with_on_progress_hook` / `with_after_complete_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过传输器的 `with_hook` 注册。
#[async_trait]
pub trait StreamHook: Send + Sync {
    /// 每次发起请求前调用；`offset` 为本次请求起点，`attempt` 从 1 开始。返回 `Err` 则中止传输。
    async fn before_attempt(&mut self, _offset: u64, _attempt: u32) -> Result<(), HookAbort> {
        Ok(())
    }

    /// 每段数据写入输出端之后调用。
    fn on_chunk(&mut self, _chunk: &[u8]) {}

    /// 进度更新（累计已写入字节、资源总大小）。
    fn on_progress(&mut self, _bytes_done: u64, _total: Option<u64>) {}

    /// 输出端收尾成功后调用。
    async fn after_complete(&mut self) {}
}
