//! 可续传流式传输器
//!
//! 把远程资源的字节按顺序写入调用方的输出端；连接提前结束（断线、部分响应、服务器超时）时，
//! 从最后一个成功写入的字节之后重新发起开放式 Range 请求，对调用方透明。
//!
//! ## 功能特性
//!
//! - **自动续传**：流结束但未达到声明总长度时立即续传，不限次数、不延迟
//! - **恰好一次**：每个字节按顺序写入输出端一次，续传只请求尚未写入的部分
//! - **长度校验**：首次声明的总长度为准，续传时不一致即失败
//! - **连接失败策略**：失败 / 有限次重试 / 静默停滞，见 [`ConnectFailurePolicy`]
//! - **响应式进度**：通过 `progress()` 获取可监听的进度状态
//! - **取消**：通过 `controller()` 获取可跨任务使用的取消句柄
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use resumable_stream::streamer::ResumableStreamer;
//! # use resumable_stream::sink::WriterSink;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sink = WriterSink::create("track.webm").await?;
//! let result = ResumableStreamer::http(reqwest::Client::new())
//!     .with_on_progress_hook(|done, total| println!("{done}/{total:?}"))
//!     .stream("https://media.example.com/track.webm", &mut sink)
//!     .await?;
//! println!("写入 {} 字节，请求 {} 次", result.bytes_written, result.attempts);
//! # Ok(())
//! # }
//! ```
//!
//! ## 完整性判断
//!
//! - 服务器声明了总长度：已写入字节数达到总长度才算完成，否则续传
//! - 服务器从未声明总长度：无法区分截断与完成，第一次流结束即视为完成

mod transfer_loop;

use std::future::Future;

use url::Url;

use crate::internal::fetcher::structs::fetch_error::FetchError;
use crate::internal::fetcher::structs::range_fetcher::RangeFetcher;
use crate::internal::sink::traits::byte_sink::ByteSink;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::streamer::traits::stream_hook::{HookAbort, StreamHook};

use super::hook_adapters::{
    AfterCompleteHookAdapter, BeforeAttemptHookAdapter, OnChunkHookAdapter, OnProgressHookAdapter,
};
use super::stream_config::{ConnectFailurePolicy, StreamConfig};
use super::stream_controller::StreamController;
use super::stream_error::StreamError;
use super::stream_hooks_container::StreamHooksContainer;
use super::stream_result::StreamResult;
use super::transfer_progress::TransferProgress;
use transfer_loop::Transfer;

/// 可续传流式传输器：一次逻辑传输一个实例，`stream` 消耗自身。
///
/// 拥有响应式属性（通过 `progress()` 获取）与取消句柄（通过 `controller()` 获取），
/// 都需要在调用 `stream` 之前取出。
pub struct ResumableStreamer {
    fetcher: RangeFetcher,
    config: StreamConfig,
    hooks: StreamHooksContainer,
    progress_state: UnlockReactiveProperty<TransferProgress>,
    controller: StreamController,
}

impl ResumableStreamer {
    pub fn new(fetcher: RangeFetcher) -> Self {
        Self {
            fetcher,
            config: StreamConfig::default(),
            hooks: StreamHooksContainer::default(),
            progress_state: UnlockReactiveProperty::new(TransferProgress::default()),
            controller: StreamController::new(),
        }
    }

    /// 只支持 `http` / `https` 的传输器。
    pub fn http(client: reqwest::Client) -> Self {
        Self::new(RangeFetcher::http(client))
    }

    /// 整体替换配置。
    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置连接失败策略，默认 [`ConnectFailurePolicy::Fail`]。
    pub fn connect_failure(mut self, policy: ConnectFailurePolicy) -> Self {
        self.config.connect_failure = policy;
        self
    }

    /// 连续 n 次续传都没有收到数据时放弃；不设置则不限。
    pub fn max_idle_attempts(mut self, n: u32) -> Self {
        self.config.max_idle_attempts = Some(n);
        self
    }

    /// 注册「每次请求前」钩子；闭包返回 `Err(HookAbort)` 会中止传输。
    pub fn with_before_attempt_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut(u64, u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
    {
        self.hooks.add(BeforeAttemptHookAdapter(f));
        self
    }

    /// 注册「每块数据」钩子；参数为刚写入输出端的字节。
    pub fn with_on_chunk_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[u8]) + Send + Sync + 'static,
    {
        self.hooks.add(OnChunkHookAdapter(f));
        self
    }

    /// 注册「进度」钩子；参数为已写入字节数、总大小（可能未知为 `None`）。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(u64, Option<u64>) + Send + Sync + 'static,
    {
        self.hooks.add(OnProgressHookAdapter(f));
        self
    }

    /// 注册「完成后」钩子；输出端收尾成功后调用。
    pub fn with_after_complete_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.hooks.add(AfterCompleteHookAdapter(f));
        self
    }

    /// 添加完整钩子；可多次调用，按注册顺序执行。
    pub fn with_hook(mut self, hook: impl StreamHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// 内置的进度状态；返回可共享句柄，`.watch()` 后 `changed().await` 监听进度。
    pub fn progress(&self) -> UnlockReactiveProperty<TransferProgress> {
        self.progress_state.clone()
    }

    /// 取消句柄。
    pub fn controller(&self) -> StreamController {
        self.controller.clone()
    }

    /// 解析地址后执行传输，见 [`stream_url`](Self::stream_url)。
    pub async fn stream<S>(self, locator: &str, sink: &mut S) -> Result<StreamResult, StreamError>
    where
        S: ByteSink + ?Sized,
    {
        let url = Url::parse(locator).map_err(FetchError::from)?;
        self.stream_url(&url, sink).await
    }

    /// 执行传输，直到输出端收到完整资源（`Ok`）或遇到终止条件（`Err`）。
    ///
    /// 返回时不会有任何仍在途的数据；失败或取消时输出端不会收尾。
    pub async fn stream_url<S>(self, locator: &Url, sink: &mut S) -> Result<StreamResult, StreamError>
    where
        S: ByteSink + ?Sized,
    {
        if !self.fetcher.registry().supports(locator.scheme()) {
            return Err(FetchError::UnsupportedScheme(locator.scheme().to_string()).into());
        }

        Transfer {
            fetcher: &self.fetcher,
            locator,
            config: &self.config,
            hooks: self.hooks,
            progress: self.progress_state,
            cancel: self.controller.watch(),
            sink,
            state: Default::default(),
            attempts: 0,
        }
        .run()
        .await
    }
}
