//! 传输状态机：Fetching → Draining → {完成, 续传, 失败}，以显式循环实现续传。

use futures_util::StreamExt;
use tracing::{debug, warn};
use url::Url;

use crate::internal::fetcher::structs::fetch_error::FetchError;
use crate::internal::fetcher::structs::range_fetcher::RangeFetcher;
use crate::internal::fetcher::traits::range_transport::BoxByteStream;
use crate::internal::sink::traits::byte_sink::ByteSink;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::super::stream_config::{ConnectFailurePolicy, StreamConfig};
use super::super::stream_controller::CancelWatcher;
use super::super::stream_error::StreamError;
use super::super::stream_hooks_container::StreamHooksContainer;
use super::super::stream_result::StreamResult;
use super::super::transfer_progress::TransferProgress;
use super::super::transfer_state::TransferState;

/// 一次逻辑传输的全部可变状态（形参较多，用 struct 承载）。
pub(super) struct Transfer<'a, S: ?Sized> {
    pub(super) fetcher: &'a RangeFetcher,
    pub(super) locator: &'a Url,
    pub(super) config: &'a StreamConfig,
    pub(super) hooks: StreamHooksContainer,
    pub(super) progress: UnlockReactiveProperty<TransferProgress>,
    pub(super) cancel: CancelWatcher,
    pub(super) sink: &'a mut S,
    pub(super) state: TransferState,
    pub(super) attempts: u32,
}

impl<S> Transfer<'_, S>
where
    S: ByteSink + ?Sized,
{
    pub(super) async fn run(mut self) -> Result<StreamResult, StreamError> {
        let mut connect_failures: u32 = 0;
        let mut idle_attempts: u32 = 0;

        loop {
            let offset = self.state.next_offset();
            self.attempts += 1;
            self.progress.update_field(|p| p.attempts = self.attempts);
            self.hooks.run_before_attempt(offset, self.attempts).await?;

            let opened = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(StreamError::Cancelled),
                r = self.fetcher.fetch(self.locator, offset) => r,
            };

            let response = match opened {
                Ok(response) => {
                    connect_failures = 0;
                    response
                }
                Err(err) if err.is_connection() => {
                    self.handle_connect_failure(err, &mut connect_failures).await?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            self.state.record_declared(response.declared_length)?;
            if response.range_start != offset {
                return Err(StreamError::RangeNotSupported {
                    requested: offset,
                    actual: response.range_start,
                });
            }

            // 声明长度为 0 或已写满时不再读取响应体。
            let delivered = if self.state.is_complete() && self.state.total_known().is_some() {
                0
            } else {
                self.drain(response.body).await?
            };

            if self.state.is_complete() {
                return self.finish().await;
            }

            if delivered == 0 {
                idle_attempts += 1;
                if let Some(max) = self.config.max_idle_attempts {
                    if idle_attempts >= max {
                        return Err(StreamError::NoProgress {
                            received: self.state.received_so_far(),
                            attempts: idle_attempts,
                        });
                    }
                }
            } else {
                idle_attempts = 0;
            }

            debug!(
                locator = %self.locator,
                received = self.state.received_so_far(),
                total = ?self.state.total_known(),
                attempt = self.attempts,
                "传输提前结束，从已接收位置续传"
            );
        }
    }

    /// 读取一次响应的字节流并按顺序写入输出端，返回本次写入的字节数。
    ///
    /// 流结束、响应体出错、或数据越过声明总长度时返回；返回前丢弃响应流。
    async fn drain(&mut self, mut body: BoxByteStream) -> Result<u64, StreamError> {
        let mut delivered: u64 = 0;

        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(StreamError::Cancelled),
                item = body.next() => item,
            };

            let chunk = match next {
                None => break,
                Some(Ok(chunk)) => chunk,
                Some(Err(err)) => {
                    warn!(locator = %self.locator, error = %err, "响应体中断，按流结束处理");
                    break;
                }
            };

            let accepted = self.state.accept(chunk.len());
            if accepted > 0 {
                let part = &chunk[..accepted];
                self.sink.write(part).await.map_err(StreamError::Sink)?;
                self.state.advance(accepted as u64);
                delivered += accepted as u64;

                let done = self.state.received_so_far();
                let total = self.state.total_known();
                self.hooks.run_on_chunk(part);
                self.hooks.run_on_progress(done, total);
                self.progress.update_field(|p| {
                    p.bytes_done = done;
                    p.total = total;
                });
            }

            if accepted < chunk.len() {
                warn!(
                    locator = %self.locator,
                    dropped = chunk.len() - accepted,
                    "响应数据超出声明总长度，多余部分已丢弃"
                );
                break;
            }
        }

        drop(body);
        Ok(delivered)
    }

    /// 请求在收到响应之前失败时按策略处理；返回 `Ok` 表示应从同一偏移重试。
    async fn handle_connect_failure(
        &mut self,
        err: FetchError,
        failures: &mut u32,
    ) -> Result<(), StreamError> {
        match self.config.connect_failure {
            ConnectFailurePolicy::Fail => Err(err.into()),
            ConnectFailurePolicy::Retry { max_retries, .. } => {
                if *failures >= max_retries {
                    return Err(err.into());
                }
                *failures += 1;
                let delay = self.config.connect_failure.retry_delay();
                warn!(
                    locator = %self.locator,
                    error = %err,
                    retry = *failures,
                    max_retries,
                    "连接失败，稍后重试"
                );
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => Err(StreamError::Cancelled),
                    _ = tokio::time::sleep(delay) => Ok(()),
                }
            }
            ConnectFailurePolicy::Stall => {
                warn!(
                    locator = %self.locator,
                    error = %err,
                    received = self.state.received_so_far(),
                    "连接失败，已忽略；传输停止推进直到被取消"
                );
                self.cancel.cancelled().await;
                Err(StreamError::Cancelled)
            }
        }
    }

    async fn finish(mut self) -> Result<StreamResult, StreamError> {
        self.sink.finalize().await.map_err(StreamError::Sink)?;

        let done = self.state.received_so_far();
        let total = self.state.total_known();
        self.progress.update_field(|p| {
            p.bytes_done = done;
            p.total = total;
            p.finished = true;
        });
        self.hooks.run_after_complete().await;

        debug!(
            locator = %self.locator,
            bytes = done,
            attempts = self.attempts,
            "传输完成"
        );
        Ok(StreamResult {
            bytes_written: done,
            declared_length: total,
            attempts: self.attempts,
        })
    }
}
