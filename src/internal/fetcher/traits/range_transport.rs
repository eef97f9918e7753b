//! 传输层 trait：按协议注册，负责发起单次开放式 Range 请求。

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use url::Url;

use crate::internal::fetcher::structs::fetch_error::FetchError;
use crate::internal::fetcher::structs::transfer_response::TransferResponse;

/// 响应体字节流：按到达顺序产出数据块，读取出错时以 `Err` 作为最后一项。
pub type BoxByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send + 'static>>;

/// 发起单次 Range 请求的传输实现。
///
/// 实现方只负责「请求 `start..` 并返回流」，不判断传输是否完整；
/// 完整性只有持有期望总长度的 [`ResumableStreamer`](crate::streamer::ResumableStreamer) 才能判断。
#[async_trait]
pub trait RangeTransport: Send + Sync {
    /// 请求 `locator` 从 `start` 到末尾的字节。
    ///
    /// 连接无法建立或在响应头到达前断开时返回 [`FetchError::Connection`]。
    async fn open(&self, locator: &Url, start: u64) -> Result<TransferResponse, FetchError>;
}
