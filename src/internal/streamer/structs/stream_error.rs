//! 流式传输终止错误。传输提前结束（short transfer）属于内部续传触发条件，不会出现在这里。

use thiserror::Error;

use crate::internal::fetcher::structs::fetch_error::FetchError;
use crate::internal::streamer::traits::stream_hook::HookAbort;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// 续传时服务器报告的总长度与首次不同，说明资源在传输期间被修改。
    #[error("资源总长度发生变化: 首次为 {expected}，本次为 {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// 续传请求的响应体没有从请求的偏移开始（服务器忽略了 Range）。
    #[error("服务器不支持 Range 请求: 请求起点 {requested}，响应起点 {actual}")]
    RangeNotSupported { requested: u64, actual: u64 },

    #[error("连续 {attempts} 次续传均未收到数据，已接收 {received} 字节")]
    NoProgress { received: u64, attempts: u32 },

    #[error("写入输出端失败: {0}")]
    Sink(#[source] std::io::Error),

    #[error("传输被取消")]
    Cancelled,

    #[error("{0}")]
    HookAbort(#[from] HookAbort),
}

impl StreamError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_unsupported_scheme(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::UnsupportedScheme(_)))
    }
}
