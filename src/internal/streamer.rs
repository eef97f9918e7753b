//! 可续传流式传输领域模块：驱动 [`RangeFetcher`](crate::fetcher::RangeFetcher) 反复请求，
//! 把字节按顺序写入输出端，连接提前结束时从已接收位置继续。
//!
//! 使用方式：`ResumableStreamer::http(client).with_on_progress_hook(f).stream(url, &mut sink).await`
//! 对外导出以 [`crate::streamer`] 为准。

pub mod structs;
pub mod traits;
