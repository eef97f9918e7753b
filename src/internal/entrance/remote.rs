use futures_util::future::join_all;

use crate::internal::sink::traits::byte_sink::ByteSink;
use crate::internal::streamer::structs::{ResumableStreamer, StreamError, StreamResult};

/// 本库主入口之一：用默认配置把远程资源流式写入输出端，中途断开时自动续传。
///
/// example:
/// ```rust,no_run
/// use resumable_stream::open_stream;
/// use resumable_stream::sink::MemorySink;
///
/// # async fn example() {
/// let client = reqwest::Client::new();
/// let mut sink = MemorySink::new();
/// let result = open_stream(&client, "https://media.example.com/a.opus", &mut sink).await;
/// # }
/// ```
pub async fn open_stream<S>(
    client: &reqwest::Client,
    locator: &str,
    sink: &mut S,
) -> Result<StreamResult, StreamError>
where
    S: ByteSink + ?Sized,
{
    ResumableStreamer::http(client.clone()).stream(locator, sink).await
}

/// 并发执行多个互不相关的传输，各自拥有独立的输出端和进度，结果按输入顺序返回。
pub async fn open_streams<S>(
    client: &reqwest::Client,
    jobs: Vec<(String, S)>,
) -> Vec<(S, Result<StreamResult, StreamError>)>
where
    S: ByteSink,
{
    let tasks = jobs.into_iter().map(|(locator, mut sink)| async move {
        let result = open_stream(client, &locator, &mut sink).await;
        (sink, result)
    });
    join_all(tasks).await
}
