//! 读取本地文件或远程资源的头部字节并识别格式。

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::RANGE;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::internal::fetcher::structs::fetch_error::FetchError;

use super::signature::{MediaFormat, SNIFF_LEN, classify};

/// 读取本地文件前 [`SNIFF_LEN`] 字节并识别；文件无法打开或读取时返回 `None`。
pub async fn sniff_local(path: impl AsRef<Path>) -> Option<MediaFormat> {
    let path = path.as_ref();
    let mut file = match File::open(path).await {
        Ok(f) => f,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "无法打开文件，格式未知");
            return None;
        }
    };

    let mut buf = Vec::with_capacity(SNIFF_LEN);
    if let Err(e) = (&mut file).take(SNIFF_LEN as u64).read_to_end(&mut buf).await {
        debug!(path = %path.display(), error = %e, "读取文件头失败，格式未知");
        return None;
    }
    classify(&buf)
}

/// 用 `Range: bytes=0-35` 请求远程资源头部并识别。
///
/// 服务器忽略 Range 返回整个资源时，只读取前 [`SNIFF_LEN`] 字节后即断开。
/// 非成功状态（包括空资源的 416）没有可识别的头部，返回 `Ok(None)`；
/// 只有连接失败与响应体读取失败返回错误。
pub async fn sniff_remote(client: &Client, url: &str) -> Result<Option<MediaFormat>, FetchError> {
    let resp = client
        .get(url)
        .header(RANGE, format!("bytes=0-{}", SNIFF_LEN - 1))
        .send()
        .await
        .map_err(FetchError::connection)?;

    let status = resp.status();
    if !status.is_success() {
        debug!(url, status = status.as_u16(), "远程资源没有可读取的头部，格式未知");
        return Ok(None);
    }

    let mut stream = resp.bytes_stream();
    let mut buf = Vec::with_capacity(SNIFF_LEN);
    while buf.len() < SNIFF_LEN {
        match stream.next().await {
            Some(chunk) => {
                let chunk = chunk.map_err(FetchError::body)?;
                let take = (SNIFF_LEN - buf.len()).min(chunk.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            None => break,
        }
    }
    Ok(classify(&buf))
}

/// 以 `http` 开头的地址走远程嗅探，其余视为本地路径。
pub async fn determine_format(client: &Client, locator: &str) -> Result<Option<MediaFormat>, FetchError> {
    if locator.starts_with("http") {
        sniff_remote(client, locator).await
    } else {
        Ok(sniff_local(locator).await)
    }
}
