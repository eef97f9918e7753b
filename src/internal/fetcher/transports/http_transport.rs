//! 基于 reqwest 的 HTTP(S) 传输实现。

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, HeaderMap, RANGE};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::internal::fetcher::structs::content_range::{ContentRange, open_range_header};
use crate::internal::fetcher::structs::fetch_error::FetchError;
use crate::internal::fetcher::structs::transfer_response::TransferResponse;
use crate::internal::fetcher::traits::range_transport::{BoxByteStream, RangeTransport};

/// HTTP(S) 传输：发送 `Range: bytes=start-`，从响应头推算资源总长度。
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl RangeTransport for HttpTransport {
    async fn open(&self, locator: &Url, start: u64) -> Result<TransferResponse, FetchError> {
        let resp = self
            .client
            .get(locator.clone())
            .header(RANGE, open_range_header(start))
            .send()
            .await
            .map_err(FetchError::connection)?;

        let status = resp.status();
        let headers = resp.headers();

        match status {
            StatusCode::PARTIAL_CONTENT => {
                let content_range = header_str(headers, CONTENT_RANGE).and_then(ContentRange::parse);
                let range_start = content_range.and_then(|r| r.start()).unwrap_or(start);
                let declared = content_range.and_then(|r| r.total);
                Ok(TransferResponse::new(declared, range_start, body_stream(resp)))
            }
            // 服务器忽略了 Range：响应体是整个资源，Content-Length 即总长度。
            StatusCode::OK => {
                let declared = header_str(headers, CONTENT_LENGTH).and_then(|v| v.trim().parse().ok());
                Ok(TransferResponse::new(declared, 0, body_stream(resp)))
            }
            // 起点已在资源末尾（典型为空资源请求 bytes=0-）时视为空响应；
            // 起点仍在资源内部的 416 无法再推进，按错误状态返回。
            StatusCode::RANGE_NOT_SATISFIABLE => {
                let total = header_str(headers, CONTENT_RANGE)
                    .and_then(ContentRange::parse)
                    .and_then(|r| r.total);
                match total {
                    Some(total) if start >= total => Ok(TransferResponse::new(
                        Some(total),
                        start,
                        Box::pin(futures_util::stream::empty::<Result<Bytes, FetchError>>()),
                    )),
                    _ => Err(FetchError::HttpStatus(status.as_u16())),
                }
            }
            other => Err(FetchError::HttpStatus(other.as_u16())),
        }
    }
}

fn header_str(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn body_stream(resp: reqwest::Response) -> BoxByteStream {
    Box::pin(resp.bytes_stream().map(|chunk| chunk.map_err(FetchError::body)))
}
