//! RangeFetcher：解析协议、分派到传输实现、发起单次开放式 Range 请求。

use tracing::debug;
use url::Url;

use super::fetch_error::FetchError;
use super::transfer_response::TransferResponse;
use super::transport_registry::TransportRegistry;

/// 单次请求的叶子组件，无状态，可 clone 后在多个传输间共享。
#[derive(Debug, Clone)]
pub struct RangeFetcher {
    registry: TransportRegistry,
}

impl RangeFetcher {
    pub fn new(registry: TransportRegistry) -> Self {
        Self { registry }
    }

    /// 只支持 `http` / `https` 的默认配置。
    pub fn http(client: reqwest::Client) -> Self {
        Self::new(TransportRegistry::http(client))
    }

    pub fn registry(&self) -> &TransportRegistry {
        &self.registry
    }

    /// 解析地址并发起请求。
    pub async fn fetch_str(&self, locator: &str, start: u64) -> Result<TransferResponse, FetchError> {
        let url = Url::parse(locator)?;
        self.fetch(&url, start).await
    }

    /// 请求 `locator` 从 `start` 到末尾的字节。
    ///
    /// 协议未注册时直接返回 [`FetchError::UnsupportedScheme`]，不会产生任何网络 I/O。
    pub async fn fetch(&self, locator: &Url, start: u64) -> Result<TransferResponse, FetchError> {
        let transport = self
            .registry
            .get(locator.scheme())
            .ok_or_else(|| FetchError::UnsupportedScheme(locator.scheme().to_string()))?;

        debug!(%locator, start, "发起 Range 请求");
        let response = transport.open(locator, start).await?;
        debug!(
            %locator,
            start,
            declared_length = ?response.declared_length,
            range_start = response.range_start,
            "收到响应头"
        );
        Ok(response)
    }
}
