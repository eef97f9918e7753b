use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::internal::fetcher::traits::range_transport::RangeTransport;
use crate::internal::fetcher::transports::http_transport::HttpTransport;

/// 协议 → 传输实现的显式注册表，构造时注入 [`RangeFetcher`](super::range_fetcher::RangeFetcher)。
///
/// 支持的协议是封闭集合：只有注册过的协议能发起请求，其余一律拒绝。
#[derive(Clone, Default)]
pub struct TransportRegistry {
    transports: HashMap<String, Arc<dyn RangeTransport>>,
}

impl TransportRegistry {
    /// 空注册表，不支持任何协议。
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册 `http` 与 `https`，共用同一个 reqwest 客户端。
    pub fn http(client: reqwest::Client) -> Self {
        let transport: Arc<dyn RangeTransport> = Arc::new(HttpTransport::new(client));
        Self::new()
            .with_transport("http", Arc::clone(&transport))
            .with_transport("https", transport)
    }

    /// 注册（或替换）某个协议的传输实现；协议名不区分大小写，不带 `:`。
    pub fn with_transport(mut self, scheme: &str, transport: Arc<dyn RangeTransport>) -> Self {
        self.transports.insert(scheme.to_ascii_lowercase(), transport);
        self
    }

    pub fn get(&self, scheme: &str) -> Option<&Arc<dyn RangeTransport>> {
        self.transports.get(&scheme.to_ascii_lowercase())
    }

    pub fn supports(&self, scheme: &str) -> bool {
        self.get(scheme).is_some()
    }
}

impl fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut schemes: Vec<&str> = self.transports.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        f.debug_struct("TransportRegistry")
            .field("schemes", &schemes)
            .finish()
    }
}
