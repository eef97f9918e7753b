//! 单次 Range 请求相关错误类型。

use thiserror::Error;

/// 传输层可携带的任意底层错误。
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("资源地址无效: {0}")]
    InvalidLocator(#[from] url::ParseError),

    /// 协议未注册传输实现；在任何网络 I/O 之前返回，不可重试。
    #[error("不支持的协议: {0}")]
    UnsupportedScheme(String),

    /// 连接未能建立，或在收到响应头之前被重置。
    #[error("连接失败: {0}")]
    Connection(#[source] BoxError),

    #[error("服务器返回异常状态码: {0}")]
    HttpStatus(u16),

    /// 响应体读取中断；由传输层作为流的最后一项产出。
    #[error("响应体读取失败: {0}")]
    Body(#[source] BoxError),
}

impl FetchError {
    /// 用任意错误构造 [`FetchError::Connection`]。
    pub fn connection(err: impl Into<BoxError>) -> Self {
        Self::Connection(err.into())
    }

    /// 用任意错误构造 [`FetchError::Body`]。
    pub fn body(err: impl Into<BoxError>) -> Self {
        Self::Body(err.into())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
