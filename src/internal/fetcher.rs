//! 单次 Range 请求领域模块：协议分派 + 传输实现 + 响应头解析。
//!
//! 对外导出以 [`crate::fetcher`] 为准。

pub mod structs;
pub mod traits;
pub mod transports;
