use std::fmt;

use crate::internal::fetcher::traits::range_transport::BoxByteStream;

/// 单次 Range 请求的结果：声明总长度 + 按到达顺序产出的字节流。
pub struct TransferResponse {
    /// 资源完整大小（不是本次响应体的大小），服务器未告知时为 `None`
    pub declared_length: Option<u64>,
    /// 响应体第一个字节在资源中的偏移；服务器忽略 Range 返回 200 时为 0
    pub range_start: u64,
    /// 直接挂在在途响应体上的字节流；连接关闭（无论是否正常）即结束
    pub body: BoxByteStream,
}

impl TransferResponse {
    pub fn new(declared_length: Option<u64>, range_start: u64, body: BoxByteStream) -> Self {
        Self {
            declared_length,
            range_start,
            body,
        }
    }
}

impl fmt::Debug for TransferResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferResponse")
            .field("declared_length", &self.declared_length)
            .field("range_start", &self.range_start)
            .field("body", &"<byte stream>")
            .finish()
    }
}
