/// 传输完整结束时的统计；失败时返回 [`StreamError`](super::stream_error::StreamError)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamResult {
    /// 写入输出端的总字节数
    pub bytes_written: u64,
    /// 服务器声明的资源总大小，从未声明时为 `None`
    pub declared_length: Option<u64>,
    /// 发起请求的总次数（含续传与连接重试）
    pub attempts: u32,
}
