/// 传输进度：响应式状态，由传输器在每块数据写入后更新。
///
/// 调用方通过传输器的 `progress()` 读取或监听；进度比例可用 [`TransferProgress::pct`] 获取。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferProgress {
    /// 已写入输出端的字节数
    pub bytes_done: u64,
    /// 资源总大小，服务器未声明时为 `None`
    pub total: Option<u64>,
    /// 已发起的请求次数
    pub attempts: u32,
    /// 输出端已收尾
    pub finished: bool,
}

impl TransferProgress {
    /// 进度百分比（0～100）；总大小为 0 或未知时返回 `f64::NAN`。
    pub fn pct(&self) -> f64 {
        self.total
            .filter(|&t| t > 0)
            .map(|t| (self.bytes_done as f64 / t as f64) * 100.0)
            .unwrap_or(f64::NAN)
    }
}
