use async_trait::async_trait;

/// 调用方持有的字节输出端。
///
/// - `write` 按资源偏移严格递增、连续地调用，从偏移 0 开始，不会重叠也不会重复；
/// - `finalize` 最多调用一次，且只在传输完整结束时调用。中途失败或取消时不会调用，由调用方自行关闭。
#[async_trait]
pub trait ByteSink: Send {
    async fn write(&mut self, chunk: &[u8]) -> std::io::Result<()>;

    async fn finalize(&mut self) -> std::io::Result<()>;
}

