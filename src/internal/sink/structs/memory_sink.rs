use async_trait::async_trait;

use crate::internal::sink::traits::byte_sink::ByteSink;

/// 内存输出端：把收到的字节累积到 `Vec<u8>`，记录收尾次数。
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    data: Vec<u8>,
    finalize_count: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn is_finalized(&self) -> bool {
        self.finalize_count > 0
    }

    /// `finalize` 被调用的次数；正常情况下只会是 0 或 1。
    pub fn finalize_count(&self) -> usize {
        self.finalize_count
    }
}

#[async_trait]
impl ByteSink for MemorySink {
    async fn write(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        self.data.extend_from_slice(chunk);
        Ok(())
    }

    async fn finalize(&mut self) -> std::io::Result<()> {
        self.finalize_count += 1;
        Ok(())
    }
}
