use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::internal::sink::traits::byte_sink::ByteSink;

/// 把任意 [`AsyncWrite`] 包装成输出端；`finalize` 时 flush 并 shutdown。
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
    bytes_written: u64,
}

impl<W> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<File> {
    /// 创建（或截断）本地文件作为输出端。
    pub async fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path).await?;
        Ok(Self::new(file))
    }
}

#[async_trait]
impl<W> ByteSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(chunk).await?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    async fn finalize(&mut self) -> std::io::Result<()> {
        self.writer.flush().await?;
        self.writer.shutdown().await
    }
}
