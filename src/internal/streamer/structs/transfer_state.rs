use super::stream_error::StreamError;

/// 单次逻辑传输的进度账本，只由传输器持有和修改。
///
/// 不变式：`received_so_far` 只增不减，等于已写入输出端的字节总数；
/// 总长度已知时 `received_so_far <= total_known`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferState {
    received_so_far: u64,
    total_known: Option<u64>,
}

impl TransferState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received_so_far(&self) -> u64 {
        self.received_so_far
    }

    pub fn total_known(&self) -> Option<u64> {
        self.total_known
    }

    /// 下一次请求的起点。
    pub fn next_offset(&self) -> u64 {
        self.received_so_far
    }

    /// 记录本次响应声明的总长度。首次出现即为准，之后必须一致。
    ///
    /// 后续响应不带总长度时沿用已知值。
    pub fn record_declared(&mut self, declared: Option<u64>) -> Result<(), StreamError> {
        match (self.total_known, declared) {
            (_, None) => Ok(()),
            (None, Some(actual)) => {
                self.total_known = Some(actual);
                Ok(())
            }
            (Some(expected), Some(actual)) if expected == actual => Ok(()),
            (Some(expected), Some(actual)) => Err(StreamError::LengthMismatch { expected, actual }),
        }
    }

    /// 一块长度为 `len` 的数据中可以写入输出端的字节数：不会越过已知总长度。
    pub fn accept(&self, len: usize) -> usize {
        match self.total_known {
            None => len,
            Some(total) => {
                let remaining = total.saturating_sub(self.received_so_far);
                usize::try_from(remaining).map_or(len, |r| r.min(len))
            }
        }
    }

    /// 记录已写入输出端的字节。
    pub fn advance(&mut self, written: u64) {
        self.received_so_far += written;
        debug_assert!(self.total_known.is_none_or(|t| self.received_so_far <= t));
    }

    /// 流结束时是否可以视为完整：总长度未知时流结束即完成。
    pub fn is_complete(&self) -> bool {
        self.total_known.is_none_or(|t| self.received_so_far >= t)
    }
}
