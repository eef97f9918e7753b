use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 默认连接失败重试次数
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// 默认重试延迟（毫秒）
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// 请求在收到任何响应之前连接失败时的处理方式。
///
/// 这类失败与「传输提前结束」不同：后者总会立即续传，前者由本策略决定。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConnectFailurePolicy {
    /// 立即以连接错误结束传输。
    #[default]
    Fail,
    /// 连续失败不超过 `max_retries` 次时，等待 `retry_delay_ms` 后从同一偏移重试。
    Retry { max_retries: u32, retry_delay_ms: u64 },
    /// 记录日志后忽略错误，不重试也不报错：传输停在当前进度，直到被取消。
    Stall,
}

impl ConnectFailurePolicy {
    /// 使用默认次数与延迟的重试策略。
    pub fn retry() -> Self {
        Self::Retry {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }

    pub(crate) fn retry_delay(&self) -> Duration {
        match self {
            Self::Retry { retry_delay_ms, .. } => Duration::from_millis(*retry_delay_ms),
            _ => Duration::ZERO,
        }
    }
}

/// 单次流式传输的配置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub connect_failure: ConnectFailurePolicy,
    /// 连续多少次续传都没有拿到任何字节时放弃；`None` 表示不限（默认）。
    pub max_idle_attempts: Option<u32>,
}
