/// 内部实现模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::remote::*;

/// 单次开放式 Range 请求：协议注册表、传输 trait 与 HTTP 实现
pub mod fetcher {
    use crate::internal;
    pub use internal::fetcher::structs::*;
    pub use internal::fetcher::traits::range_transport::{BoxByteStream, RangeTransport};
    pub use internal::fetcher::transports::http_transport::HttpTransport;
}

/// 可续传流式传输：传输器、配置、错误、进度与钩子
pub mod streamer {
    use crate::internal;
    pub use internal::streamer::structs::*;
    pub use internal::streamer::structs::stream_config::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS};
    pub use internal::streamer::traits::stream_hook::{HookAbort, StreamHook};
}

/// 输出端 trait 与内置实现
pub mod sink {
    use crate::internal;
    pub use internal::sink::structs::*;
    pub use internal::sink::traits::byte_sink::ByteSink;
}

/// 媒体容器格式嗅探，独立于传输核心
pub mod media_format {
    use crate::internal;
    pub use internal::media_format::signature::*;
    pub use internal::media_format::sniff::*;
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}
