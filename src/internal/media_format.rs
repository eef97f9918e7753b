//! 媒体容器格式嗅探：读取资源前 36 字节，按固定魔数识别 WebM 与 Ogg/Opus。
//!
//! 与传输核心相互独立，只用于决定下游如何标注/解码拉取到的字节流。

pub mod signature;
pub mod sniff;
