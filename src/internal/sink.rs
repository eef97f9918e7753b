//! 字节输出端：流式传输按顺序写入、仅在完整结束时收尾一次。

pub mod structs;
pub mod traits;
