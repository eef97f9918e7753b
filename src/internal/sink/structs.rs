pub mod memory_sink;
pub mod writer_sink;

pub use memory_sink::MemorySink;
pub use writer_sink::WriterSink;
