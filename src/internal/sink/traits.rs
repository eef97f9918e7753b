pub mod byte_sink;
