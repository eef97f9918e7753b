pub mod stream_hook;
