pub mod entrance;
pub mod fetcher;
pub mod media_format;
pub mod sink;
pub mod states;
pub mod streamer;
