pub mod hook_adapters;
pub mod resumable_streamer;
pub mod stream_config;
pub mod stream_controller;
pub mod stream_error;
pub mod stream_hooks_container;
pub mod stream_result;
pub mod transfer_progress;
pub mod transfer_state;

pub use resumable_streamer::ResumableStreamer;
pub use stream_config::{ConnectFailurePolicy, StreamConfig};
pub use stream_controller::StreamController;
pub use stream_error::StreamError;
pub use stream_result::StreamResult;
pub use transfer_progress::TransferProgress;
pub use transfer_state::TransferState;
