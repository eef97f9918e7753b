pub mod content_range;
pub mod fetch_error;
pub mod range_fetcher;
pub mod transfer_response;
pub mod transport_registry;

pub use content_range::ContentRange;
pub use fetch_error::{BoxError, FetchError};
pub use range_fetcher::RangeFetcher;
pub use transfer_response::TransferResponse;
pub use transport_registry::TransportRegistry;
