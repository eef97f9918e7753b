pub mod range_transport;
