pub mod app;
pub mod transport;
