pub mod traits;

// Data source implementations
pub mod http;
pub mod mock;
