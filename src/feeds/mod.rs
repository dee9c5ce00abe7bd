pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod snapshot;
