// Common utilities shared by handlers and upstream clients
pub mod client_builder;
pub mod header_constants;
