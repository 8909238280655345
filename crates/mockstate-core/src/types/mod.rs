//! Request and response model exchanged with the host pipeline.

pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;
