pub mod authenticated_vendor;
pub mod authentication_request;

pub use authenticated_vendor::*;
pub use authentication_request::*;
