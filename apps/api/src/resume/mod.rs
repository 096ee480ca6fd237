//! Resume endpoints and upload decoding.

pub mod handlers;
pub mod upload;
