//! Wire DTOs shared with ShareFood clients.

pub mod api;
pub mod donation;
pub mod rating;
pub mod request;
