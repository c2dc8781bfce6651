//! Application services layer.

pub mod comments;
pub mod counts;
pub mod error;
pub mod feed;
pub mod repos;
