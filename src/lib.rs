//! Feed-assembly core for timeline applications.
//!
//! Given an ordered batch of raw post rows, attaches to each a comment count
//! and an ordered comment list with embedded author snapshots, consulting a
//! shared key-value cache before the relational store and writing resolved
//! values back with a short TTL. Sessions, routing, and rendering live in the
//! serving layer; this crate only assembles data.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
