//! Common types and utilities for loadtest populators.
//!
//! This crate provides the argument types shared by every write-load
//! populator so each one exposes the same worker / duration interface.

pub mod args;

pub use args::{
    CommonPopulateArgs, DEFAULT_DURATION_SECS, DEFAULT_SHUTDOWN_GRACE_SECS, DEFAULT_WORKERS,
};
