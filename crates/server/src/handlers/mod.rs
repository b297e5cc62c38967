//! HTTP request handlers.

pub mod common;
pub mod convert;

pub use common::*;
pub use convert::*;
