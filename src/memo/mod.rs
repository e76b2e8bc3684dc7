//! Memoization Module
//!
//! Caches pure function results by their arguments.

mod finite;
mod key;
mod wrapper;

pub use key::{Kwargs, MemoKey};
