//! integrated tests
pub mod toolkit;

mod stream;
