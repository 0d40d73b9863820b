#[macro_use]
extern crate log;

mod core;

pub mod testing;

pub use crate::core::chain::{compose, Chain, Composed};
pub use crate::core::errors::{BoxError, ChainError};
pub use crate::core::middleware::{
    Middleware, MiddlewareResult, MiddlewareReturnValue, Next, NextStatus,
};
