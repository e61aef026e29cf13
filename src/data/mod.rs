//! Data preparation stages.
//!
//! - `clean`: raw rows -> complete, typed panel records
//! - `slice`: cleaned panel -> one year with income per person / per worker

pub mod clean;
pub mod slice;

pub use clean::*;
pub use slice::*;
