#![forbid(unsafe_code)]

pub mod instant;
pub mod record;

pub use instant::{CLF_TIME_FORMAT, LogInstant};
pub use record::{Method, Record};
