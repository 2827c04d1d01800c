pub mod clf;

pub use clf::{ClfError, parse_line};
