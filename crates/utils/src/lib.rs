pub mod format;
pub mod logger;

pub use crate::format::{MAX_DECIMALS, format_elapsed};
pub use crate::logger::init_logging;
