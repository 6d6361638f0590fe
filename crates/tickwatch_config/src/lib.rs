pub mod settings;
pub mod watch;

pub use crate::settings::{DisplayUnit, ParseSettingError, Precision};
pub use crate::watch::{RejectedVar, WatchConfig};
