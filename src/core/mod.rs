pub mod engine;
pub mod export;
pub mod helpers;
pub mod loader;
pub mod render;
pub mod theme;

pub use crate::domain::model::{EntryRole, Resume, RubyPair};
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::Result;
