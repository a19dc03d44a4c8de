//! Drafting host interface and implementations

mod cursor;
mod memory;
mod traits;

pub use cursor::{CursorScope, with_cursor_at};
pub use memory::{ComponentRecord, MemoryHost};
pub use traits::*;
