mod board;
mod constants;
mod event;
mod phase;
mod rejection;
mod symbol;

pub use board::*;
pub use constants::*;
pub use event::*;
pub use phase::*;
pub use rejection::*;
pub use symbol::*;
