mod action;
mod align;
mod geometry;
mod host;
mod memory;
mod options;
mod spec;

pub use crate::action::*;
pub use crate::align::*;
pub use crate::geometry::*;
pub use crate::host::*;
pub use crate::memory::*;
pub use crate::options::*;
pub use crate::spec::*;
