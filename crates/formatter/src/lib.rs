mod formatter;
mod link;
mod overlay;
mod resize;
mod toolbar;

pub use crate::formatter::*;
pub use crate::link::*;
pub use crate::overlay::*;
pub use crate::resize::*;
pub use crate::toolbar::*;
