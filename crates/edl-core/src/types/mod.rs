mod format;
mod indicator;
mod page;

pub use format::*;
pub use indicator::*;
pub use page::*;
