mod collection;
mod entry;
mod reference;

pub use collection::*;
pub use entry::*;
pub use reference::*;
