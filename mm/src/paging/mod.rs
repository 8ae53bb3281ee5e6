mod entry;
mod store;
mod tables;

pub use entry::{Entry, EntryState};
pub use store::{EvictedLeaf, PagingStore};
pub use tables::PageTable;
