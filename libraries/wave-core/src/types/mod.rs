//! Catalog data types

mod collection;
mod counter;
mod item;
mod podcast;
mod track;

pub use collection::{Collection, CollectionKind};
pub use counter::Counter;
pub use item::{AudioItem, ItemKind};
pub use podcast::{Episode, Podcast};
pub use track::Track;
