//! Wave Player - Catalog Core
//!
//! Data model and collaborator seams shared by the playback engine and
//! the surrounding command layer:
//! - Catalog types: [`Track`], [`Collection`], [`Podcast`], and the
//!   [`AudioItem`] tagged union over them
//! - Reference-tie counting for deletion guards
//! - Collaborator traits: [`ListenSink`], [`RevenueLedger`], [`Catalog`],
//!   [`NotificationSink`]
//! - In-memory reference implementations: [`MemoryCatalog`],
//!   [`UserAccounts`]
//!
//! The crate is deliberately free of playback logic; the state machine
//! lives in `wave-playback` and talks to this crate through the traits.

mod accounts;
mod catalog;
mod error;
mod traits;
pub mod types;

pub use accounts::{UserAccounts, PREMIUM_CREDIT};
pub use catalog::MemoryCatalog;
pub use error::{CoreError, Result};
pub use traits::{Catalog, ListenSink, NotificationSink, PartId, RevenueLedger};
pub use types::{AudioItem, Collection, CollectionKind, Episode, ItemKind, Podcast, Track};
