mod cart;
mod engine;
mod error;
mod identity;
pub mod keys;
mod notifications;
mod ports;
mod watcher;

pub use cart::CartStore;
pub use engine::SessionEngine;
pub use error::{CartError, WatchError};
pub use identity::{IdentityListener, IdentityResolver};
pub use notifications::NotificationStore;
pub use ports::StatusFeed;
pub use watcher::StatusWatcher;
