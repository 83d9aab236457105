//! The in-memory collection and the operations on it.
//!
//! - `store`: both collections and the id counter
//! - `availability`: check-in / check-out
//! - `search`: keyword search over one collection
//! - `factory`: adding new books and movies
//! - `loader`: building a store from CSV sources

pub mod availability;
pub mod factory;
pub mod loader;
pub mod search;
pub mod store;

pub use factory::PendingItem;
pub use loader::{load_collection, load_store, parse_collection};
pub use search::search;
pub use store::CollectionStore;
