pub mod config;
pub mod controller;
pub mod data;
pub mod render;
pub mod sort;
pub mod storage;
pub mod store;

pub use controller::{Event, ListController};
pub use data::{Category, CategoryFilter, FavoriteIcon, NewRestaurant, Restaurant, SortKey};
pub use render::{Mount, Render, Snapshot};
pub use storage::{MemoryStorage, SqliteStorage, StorageAdapter};
pub use store::Store;
