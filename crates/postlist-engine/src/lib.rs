//! postlist Engine - the Post Store
//!
//! Orchestrates the remote list service and the Local Cache into one sorted,
//! paginated view:
//! - `PostStore`: fetch, create, paging and sort-order operations
//! - `RemoteService`: the abstract list/create service, with a reqwest-backed
//!   `HttpRemote`
//! - `StoreConfig`: environment-driven configuration

pub mod config;
pub mod errors;
pub mod remote;
pub mod state;
pub mod store;

pub use config::{CacheConfig, StoreConfig};
pub use remote::{HttpRemote, ListQuery, RemotePage, RemoteService};
pub use state::StoreSnapshot;
pub use store::{CreateOutcome, FetchOutcome, PostStore};
