//! # chef-store
//!
//! Document-store implementations for FoodChef.
//!
//! - [`MongoStore`] — production store over the MongoDB driver (stable API
//!   V1, conditional-write order merge, transactional payment recording)
//! - [`MemoryStore`] — mutex-guarded double for tests and local hacking
//!
//! Both implement [`chef_core::Store`] and are handed to the API layer as an
//! `Arc<dyn Store>`.

pub mod memory;
pub mod mongo;

// Re-exports
pub use memory::MemoryStore;
pub use mongo::MongoStore;
