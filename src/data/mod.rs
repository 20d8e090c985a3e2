//! Runtime data shared between the server and the watcher.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ContentStore                          │
//! │                                                              │
//! │  ┌────────────┐     ┌────────────┐     ┌────────────────┐    │
//! │  │ request 1  │     │ request 2  │     │    watcher     │    │
//! │  └─────┬──────┘     └─────┬──────┘     └───────┬────────┘    │
//! │        ▼                  ▼                    ▼             │
//! │   cached_json()      snapshot()            replace()         │
//! │   (RwLock cache)     (lock-free)      (atomic swap + clear)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod store;

pub use store::ContentStore;
