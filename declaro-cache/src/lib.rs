//! Response cache stores for Declaro.
//!
//! The dispatch service keeps decoded GET and LIST payloads in a
//! [`CacheStore`], keyed by the resolved request URI and expiring after the
//! endpoint's cache duration. [`InMemoryCache`] is the bundled store.
//!
//! # Examples
//!
//! ```
//! use declaro_cache::*;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), CacheError> {
//! let cache = InMemoryCache::new();
//!
//! cache
//!     .set_json(
//!         "api/weather?City=Budapest",
//!         r#"{"celsius":10}"#.to_string(),
//!         Some(Duration::from_secs(3)),
//!     )
//!     .await?;
//!
//! assert!(cache.exists("api/weather?City=Budapest").await?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod helpers;
pub mod memory;
pub mod traits;

pub use error::{CacheError, CacheResult};
pub use memory::InMemoryCache;
pub use traits::CacheStore;
