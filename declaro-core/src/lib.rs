//! # Declaro Core
//!
//! Endpoint metadata for declarative HTTP bindings.
//!
//! Each data-transfer type is associated with one [`EndpointConfig`] per
//! [`HttpVerb`]: the endpoint template, static headers and authorization, an
//! optional cache duration, positional-argument bindings and an optional
//! unwrap property. Configurations are collected once into an
//! [`EndpointRegistry`] that the dispatch service reads at request time.
//!
//! ## Features
//!
//! - **Default merge**: a type's verb-agnostic configuration fills in what a
//!   verb-specific one leaves unset
//! - **Positional arguments**: request fields feed `{index}` placeholders via
//!   [`RequestArguments`] and the [`request_arguments!`] macro
//! - **Manifests**: endpoint groups loaded from TOML or JSON files
//! - **Container**: a small type-keyed dependency injection container
//! - **Logging**: `tracing-subscriber` setup in [`logging`]
//!
//! ## Quick Start
//!
//! ```
//! use declaro_core::{build_uri, request_arguments, EndpointConfig, EndpointRegistry, HttpVerb};
//! use declaro_core::extract_arguments;
//!
//! struct WeatherResponse;
//! struct WeatherRequest {
//!     city: String,
//!     date: String,
//! }
//! request_arguments!(WeatherRequest { 0 => city, 1 => date });
//!
//! let registry = EndpointRegistry::builder()
//!     .register_with_request::<WeatherResponse, WeatherRequest>(
//!         EndpointConfig::get("api/weather?City={0}&Date={1}").with_cache_time("00:00:03.000"),
//!     )
//!     .build()?;
//!
//! let request = WeatherRequest {
//!     city: "Budapest".into(),
//!     date: "2023-09-22".into(),
//! };
//! let config = registry.resolve::<WeatherResponse>(HttpVerb::Get)?;
//! let arguments = extract_arguments(&request, &config);
//! let uri = build_uri(&config, arguments.as_deref(), &[("District", "13")])?;
//!
//! assert_eq!(uri, "api/weather?City=Budapest&Date=2023-09-22&District=13");
//! # Ok::<(), declaro_core::Error>(())
//! ```

pub mod arguments;
pub mod config;
pub mod container;
pub mod duration;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod registry;
pub mod uri;
pub mod verb;

pub use arguments::{extract_arguments, ArgumentBinding, ArgumentValue, RequestArguments};
pub use config::{Authorization, AuthorizationScheme, EndpointConfig, AUTHORIZATION_HEADER};
pub use container::{Container, Provider};
pub use duration::parse_cache_duration;
pub use error::{Error, Result};
pub use manifest::{EndpointDefinition, EndpointManifest, ManifestFormat};
pub use registry::{EndpointRegistry, EndpointRegistryBuilder};
pub use uri::{append_query, build_uri, format_template};
pub use verb::HttpVerb;
