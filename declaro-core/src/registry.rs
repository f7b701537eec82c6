//! Endpoint configuration registry.
//!
//! The registry maps each response type to the endpoint configurations
//! declared for it, at most one per verb. It is assembled once at startup with
//! [`EndpointRegistryBuilder`] and then shared read-only, usually as an
//! `Arc<EndpointRegistry>` handed to the HTTP service.
//!
//! ```
//! use declaro_core::{request_arguments, EndpointConfig, EndpointRegistry, HttpVerb};
//!
//! struct WeatherResponse;
//! struct WeatherRequest {
//!     city: String,
//!     date: String,
//! }
//! request_arguments!(WeatherRequest { 0 => city, 1 => date });
//!
//! let registry = EndpointRegistry::builder()
//!     .register::<WeatherResponse>(EndpointConfig::default_for("api/weather"))
//!     .register_with_request::<WeatherResponse, WeatherRequest>(
//!         EndpointConfig::get("api/weather?City={0}&Date={1}"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let get = registry.resolve::<WeatherResponse>(HttpVerb::Get).unwrap();
//! assert_eq!(get.argument_count(), 2);
//!
//! // No POST configuration: the default one stands in.
//! let post = registry.resolve::<WeatherResponse>(HttpVerb::Post).unwrap();
//! assert_eq!(post.endpoint, "api/weather");
//! ```

use crate::arguments::RequestArguments;
use crate::manifest::EndpointManifest;
use crate::{EndpointConfig, Error, HttpVerb, Result};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use tracing::debug;

/// Configurations declared for one response type.
#[derive(Debug, Clone)]
struct TypeEndpoints {
    type_name: &'static str,
    configs: Vec<EndpointConfig>,
}

impl TypeEndpoints {
    fn find(&self, verb: HttpVerb) -> Option<&EndpointConfig> {
        self.configs.iter().find(|config| config.verb == verb)
    }
}

/// Read-only lookup table from response type to endpoint configurations.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    types: HashMap<TypeId, TypeEndpoints>,
}

impl EndpointRegistry {
    pub fn builder() -> EndpointRegistryBuilder {
        EndpointRegistryBuilder::default()
    }

    /// Resolve the configuration of `T` for `verb`.
    ///
    /// A verb-specific configuration is merged over the type's default one;
    /// without a verb-specific configuration the default is used as is.
    pub fn resolve<T: 'static>(&self, verb: HttpVerb) -> Result<EndpointConfig> {
        self.resolve_by_id(TypeId::of::<T>(), type_name::<T>(), verb)
    }

    pub fn resolve_by_id(
        &self,
        type_id: TypeId,
        type_name: &'static str,
        verb: HttpVerb,
    ) -> Result<EndpointConfig> {
        let missing = || Error::MissingConfiguration { type_name, verb };
        let endpoints = self.types.get(&type_id).ok_or_else(missing)?;

        let default = endpoints.find(HttpVerb::Any);
        let specific = if verb == HttpVerb::Any {
            None
        } else {
            endpoints.find(verb)
        };

        match (default, specific) {
            (Some(default), Some(specific)) => Ok(EndpointConfig::merge(default, specific)),
            (None, Some(specific)) => Ok(specific.clone()),
            (Some(default), None) => Ok(EndpointConfig::inherit_for(default, verb)),
            (None, None) => Err(missing()),
        }
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered response types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether any registered configuration declares a cache duration.
    pub fn has_cached_endpoints(&self) -> bool {
        self.types
            .values()
            .flat_map(|endpoints| endpoints.configs.iter())
            .any(EndpointConfig::is_cached)
    }

    /// Names of the registered response types, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }
}

/// Collects endpoint configurations and validates them into a registry.
#[derive(Debug, Default)]
pub struct EndpointRegistryBuilder {
    pending: Vec<(TypeId, &'static str, EndpointConfig)>,
}

impl EndpointRegistryBuilder {
    /// Register a configuration for response type `T`.
    ///
    /// Bindings are whatever the configuration itself declares.
    pub fn register<T: 'static>(mut self, config: EndpointConfig) -> Self {
        self.pending
            .push((TypeId::of::<T>(), type_name::<T>(), config));
        self
    }

    /// Register a configuration for response type `T` whose positional
    /// arguments come from request type `R`.
    ///
    /// The bindings of `R` are used unless the configuration declares its own.
    pub fn register_with_request<T: 'static, R: RequestArguments + 'static>(
        self,
        mut config: EndpointConfig,
    ) -> Self {
        if config.bindings.is_empty() {
            config = config.with_bindings(R::argument_bindings());
        }
        if config.request_type.is_none() {
            config.request_type = Some(type_name::<R>());
        }
        self.register::<T>(config)
    }

    /// Register a configuration for a type that is its own request type.
    pub fn register_bound<T: RequestArguments + 'static>(self, config: EndpointConfig) -> Self {
        self.register_with_request::<T, T>(config)
    }

    /// Register every configuration of a named manifest group for `T`.
    pub fn register_manifest<T: 'static>(
        mut self,
        manifest: &EndpointManifest,
        name: &str,
    ) -> Result<Self> {
        for config in manifest.configs(name)? {
            self = self.register::<T>(config);
        }
        Ok(self)
    }

    /// Validate and freeze the collected configurations.
    ///
    /// Fails on a second configuration for the same type and verb, and on
    /// bindings whose indices are not exactly `0..n`.
    pub fn build(self) -> Result<EndpointRegistry> {
        let mut types: HashMap<TypeId, TypeEndpoints> = HashMap::new();

        for (type_id, type_name, config) in self.pending {
            validate_bindings(type_name, &config)?;

            let endpoints = types.entry(type_id).or_insert_with(|| TypeEndpoints {
                type_name,
                configs: Vec::new(),
            });
            if endpoints.find(config.verb).is_some() {
                return Err(Error::DuplicateConfiguration {
                    type_name,
                    verb: config.verb,
                });
            }

            debug!(
                response_type = type_name,
                verb = %config.verb,
                endpoint = %config.endpoint,
                arguments = config.bindings.len(),
                cached = config.is_cached(),
                "Endpoint configuration registered"
            );
            endpoints.configs.push(config);
        }

        debug!(types = types.len(), "Endpoint registry built");
        Ok(EndpointRegistry { types })
    }
}

fn validate_bindings(type_name: &'static str, config: &EndpointConfig) -> Result<()> {
    for (position, binding) in config.bindings.iter().enumerate() {
        if binding.index != position {
            return Err(Error::InvalidBindings {
                type_name,
                reason: format!(
                    "argument '{}' has index {}, expected {} (indices must be unique and start at 0)",
                    binding.property, binding.index, position
                ),
            });
        }
    }
    Ok(())
}
