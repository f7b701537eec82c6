// Dependency injection container

use crate::{Error, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

/// Anything that can be stored in the [`Container`].
pub trait Provider: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Provider for T {}

type ProviderMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Type-keyed registry of shared services.
///
/// Cloning is cheap; clones share the same providers.
#[derive(Clone, Default)]
pub struct Container {
    providers: Arc<RwLock<ProviderMap>>,
}

impl Container {
    pub fn new() -> Self {
        debug!("Creating new DI container");
        Self::default()
    }

    /// Register a provider instance, replacing any previous one of the same type.
    pub fn register<T: Provider>(&self, instance: T) {
        self.register_arc(Arc::new(instance));
    }

    /// Register an already shared provider.
    pub fn register_arc<T: Provider>(&self, instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();

        trace!(provider = type_name, "Acquiring write lock for registration");
        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = providers.insert(TypeId::of::<T>(), instance).is_some();

        debug!(provider = type_name, replaced, "Provider registered in DI container");
    }

    /// Register a provider using a factory function
    pub fn register_factory<T: Provider, F>(&self, factory: F)
    where
        F: FnOnce() -> T,
    {
        debug!(
            provider = std::any::type_name::<T>(),
            "Creating provider from factory"
        );
        self.register(factory());
    }

    /// Resolve a provider by type
    pub fn resolve<T: Provider>(&self) -> Result<Arc<T>> {
        let type_name = std::any::type_name::<T>();

        trace!(provider = type_name, "Attempting to resolve provider");
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);

        let resolved = providers
            .get(&TypeId::of::<T>())
            .and_then(|any| any.clone().downcast::<T>().ok());

        match resolved {
            Some(instance) => {
                debug!(provider = type_name, "Provider resolved successfully");
                Ok(instance)
            }
            None => {
                debug!(provider = type_name, "Provider not found in container");
                Err(Error::ProviderNotFound(type_name.to_string()))
            }
        }
    }

    /// Resolve a provider if one is registered.
    pub fn try_resolve<T: Provider>(&self) -> Option<Arc<T>> {
        self.resolve().ok()
    }

    /// Check if a provider is registered
    pub fn has<T: Provider>(&self) -> bool {
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
        let exists = providers.contains_key(&TypeId::of::<T>());

        trace!(
            provider = std::any::type_name::<T>(),
            exists, "Checked provider existence"
        );
        exists
    }

    pub fn len(&self) -> usize {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all providers
    pub fn clear(&self) {
        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);
        let count = providers.len();
        providers.clear();

        debug!(provider_count = count, "Cleared all providers from container");
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("providers", &self.len())
            .finish()
    }
}
