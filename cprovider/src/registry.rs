//! Provider registry for runtime provider lookup and swapping.
//!
//! Only providers compiled into the binary can be registered; asking for
//! any other id is an `Unavailable` error rather than a runtime probe.
//!
//! ```rust
//! use cprovider::{MockProvider, ProviderId, ProviderRegistry};
//!
//! let mut registry = ProviderRegistry::new();
//! registry.register(MockProvider::new());
//!
//! assert!(registry.contains(ProviderId::Mock));
//! assert!(registry.require(ProviderId::Anthropic).is_err());
//! ```

use std::sync::Arc;

use ccommon::Registry;

use crate::{ModelProvider, ProviderError, ProviderId};

#[derive(Default)]
pub struct ProviderRegistry {
    providers: Registry<ProviderId, Arc<dyn ModelProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P>(&mut self, provider: P)
    where
        P: ModelProvider + 'static,
    {
        self.providers.insert(provider.id(), Arc::new(provider));
    }

    pub fn register_shared(&mut self, provider: Arc<dyn ModelProvider>) {
        self.providers.insert(provider.id(), provider);
    }

    pub fn get(&self, provider_id: ProviderId) -> Option<Arc<dyn ModelProvider>> {
        self.providers.get(&provider_id).cloned()
    }

    pub fn require(
        &self,
        provider_id: ProviderId,
    ) -> Result<Arc<dyn ModelProvider>, ProviderError> {
        self.get(provider_id).ok_or_else(|| {
            ProviderError::unavailable(format!("no provider registered for {provider_id}"))
        })
    }

    pub fn remove(&mut self, provider_id: ProviderId) -> Option<Arc<dyn ModelProvider>> {
        self.providers.remove(&provider_id)
    }

    pub fn contains(&self, provider_id: ProviderId) -> bool {
        self.providers.contains_key(&provider_id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
