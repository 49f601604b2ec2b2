//! Provider registry
//!
//! Maps each task kind to an ordered list of provider ids. The fallback
//! ladder asks the registry for the eligible providers of a task and uses
//! the first two as its primary and secondary rungs.
//!
//! Resolution order:
//!  1. the explicit route for the task kind, if any
//!  2. otherwise the default route
//!  3. otherwise every registered provider, in registration order
//!
//! Ids that are not registered, or whose provider does not support the task
//! kind, are skipped. An empty registry is valid: every task then goes
//! straight to local generation.

use crate::ports::provider::GenerationProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tux_domain::TaskKind;

#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn GenerationProvider>>,
    routes: HashMap<TaskKind, Vec<String>>,
    default_route: Vec<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with no providers; every task is generated locally
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn register(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        // Re-registering an id replaces the earlier provider
        self.providers.retain(|p| p.id() != provider.id());
        self.providers.push(provider);
        self
    }

    pub fn with_route(mut self, kind: TaskKind, ids: Vec<String>) -> Self {
        self.routes.insert(kind, ids);
        self
    }

    pub fn with_default_route(mut self, ids: Vec<String>) -> Self {
        self.default_route = ids;
        self
    }

    fn find(&self, id: &str) -> Option<&Arc<dyn GenerationProvider>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// Eligible providers for a task kind, in ladder order
    pub fn providers_for(&self, kind: TaskKind) -> Vec<Arc<dyn GenerationProvider>> {
        let route = self
            .routes
            .get(&kind)
            .filter(|ids| !ids.is_empty())
            .or_else(|| (!self.default_route.is_empty()).then_some(&self.default_route));

        let candidates: Vec<&Arc<dyn GenerationProvider>> = match route {
            Some(ids) => ids.iter().filter_map(|id| self.find(id)).collect(),
            None => self.providers.iter().collect(),
        };

        let mut eligible: Vec<Arc<dyn GenerationProvider>> = Vec::new();
        for provider in candidates {
            if provider.supports(kind) && !eligible.iter().any(|p| p.id() == provider.id()) {
                eligible.push(Arc::clone(provider));
            }
        }
        eligible
    }

    pub fn provider_ids(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.id().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_ids())
            .field("routes", &self.routes)
            .field("default_route", &self.default_route)
            .finish()
    }
}
