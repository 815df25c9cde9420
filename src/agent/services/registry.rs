//! Registry of named, versioned capabilities.

use super::RetryingExecutor;
use crate::agent::{
    domain::{AgentDescriptor, AgentName, AgentVersion},
    ports::{Capability, Delay},
};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Shared handle to a type-erased capability.
pub type DynCapability<I, O> = dyn Capability<Input = I, Output = O>;

/// A descriptor together with its capability.
pub struct RegisteredAgent<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: Send + 'static,
{
    descriptor: AgentDescriptor,
    capability: Arc<DynCapability<I, O>>,
}

impl<I, O> RegisteredAgent<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: Send + 'static,
{
    /// Returns the agent descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &AgentDescriptor {
        &self.descriptor
    }

    /// Returns the registered capability.
    #[must_use]
    pub const fn capability(&self) -> &Arc<DynCapability<I, O>> {
        &self.capability
    }

    /// Builds a retrying executor around the registered capability.
    ///
    /// The executor starts with a permissive schema and the default retry
    /// policy; configure both with its builder methods.
    #[must_use]
    pub fn executor<D, K>(
        &self,
        delay: Arc<D>,
        clock: Arc<K>,
    ) -> RetryingExecutor<DynCapability<I, O>, D, K>
    where
        D: Delay,
        K: Clock + Send + Sync,
    {
        RetryingExecutor::new(Arc::clone(&self.capability), delay, clock)
    }
}

impl<I, O> Clone for RegisteredAgent<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            capability: Arc::clone(&self.capability),
        }
    }
}

impl<I, O> fmt::Debug for RegisteredAgent<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredAgent")
            .field("descriptor", &self.descriptor)
            .field("capability_id", &self.capability.capability_id())
            .finish()
    }
}

type VersionTable<I, O> = BTreeMap<AgentVersion, RegisteredAgent<I, O>>;

/// Mapping from `name:version` to registered capabilities.
///
/// Constructed by the application's composition root and passed to the
/// components that need lookup; tests create a fresh registry each.
/// Entries are never removed. Registering an existing key replaces it.
pub struct AgentRegistry<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: Send + 'static,
{
    agents: RwLock<BTreeMap<AgentName, VersionTable<I, O>>>,
}

impl<I, O> Default for AgentRegistry<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: Send + 'static,
{
    fn default() -> Self {
        Self {
            agents: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<I, O> AgentRegistry<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: Send + 'static,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `capability` under the descriptor's `name:version`.
    ///
    /// Returns the entry that was replaced, if the key was already taken.
    pub fn register(
        &self,
        descriptor: AgentDescriptor,
        capability: Arc<DynCapability<I, O>>,
    ) -> Option<RegisteredAgent<I, O>> {
        let key = descriptor.key();
        let mut agents = self.agents.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = agents
            .entry(descriptor.name().clone())
            .or_default()
            .insert(
                descriptor.version().clone(),
                RegisteredAgent {
                    descriptor,
                    capability,
                },
            );
        if replaced.is_some() {
            info!(agent = %key, "replaced registered agent");
        } else {
            debug!(agent = %key, "registered agent");
        }
        replaced
    }

    /// Looks up an agent.
    ///
    /// Without a version, the lexicographically greatest registered version
    /// is returned. Returns `None` when nothing matches, including for names
    /// or versions that fail validation.
    #[must_use]
    pub fn resolve(&self, name: &str, version: Option<&str>) -> Option<RegisteredAgent<I, O>> {
        let agent_name = AgentName::new(name).ok()?;
        let agents = self.agents.read().unwrap_or_else(PoisonError::into_inner);
        let versions = agents.get(&agent_name)?;
        match version {
            Some(raw) => versions.get(&AgentVersion::new(raw).ok()?).cloned(),
            None => versions.values().next_back().cloned(),
        }
    }

    /// Returns every registered descriptor, ordered by name then version.
    #[must_use]
    pub fn list(&self) -> Vec<AgentDescriptor> {
        let agents = self.agents.read().unwrap_or_else(PoisonError::into_inner);
        agents
            .values()
            .flat_map(BTreeMap::values)
            .map(|agent| agent.descriptor.clone())
            .collect()
    }

    /// Returns the number of registered `name:version` keys.
    #[must_use]
    pub fn len(&self) -> usize {
        let agents = self.agents.read().unwrap_or_else(PoisonError::into_inner);
        agents.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
