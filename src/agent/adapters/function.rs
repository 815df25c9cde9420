//! Capability adapter for plain async functions.

use crate::agent::{
    domain::ExecutionContext,
    ports::{Capability, CapabilityResult},
};
use async_trait::async_trait;
use serde::Serialize;
use std::future::Future;
use std::marker::PhantomData;

/// Wraps an async function `(input, context) -> output` as a capability.
///
/// The function receives owned clones of the input and context so the
/// returned future does not borrow from the executor.
///
/// ```
/// use lectern::agent::adapters::FnCapability;
/// use lectern::agent::ports::{Capability, CapabilityOutput};
///
/// let upper = FnCapability::new("upper", |text: String, _context| async move {
///     Ok(CapabilityOutput::new(text.to_uppercase()))
/// });
/// assert_eq!(upper.capability_id(), "upper");
/// ```
pub struct FnCapability<I, O, F> {
    id: String,
    function: F,
    marker: PhantomData<fn(I) -> O>,
}

impl<I, O, F> FnCapability<I, O, F> {
    /// Creates a capability reported under `id`.
    #[must_use]
    pub fn new<Fut>(id: impl Into<String>, function: F) -> Self
    where
        F: Fn(I, Option<ExecutionContext>) -> Fut,
        Fut: Future<Output = CapabilityResult<O>>,
    {
        Self {
            id: id.into(),
            function,
            marker: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, F, Fut> Capability for FnCapability<I, O, F>
where
    I: Serialize + Clone + Send + Sync + 'static,
    O: Send + 'static,
    F: Fn(I, Option<ExecutionContext>) -> Fut + Send + Sync,
    Fut: Future<Output = CapabilityResult<O>> + Send,
{
    type Input = I;
    type Output = O;

    fn capability_id(&self) -> &str {
        &self.id
    }

    async fn call(&self, input: &I, context: Option<&ExecutionContext>) -> CapabilityResult<O> {
        (self.function)(input.clone(), context.cloned()).await
    }
}
