//! Provider slots, resolved once at startup.

use std::fmt;
use std::sync::Arc;

use care_core::{Provider, ProviderError, ProviderKind};
use tracing::{info, warn};

/// A provider position in the fallback chain.
///
/// Initialization happens once; a failed initialization is kept as
/// `Unconfigured` and the slot is skipped on every request.
#[derive(Clone)]
pub enum ProviderSlot {
    Ready(Arc<dyn Provider>),
    Unconfigured(String),
}

impl ProviderSlot {
    pub fn ready(provider: impl Provider + 'static) -> Self {
        Self::Ready(Arc::new(provider))
    }

    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self::Unconfigured(reason.into())
    }

    /// Turn the outcome of a provider constructor into a slot, logging it.
    pub fn from_init<P: Provider + 'static>(
        kind: ProviderKind,
        result: Result<P, ProviderError>,
    ) -> Self {
        match result {
            Ok(provider) => {
                info!(slot = %kind, provider = provider.name(), "Provider ready");
                Self::ready(provider)
            }
            Err(e) => {
                warn!(slot = %kind, error = %e, "Provider disabled");
                Self::Unconfigured(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn provider(&self) -> Option<&Arc<dyn Provider>> {
        match self {
            Self::Ready(provider) => Some(provider),
            Self::Unconfigured(_) => None,
        }
    }
}

impl fmt::Debug for ProviderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(provider) => f.debug_tuple("Ready").field(&provider.name()).finish(),
            Self::Unconfigured(reason) => f.debug_tuple("Unconfigured").field(reason).finish(),
        }
    }
}
