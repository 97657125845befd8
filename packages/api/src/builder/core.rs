//! Core `DialerBuilder` structure and build step

use std::fmt;
use std::sync::Arc;

use fastdial_client::{Dialer, DialerConfig, KvStore, ResolverService, Result};

/// Fluent builder for a [`Dialer`].
///
/// Every setter consumes and returns the builder; nothing touches the
/// network or the filesystem until [`DialerBuilder::build`].
#[derive(Clone, Default)]
pub struct DialerBuilder {
    pub(crate) config: DialerConfig,
    pub(crate) parts: Option<Parts>,
}

/// Caller-supplied collaborators replacing the default resolver and stores.
#[derive(Clone)]
pub(crate) struct Parts {
    pub(crate) service: Arc<dyn ResolverService>,
    pub(crate) resolution_store: Arc<dyn KvStore>,
    pub(crate) history_store: Arc<dyn KvStore>,
}

impl DialerBuilder {
    /// Builder starting from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder starting from an existing configuration.
    #[must_use]
    pub fn from_config(config: DialerConfig) -> Self {
        Self { config, parts: None }
    }

    /// Configuration accumulated so far.
    #[must_use]
    pub fn config(&self) -> &DialerConfig {
        &self.config
    }

    /// Replace the resolver service and both stores.
    ///
    /// The built dialer then reads no system files; resolver, hosts-file and
    /// override settings are ignored.
    #[must_use]
    pub fn with_parts(
        mut self,
        service: Arc<dyn ResolverService>,
        resolution_store: Arc<dyn KvStore>,
        history_store: Arc<dyn KvStore>,
    ) -> Self {
        self.parts = Some(Parts {
            service,
            resolution_store,
            history_store,
        });
        self
    }

    /// Build the dialer.
    ///
    /// # Errors
    ///
    /// Propagates `Dialer::new` / `Dialer::with_parts` errors: invalid
    /// configuration, a malformed allow/deny entry or a TLS setup failure.
    pub async fn build(self) -> Result<Dialer> {
        match self.parts {
            Some(parts) => {
                tracing::debug!("Building dialer from supplied parts");
                Dialer::with_parts(self.config, parts.service, parts.resolution_store, parts.history_store)
            }
            None => Dialer::new(self.config).await,
        }
    }
}

impl fmt::Debug for DialerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialerBuilder")
            .field("config", &self.config)
            .field("custom_parts", &self.parts.is_some())
            .finish()
    }
}
