use dataverse_schema::{DatasetClient, DataverseError};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Alias used when the caller does not name a connection.
pub const DEFAULT_ALIAS: &str = "default";

/// Shared handle to a dataset collaborator.
pub type SharedClient = Arc<dyn DatasetClient + Send + Sync>;

/// Named dataset collaborators.
///
/// Cloning is cheap and every clone sees the same registry. Nothing is global: the
/// application owns a `Connections` value and passes clients out of it explicitly.
#[derive(Clone, Default)]
pub struct Connections {
    clients: Arc<RwLock<FxHashMap<String, SharedClient>>>,
}

impl Connections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `client` under `alias`, returning the client it replaced.
    pub fn add(&self, alias: impl Into<String>, client: SharedClient) -> Option<SharedClient> {
        let alias = alias.into();
        debug!(%alias, "registering connection");
        self.clients.write().insert(alias, client)
    }

    /// Looks up the client registered under `alias`.
    ///
    /// # Errors
    /// Returns [`DataverseError::ClientConnection`] when no client is registered under
    /// `alias`.
    pub fn get(&self, alias: &str) -> Result<SharedClient, DataverseError> {
        trace!(alias, "resolving connection");
        self.clients.read().get(alias).cloned().ok_or_else(|| {
            DataverseError::connection(
                format!("no connection registered under `{alias}`"),
                "Failed to get client info",
            )
        })
    }

    pub fn remove(&self, alias: &str) -> Option<SharedClient> {
        self.clients.write().remove(alias)
    }

    /// Registered aliases, sorted.
    #[must_use]
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases = self.clients.read().keys().cloned().collect::<Vec<_>>();
        aliases.sort_unstable();
        aliases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.read().is_empty()
    }
}

impl fmt::Debug for Connections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connections").field("aliases", &self.aliases()).finish()
    }
}
