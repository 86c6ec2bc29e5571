//! Connection registry
//!
//! The set of live connections for one audience, backed by `DashMap` for
//! concurrent access. Presence in the registry is what "live" means; the map
//! itself is never handed out.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use super::Connection;
use crate::audience::Audience;

pub struct ConnectionRegistry {
    audience: Audience,
    connections: DashMap<Uuid, Arc<Connection>>,
}

impl ConnectionRegistry {
    #[must_use]
    pub fn new(audience: Audience) -> Self {
        Self {
            audience,
            connections: DashMap::new(),
        }
    }

    #[must_use]
    pub fn new_shared(audience: Audience) -> Arc<Self> {
        Arc::new(Self::new(audience))
    }

    pub fn audience(&self) -> Audience {
        self.audience
    }

    /// Add a connection
    ///
    /// Returns `false` without changing anything if the handle is already
    /// registered or belongs to the other audience.
    pub fn register(&self, connection: &Arc<Connection>) -> bool {
        if connection.audience() != self.audience {
            tracing::warn!(
                connection_id = %connection.id(),
                audience = %self.audience,
                connection_audience = %connection.audience(),
                "Refusing to register connection in the wrong registry"
            );
            return false;
        }

        match self.connections.entry(connection.id()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(connection.clone());
                tracing::debug!(
                    connection_id = %connection.id(),
                    audience = %self.audience,
                    "Connection registered"
                );
                true
            }
        }
    }

    /// Remove a connection; removing an absent handle is a no-op
    pub fn remove(&self, connection: &Connection) -> bool {
        let removed = self.connections.remove(&connection.id()).is_some();
        if removed {
            tracing::debug!(
                connection_id = %connection.id(),
                audience = %self.audience,
                "Connection removed"
            );
        }
        removed
    }

    pub fn contains(&self, connection: &Connection) -> bool {
        self.connections.contains_key(&connection.id())
    }

    /// Handles registered at the time of the call
    pub fn snapshot(&self) -> Vec<Arc<Connection>> {
        self.connections.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("audience", &self.audience)
            .field("connections", &self.connections.len())
            .finish()
    }
}
