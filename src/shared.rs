//! Shared access to a network across threads
//!
//! One writer at a time, any number of concurrent readers, never both.
//! Mutations hold the write lock for their whole call.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::sync::Arc;
use parking_lot::RwLock;

use crate::core::error::Result;
use crate::graph::Network;
use crate::routing::{Route, Router};
use crate::types::NodeId;

/// Cloneable handle to a lock-guarded network
pub struct SharedNetwork<P> {
    inner: Arc<RwLock<Network<P>>>,
}

impl<P> SharedNetwork<P> {
    /// Wrap a network
    pub fn new(network: Network<P>) -> Self {
        Self { inner: Arc::new(RwLock::new(network)) }
    }

    /// Run a mutation under the write lock
    pub fn write<R>(&self, mutate: impl FnOnce(&mut Network<P>) -> R) -> R {
        let mut guard = self.inner.write();
        mutate(&mut guard)
    }

    /// Run a query under a read lock
    pub fn read<R>(&self, query: impl FnOnce(&Network<P>) -> R) -> R {
        let guard = self.inner.read();
        query(&guard)
    }

    /// Cheapest station sequence between two payloads under a read lock
    pub fn find_optimal_route<Q>(&self, source: &Q, target: &Q) -> Result<Vec<NodeId>>
    where
        P: Borrow<Q>,
        Q: PartialEq + Debug + ?Sized,
    {
        self.read(|network| Router::new(network).find_optimal_route(source, target))
    }

    /// Cheapest route between two payloads under a read lock
    pub fn plan<Q>(&self, source: &Q, target: &Q) -> Result<Route>
    where
        P: Borrow<Q>,
        Q: PartialEq + Debug + ?Sized,
    {
        self.read(|network| Router::new(network).plan(source, target))
    }

    /// Take the network back if this is the last handle
    pub fn try_unwrap(self) -> std::result::Result<Network<P>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<P> Clone for SharedNetwork<P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<P> From<Network<P>> for SharedNetwork<P> {
    fn from(network: Network<P>) -> Self {
        Self::new(network)
    }
}
