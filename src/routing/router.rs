//! Cheapest-route search
//!
//! Dijkstra over the network's adjacency view. All costs are non-negative
//! integers, so a station is final the first time it leaves the frontier.
//!
//! Determinism: labels compare as `(cost, hops)`; the frontier pops the
//! least `(cost, hops, node id)`; when two steps reach a station with the
//! same `(cost, hops)`, the one from the lower predecessor id (then lower
//! track id) is kept. Every predecessor that can give a station its final
//! label has a strictly smaller label, so all of them are settled before
//! the station is, and the choice never depends on heap order.

use std::borrow::Borrow;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use tracing::{debug, trace};

use crate::core::config::TrackCosts;
use crate::core::error::{Result, RouteError, TopologyError};
use crate::graph::{Neighbor, Network};
use crate::routing::route::Route;
use crate::types::{EdgeId, NodeId};

/// Best known way to reach a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Label {
    cost: u64,
    hops: u32,
    /// (predecessor, track) or `None` at the source
    via: Option<(NodeId, EdgeId)>,
}

/// Route finder borrowing a network for the duration of its searches
pub struct Router<'a, P> {
    network: &'a Network<P>,
    costs: Option<TrackCosts>,
}

// Not derived: derive would demand `P: Clone`
impl<P> Clone for Router<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Router<'_, P> {}

impl<'a, P> Router<'a, P> {
    /// Search with the cost stored on each track
    pub fn new(network: &'a Network<P>) -> Self {
        Self { network, costs: None }
    }

    /// Search with `costs` in place of the stored track costs
    pub fn with_costs(network: &'a Network<P>, costs: TrackCosts) -> Self {
        Self { network, costs: Some(costs) }
    }

    /// Network being searched
    pub fn network(&self) -> &'a Network<P> {
        self.network
    }

    /// Cheapest station sequence between two payloads
    pub fn find_optimal_route<Q>(&self, source: &Q, target: &Q) -> Result<Vec<NodeId>>
    where
        P: Borrow<Q>,
        Q: PartialEq + Debug + ?Sized,
    {
        self.plan(source, target).map(Route::into_nodes)
    }

    /// Cheapest route between two payloads, with cost and tracks
    pub fn plan<Q>(&self, source: &Q, target: &Q) -> Result<Route>
    where
        P: Borrow<Q>,
        Q: PartialEq + Debug + ?Sized,
    {
        let from = self.resolve(source)?;
        let to = self.resolve(target)?;
        self.plan_between(from, to)
    }

    /// Cheapest route between two station ids
    pub fn plan_between(&self, from: NodeId, to: NodeId) -> Result<Route> {
        for id in [from, to] {
            if self.network.node(id).is_none() {
                return Err(TopologyError::NodeNotFound { id }.into());
            }
        }

        if from == to {
            return Ok(Route { nodes: vec![from], tracks: Vec::new(), cost: 0 });
        }

        let labels = self.search(from, to);
        match labels[to.index()] {
            Some(label) => {
                let route = Self::unwind(&labels, to, label.cost);
                debug!(from = %from, to = %to, cost = route.cost, hops = route.hops(), "route found");
                Ok(route)
            }
            None => {
                debug!(from = %from, to = %to, "no route");
                Err(RouteError::NoRoute { from, to }.into())
            }
        }
    }

    fn resolve<Q>(&self, payload: &Q) -> Result<NodeId>
    where
        P: Borrow<Q>,
        Q: PartialEq + Debug + ?Sized,
    {
        self.network
            .find_node_by_payload(payload)
            .ok_or_else(|| RouteError::PayloadNotFound { payload: format!("{:?}", payload) }.into())
    }

    fn step_cost(&self, neighbor: &Neighbor) -> u64 {
        let cost = match &self.costs {
            Some(costs) => costs.cost_of(neighbor.kind),
            None => neighbor.cost,
        };
        u64::from(cost)
    }

    /// Run the search until `to` settles or the component is exhausted
    fn search(&self, from: NodeId, to: NodeId) -> Vec<Option<Label>> {
        let mut labels: Vec<Option<Label>> = vec![None; self.network.node_count()];
        let mut settled = vec![false; self.network.node_count()];
        let mut frontier = BinaryHeap::new();

        labels[from.index()] = Some(Label { cost: 0, hops: 0, via: None });
        frontier.push(Reverse((0u64, 0u32, from)));

        while let Some(Reverse((cost, hops, node))) = frontier.pop() {
            if settled[node.index()] {
                continue;
            }
            settled[node.index()] = true;
            trace!(node = %node, cost, hops, "settled");
            if node == to {
                break;
            }

            for neighbor in self.network.adjacent(node) {
                let next = neighbor.node.index();
                if settled[next] {
                    continue;
                }
                let candidate = Label {
                    cost: cost + self.step_cost(&neighbor),
                    hops: hops + 1,
                    via: Some((node, neighbor.edge)),
                };
                if labels[next].map_or(true, |current| candidate < current) {
                    labels[next] = Some(candidate);
                    frontier.push(Reverse((candidate.cost, candidate.hops, neighbor.node)));
                }
            }
        }
        labels
    }

    /// Walk predecessor links back from `to`
    fn unwind(labels: &[Option<Label>], to: NodeId, cost: u64) -> Route {
        let mut nodes = vec![to];
        let mut tracks = Vec::new();
        let mut cursor = labels[to.index()].and_then(|label| label.via);
        while let Some((prev, edge)) = cursor {
            nodes.push(prev);
            tracks.push(edge);
            cursor = labels[prev.index()].and_then(|label| label.via);
        }
        nodes.reverse();
        tracks.reverse();
        Route { nodes, tracks, cost }
    }
}
