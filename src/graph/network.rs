//! Topology store
//!
//! `Network` owns three arenas (stations, tracks, lines) addressed by dense
//! ids, plus an index from line name to id. Adjacency is the per-station
//! list of incident track ids. The store is append-only: nothing is ever
//! removed, and the only in-place change is the derived station kind.
//!
//! Every construction call validates its whole input before allocating, so
//! a failed call leaves the network exactly as it was.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

use crate::constants::FIRST_LINE_NAME;
use crate::core::config::{Config, TrackCosts};
use crate::core::error::{Result, TopologyError};
use crate::graph::edge::{Neighbor, Track};
use crate::graph::line::Line;
use crate::graph::node::Station;
use crate::types::ids::{next_index, MAX_ARENA_LEN};
use crate::types::{EdgeId, LineId, LineKind, NodeId, NodeKind, TrackKind};

/// Typed transit graph of payload-carrying stations
#[derive(Debug, Clone)]
pub struct Network<P> {
    stations: Vec<Station<P>>,
    tracks: Vec<Track>,
    lines: Vec<Line>,
    line_names: HashMap<String, LineId>,
    costs: TrackCosts,
}

impl<P> Network<P> {
    /// Create an empty network with default track costs
    pub fn new() -> Self {
        Self::with_costs(TrackCosts::default())
    }

    /// Create an empty network whose tracks take their cost from `costs`
    pub fn with_costs(costs: TrackCosts) -> Self {
        Self {
            stations: Vec::new(),
            tracks: Vec::new(),
            lines: Vec::new(),
            line_names: HashMap::new(),
            costs,
        }
    }

    /// Create an empty network from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::with_costs(config.costs)
    }

    /// Track costs applied at construction
    pub fn costs(&self) -> &TrackCosts {
        &self.costs
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Create a main line of fresh stations, one per payload, in order.
    ///
    /// Consecutive stations are joined by main tracks.
    pub fn create_line<I>(&mut self, name: impl Into<String>, payloads: I) -> Result<LineId>
    where
        I: IntoIterator<Item = P>,
    {
        self.create_line_labeled(name, LineKind::Main.default_label(), payloads)
    }

    /// Create a main line with an explicit display label
    pub fn create_line_labeled<I>(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        payloads: I,
    ) -> Result<LineId>
    where
        I: IntoIterator<Item = P>,
    {
        let name = name.into();
        let payloads: Vec<P> = payloads.into_iter().collect();
        self.check_unused_name(&name)?;
        if payloads.is_empty() {
            return Err(TopologyError::EmptyPayload { name }.into());
        }
        self.check_capacity(payloads.len(), payloads.len() - 1, 1)?;

        let line = self.next_line_id();
        let members = self.chain_new_stations(line, None, payloads, TrackKind::Main);
        debug!(line = %line, name = %name, stations = members.len(), "created main line");
        self.push_line(line, name, LineKind::Main, label.into(), members);
        Ok(line)
    }

    /// Graft a branch line onto an existing station.
    ///
    /// The attachment station becomes position 0 of the branch and a
    /// junction; each payload gets a fresh station chained by branch tracks.
    pub fn create_branch<I>(&mut self, name: impl Into<String>, attachment: NodeId, payloads: I) -> Result<LineId>
    where
        I: IntoIterator<Item = P>,
    {
        self.create_branch_labeled(name, LineKind::Branch.default_label(), attachment, payloads)
    }

    /// Graft a branch line with an explicit display label
    pub fn create_branch_labeled<I>(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        attachment: NodeId,
        payloads: I,
    ) -> Result<LineId>
    where
        I: IntoIterator<Item = P>,
    {
        let name = name.into();
        let payloads: Vec<P> = payloads.into_iter().collect();
        self.check_unused_name(&name)?;
        self.check_node(attachment)?;
        if payloads.is_empty() {
            return Err(TopologyError::EmptyPayload { name }.into());
        }
        self.check_capacity(payloads.len(), payloads.len(), 1)?;

        let line = self.next_line_id();
        let members = self.chain_new_stations(line, Some(attachment), payloads, TrackKind::Branch);
        debug!(line = %line, name = %name, attachment = %attachment, stations = members.len(), "created branch line");
        self.push_line(line, name, LineKind::Branch, label.into(), members);
        Ok(line)
    }

    /// Join two existing stations with a single express track.
    ///
    /// Records a two-stop express line named `name`. Stations between the
    /// endpoints on other lines stay reachable only over their own tracks.
    pub fn create_express(&mut self, name: impl Into<String>, from: NodeId, to: NodeId) -> Result<LineId> {
        let name = name.into();
        self.check_unused_name(&name)?;
        self.check_pair(from, to)?;
        self.check_capacity(0, 1, 1)?;

        let line = self.next_line_id();
        self.join_as_member(from, line, 0);
        self.join_as_member(to, line, 1);
        let edge = self.push_track(from, to, TrackKind::Express, Some(line));
        debug!(line = %line, name = %name, edge = %edge, from = %from, to = %to, "created express track");
        self.push_line(line, name, LineKind::Express, LineKind::Express.default_label().to_string(), vec![from, to]);
        Ok(line)
    }

    /// Build a multi-stop express line over positions of `base_line`.
    ///
    /// Consecutive stops are joined by express tracks. At least two stops
    /// are required and no stop may repeat.
    pub fn create_express_line(&mut self, name: impl Into<String>, base_line: &str, positions: &[usize]) -> Result<LineId> {
        let name = name.into();
        self.check_unused_name(&name)?;
        let base = self
            .line_by_name(base_line)
            .ok_or_else(|| TopologyError::LineNotFound { name: base_line.to_string() })?;
        if positions.len() < 2 {
            return Err(TopologyError::InvalidStructure(format!(
                "express line {} needs at least two stops, got {}",
                name,
                positions.len()
            ))
            .into());
        }

        let mut stops = Vec::with_capacity(positions.len());
        for &position in positions {
            let stop = base.station_at(position).ok_or(TopologyError::PositionOutOfRange {
                line: base.id,
                position,
                len: base.len(),
            })?;
            if stops.last() == Some(&stop) {
                return Err(TopologyError::SelfLoop { id: stop }.into());
            }
            if stops.contains(&stop) {
                return Err(TopologyError::InvalidStructure(format!(
                    "express line {} visits {} twice",
                    name, stop
                ))
                .into());
            }
            stops.push(stop);
        }
        self.check_capacity(0, stops.len() - 1, 1)?;

        let line = self.next_line_id();
        for (position, &stop) in stops.iter().enumerate() {
            self.join_as_member(stop, line, position);
        }
        for pair in stops.windows(2) {
            self.push_track(pair[0], pair[1], TrackKind::Express, Some(line));
        }
        debug!(line = %line, name = %name, base = base_line, stops = stops.len(), "created express line");
        self.push_line(line, name, LineKind::Express, LineKind::Express.default_label().to_string(), stops);
        Ok(line)
    }

    /// Close a cycle with a loop track between two stations
    pub fn create_loop(&mut self, a: NodeId, b: NodeId) -> Result<EdgeId> {
        self.check_pair(a, b)?;
        self.check_capacity(0, 1, 0)?;

        let edge = self.push_track(a, b, TrackKind::Loop, None);
        self.refresh_kinds(&[a, b]);
        debug!(edge = %edge, a = %a, b = %b, "created loop track");
        Ok(edge)
    }

    /// Mark two stations as the same place with a transfer track.
    ///
    /// Both stations become transfer hubs.
    pub fn add_transfer(&mut self, a: NodeId, b: NodeId) -> Result<EdgeId> {
        self.check_pair(a, b)?;
        self.check_capacity(0, 1, 0)?;

        let edge = self.push_track(a, b, TrackKind::Transfer, None);
        self.refresh_kinds(&[a, b]);
        debug!(edge = %edge, a = %a, b = %b, "created transfer track");
        Ok(edge)
    }

    /// Extend a main or branch line by one fresh station at its far end
    pub fn append_station(&mut self, line: LineId, payload: P) -> Result<NodeId> {
        let record = self
            .line(line)
            .ok_or_else(|| TopologyError::LineNotFound { name: line.to_string() })?;
        if record.kind == LineKind::Express {
            return Err(TopologyError::InvalidStructure(format!(
                "cannot append a station to express line {}",
                record.name
            ))
            .into());
        }
        self.check_capacity(1, 1, 0)?;

        let kind = record.kind.track_kind();
        let position = record.len();
        let tail = record.last();

        let node = self.push_station(payload);
        self.join_as_member(node, line, position);
        if let Some(tail) = tail {
            self.push_track(tail, node, kind, Some(line));
        }
        self.lines[line.index()].stations.push(node);

        let mut touched = vec![node];
        touched.extend(tail);
        self.refresh_kinds(&touched);
        debug!(line = %line, node = %node, position, "appended station");
        Ok(node)
    }

    /// Append to the main or branch line with the fewest stations.
    ///
    /// Ties go to the earliest created line. An empty network gets a new
    /// main line named `main_0`.
    pub fn append_to_shortest_line(&mut self, payload: P) -> Result<NodeId> {
        let target = self
            .lines
            .iter()
            .filter(|line| line.kind != LineKind::Express)
            .min_by_key(|line| (line.len(), line.id))
            .map(|line| line.id);

        match target {
            Some(line) => self.append_station(line, payload),
            None => {
                let node = NodeId::new(next_index(self.stations.len()));
                self.create_line(FIRST_LINE_NAME, [payload])?;
                Ok(node)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Find the station holding `payload` by linear scan.
    ///
    /// When several stations hold equal payloads the first created wins.
    pub fn find_node_by_payload<Q>(&self, payload: &Q) -> Option<NodeId>
    where
        P: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.stations
            .iter()
            .find(|station| station.payload.borrow() == payload)
            .map(|station| station.id)
    }

    /// Every step out of `node`: one entry per incident track, both
    /// directions, in track creation order
    pub fn neighbors(&self, node: NodeId) -> Result<Vec<Neighbor>> {
        self.check_node(node)?;
        Ok(self.adjacent(node).collect())
    }

    /// Neighbor iterator for the router. Unknown ids yield nothing.
    pub(crate) fn adjacent(&self, node: NodeId) -> impl Iterator<Item = Neighbor> + '_ {
        self.stations
            .get(node.index())
            .into_iter()
            .flat_map(|station| station.tracks.iter())
            .filter_map(move |&edge| {
                let track = &self.tracks[edge.index()];
                track.other(node).map(|other| Neighbor {
                    edge,
                    kind: track.kind,
                    cost: track.cost,
                    node: other,
                })
            })
    }

    /// Station record
    pub fn node(&self, id: NodeId) -> Option<&Station<P>> {
        self.stations.get(id.index())
    }

    /// All stations in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &Station<P>> {
        self.stations.iter()
    }

    /// Derived kind of a station
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(Station::kind)
    }

    /// Line memberships of a station
    pub fn memberships(&self, id: NodeId) -> Option<&BTreeMap<LineId, usize>> {
        self.node(id).map(Station::lines)
    }

    /// Position of a station on a line
    pub fn position(&self, id: NodeId, line: LineId) -> Option<usize> {
        self.node(id).and_then(|station| station.position_on(line))
    }

    /// Station at `position` on `line`
    pub fn node_at(&self, line: LineId, position: usize) -> Option<NodeId> {
        self.line(line).and_then(|line| line.station_at(position))
    }

    /// Track record
    pub fn edge(&self, id: EdgeId) -> Option<&Track> {
        self.tracks.get(id.index())
    }

    /// All tracks in creation order
    pub fn edges(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Line record
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.index())
    }

    /// Line record by name
    pub fn line_by_name(&self, name: &str) -> Option<&Line> {
        self.line_names.get(name).and_then(|&id| self.line(id))
    }

    /// All lines in creation order
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Number of stations
    pub fn node_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of tracks
    pub fn edge_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the network has no stations
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Station count per kind; every kind is present, possibly with zero
    pub fn kind_counts(&self) -> BTreeMap<NodeKind, usize> {
        let mut counts: BTreeMap<NodeKind, usize> = NodeKind::ALL.iter().map(|&kind| (kind, 0)).collect();
        for station in &self.stations {
            *counts.entry(station.kind).or_default() += 1;
        }
        counts
    }

    /// Track count per kind, only kinds that occur
    pub fn track_counts(&self) -> BTreeMap<TrackKind, usize> {
        let mut counts = BTreeMap::new();
        for track in &self.tracks {
            *counts.entry(track.kind).or_default() += 1;
        }
        counts
    }

    // ---------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------

    fn check_unused_name(&self, name: &str) -> Result<()> {
        if self.line_names.contains_key(name) {
            return Err(TopologyError::DuplicateLine { name: name.to_string() }.into());
        }
        Ok(())
    }

    fn check_node(&self, id: NodeId) -> Result<()> {
        if id.index() >= self.stations.len() {
            return Err(TopologyError::NodeNotFound { id }.into());
        }
        Ok(())
    }

    fn check_pair(&self, a: NodeId, b: NodeId) -> Result<()> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(TopologyError::SelfLoop { id: a }.into());
        }
        Ok(())
    }

    fn check_capacity(&self, stations: usize, tracks: usize, lines: usize) -> Result<()> {
        let fits = |len: usize, extra: usize| len.checked_add(extra).is_some_and(|total| total <= MAX_ARENA_LEN);
        if fits(self.stations.len(), stations) && fits(self.tracks.len(), tracks) && fits(self.lines.len(), lines) {
            Ok(())
        } else {
            Err(TopologyError::CapacityExceeded.into())
        }
    }

    // ---------------------------------------------------------------------
    // Allocation (only called after validation)
    // ---------------------------------------------------------------------

    fn next_line_id(&self) -> LineId {
        LineId::new(next_index(self.lines.len()))
    }

    fn push_station(&mut self, payload: P) -> NodeId {
        let id = NodeId::new(next_index(self.stations.len()));
        self.stations.push(Station::new(id, payload));
        id
    }

    fn push_track(&mut self, from: NodeId, to: NodeId, kind: TrackKind, line: Option<LineId>) -> EdgeId {
        let id = EdgeId::new(next_index(self.tracks.len()));
        self.tracks.push(Track {
            id,
            from,
            to,
            kind,
            line,
            cost: self.costs.cost_of(kind),
        });
        self.stations[from.index()].tracks.push(id);
        self.stations[to.index()].tracks.push(id);
        id
    }

    fn join_as_member(&mut self, node: NodeId, line: LineId, position: usize) {
        self.stations[node.index()].lines.insert(line, position);
    }

    /// Allocate one station per payload, chained with `kind` tracks.
    ///
    /// With a `head`, the head is position 0 and the chain hangs off it.
    fn chain_new_stations(&mut self, line: LineId, head: Option<NodeId>, payloads: Vec<P>, kind: TrackKind) -> Vec<NodeId> {
        let mut members = Vec::with_capacity(payloads.len() + 1);
        if let Some(head) = head {
            self.join_as_member(head, line, 0);
            members.push(head);
        }
        for payload in payloads {
            let node = self.push_station(payload);
            self.join_as_member(node, line, members.len());
            if let Some(&prev) = members.last() {
                self.push_track(prev, node, kind, Some(line));
            }
            members.push(node);
        }
        members
    }

    fn push_line(&mut self, id: LineId, name: String, kind: LineKind, label: String, stations: Vec<NodeId>) {
        self.line_names.insert(name.clone(), id);
        self.lines.push(Line {
            id,
            name,
            kind,
            label,
            stations,
        });
        let members = self.lines[id.index()].stations.clone();
        self.refresh_kinds(&members);
    }

    // ---------------------------------------------------------------------
    // Kind derivation
    // ---------------------------------------------------------------------

    /// Recompute the kind of every station in `nodes`
    fn refresh_kinds(&mut self, nodes: &[NodeId]) {
        for &node in nodes {
            let kind = self.derive_kind(node);
            let station = &mut self.stations[node.index()];
            if station.kind != kind {
                trace!(node = %node, from = %station.kind, to = %kind, "station kind changed");
                station.kind = kind;
            }
        }
    }

    /// Derive a station's kind from the structure around it.
    ///
    /// Precedence: transfer track, branch attachment, express track,
    /// membership of two or more lines, terminal position, regular.
    fn derive_kind(&self, node: NodeId) -> NodeKind {
        let station = &self.stations[node.index()];
        let has_track = |kind: TrackKind| {
            station
                .tracks
                .iter()
                .any(|edge| self.tracks[edge.index()].kind == kind)
        };

        if has_track(TrackKind::Transfer) {
            return NodeKind::Transfer;
        }

        if self.memberships_of(station).any(|(line, position)| line.kind == LineKind::Branch && position == 0) {
            return NodeKind::Junction;
        }
        if has_track(TrackKind::Express) {
            return NodeKind::Express;
        }
        if station.lines.len() >= 2 {
            return NodeKind::Transfer;
        }
        if self.memberships_of(station).any(|(line, position)| line.is_terminal_position(position)) {
            return NodeKind::Terminal;
        }
        NodeKind::Regular
    }

    fn memberships_of<'a>(&'a self, station: &'a Station<P>) -> impl Iterator<Item = (&'a Line, usize)> + 'a {
        station
            .lines
            .iter()
            .map(move |(line, &position)| (&self.lines[line.index()], position))
    }
}

impl<P> Default for Network<P> {
    fn default() -> Self {
        Self::new()
    }
}
