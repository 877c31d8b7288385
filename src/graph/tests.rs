use super::*;
use crate::core::error::{Error, TopologyError};
use crate::types::{LineKind, NodeId, NodeKind, TrackKind};
use proptest::prelude::*;

/// M1 = A..F, branch M2 = [G, H] off B
fn sample() -> (Network<&'static str>, crate::types::LineId, crate::types::LineId) {
    let mut network = Network::new();
    let m1 = network.create_line("M1", ["A", "B", "C", "D", "E", "F"]).unwrap();
    let b = network.node_at(m1, 1).unwrap();
    let m2 = network.create_branch("M2", b, ["G", "H"]).unwrap();
    (network, m1, m2)
}

fn id(network: &Network<&'static str>, payload: &str) -> NodeId {
    network.find_node_by_payload(payload).unwrap()
}

#[test]
fn test_create_line_allocates_in_order() {
    let mut network = Network::new();
    let line = network.create_line("M1", ["A", "B", "C"]).unwrap();

    let record = network.line(line).unwrap();
    assert_eq!(record.name, "M1");
    assert_eq!(record.kind, LineKind::Main);
    assert_eq!(record.label, "blue");
    assert_eq!(record.len(), 3);
    for (position, payload) in ["A", "B", "C"].iter().enumerate() {
        let node = network.node_at(line, position).unwrap();
        assert_eq!(network.node(node).unwrap().payload(), payload);
        assert_eq!(network.position(node, line), Some(position));
    }

    assert_eq!(network.edge_count(), 2);
    assert!(network.edges().all(|track| track.kind == TrackKind::Main && track.line == Some(line)));
}

#[test]
fn test_create_line_marks_ends_terminal() {
    let mut network = Network::new();
    let line = network.create_line("M1", ["A", "B", "C"]).unwrap();

    assert_eq!(network.kind(network.node_at(line, 0).unwrap()), Some(NodeKind::Terminal));
    assert_eq!(network.kind(network.node_at(line, 1).unwrap()), Some(NodeKind::Regular));
    assert_eq!(network.kind(network.node_at(line, 2).unwrap()), Some(NodeKind::Terminal));
}

#[test]
fn test_single_station_line_is_terminal() {
    let mut network = Network::new();
    let line = network.create_line("solo", ["A"]).unwrap();
    assert_eq!(network.kind(network.node_at(line, 0).unwrap()), Some(NodeKind::Terminal));
    assert_eq!(network.edge_count(), 0);
}

#[test]
fn test_duplicate_line_rejected_without_changes() {
    let (mut network, _, _) = sample();
    let before = (network.node_count(), network.edge_count(), network.line_count());

    let result = network.create_line("M1", ["X", "Y"]);
    if let Err(Error::Topology(TopologyError::DuplicateLine { name })) = result {
        assert_eq!(name, "M1");
    } else {
        panic!("Expected DuplicateLine error");
    }
    assert_eq!((network.node_count(), network.edge_count(), network.line_count()), before);
    assert_eq!(network.find_node_by_payload("X"), None);
}

#[test]
fn test_empty_line_rejected() {
    let mut network: Network<&str> = Network::new();
    let result = network.create_line("M1", Vec::new());
    assert!(matches!(
        result,
        Err(Error::Topology(TopologyError::EmptyPayload { .. }))
    ));
    assert!(network.is_empty());
    assert!(network.line_by_name("M1").is_none());
}

#[test]
fn test_branch_makes_attachment_junction() {
    let (network, m1, m2) = sample();
    let b = id(&network, "B");

    assert_eq!(network.kind(b), Some(NodeKind::Junction));
    assert_eq!(network.position(b, m1), Some(1));
    assert_eq!(network.position(b, m2), Some(0));

    let branch = network.line(m2).unwrap();
    assert_eq!(branch.kind, LineKind::Branch);
    assert_eq!(branch.attachment(), Some(b));
    assert_eq!(branch.stations, vec![b, id(&network, "G"), id(&network, "H")]);

    assert_eq!(network.kind(id(&network, "G")), Some(NodeKind::Regular));
    assert_eq!(network.kind(id(&network, "H")), Some(NodeKind::Terminal));
}

#[test]
fn test_branch_tracks_chain_from_attachment() {
    let (network, _, m2) = sample();
    let branch_tracks: Vec<_> = network.edges().filter(|track| track.line == Some(m2)).collect();

    assert_eq!(branch_tracks.len(), 2);
    assert!(branch_tracks.iter().all(|track| track.kind == TrackKind::Branch));
    assert!(branch_tracks[0].connects(id(&network, "B"), id(&network, "G")));
    assert!(branch_tracks[1].connects(id(&network, "G"), id(&network, "H")));
}

#[test]
fn test_branch_on_missing_node_rejected() {
    let (mut network, _, _) = sample();
    let before = network.node_count();

    let result = network.create_branch("M3", NodeId::new(99), ["Z"]);
    assert!(matches!(
        result,
        Err(Error::Topology(TopologyError::NodeNotFound { id })) if id == NodeId::new(99)
    ));
    assert_eq!(network.node_count(), before);
    assert!(network.line_by_name("M3").is_none());
}

#[test]
fn test_branch_needs_payloads() {
    let (mut network, _, _) = sample();
    let a = id(&network, "A");
    let result = network.create_branch("M3", a, Vec::new());
    assert!(matches!(result, Err(Error::Topology(TopologyError::EmptyPayload { .. }))));
    assert_eq!(network.kind(a), Some(NodeKind::Terminal));
}

#[test]
fn test_express_marks_endpoints() {
    let (mut network, _, _) = sample();
    let (a, c, f) = (id(&network, "A"), id(&network, "C"), id(&network, "F"));

    let express = network.create_express("X1", a, f).unwrap();
    assert_eq!(network.kind(a), Some(NodeKind::Express));
    assert_eq!(network.kind(f), Some(NodeKind::Express));
    assert_eq!(network.kind(c), Some(NodeKind::Regular));

    let record = network.line(express).unwrap();
    assert_eq!(record.kind, LineKind::Express);
    assert_eq!(record.stations, vec![a, f]);
    let track = network.edges().last().unwrap();
    assert_eq!(track.kind, TrackKind::Express);
    assert!(track.connects(a, f));
}

#[test]
fn test_express_validation() {
    let (mut network, _, _) = sample();
    let a = id(&network, "A");
    let edges = network.edge_count();

    assert!(matches!(
        network.create_express("X1", a, a),
        Err(Error::Topology(TopologyError::SelfLoop { .. }))
    ));
    assert!(matches!(
        network.create_express("X1", a, NodeId::new(42)),
        Err(Error::Topology(TopologyError::NodeNotFound { .. }))
    ));
    assert!(matches!(
        network.create_express("M1", a, id(&network, "F")),
        Err(Error::Topology(TopologyError::DuplicateLine { .. }))
    ));
    assert_eq!(network.edge_count(), edges);
    assert_eq!(network.kind(a), Some(NodeKind::Terminal));
}

#[test]
fn test_express_line_chains_stops() {
    let (mut network, m1, _) = sample();
    let line = network.create_express_line("X", "M1", &[0, 2, 5]).unwrap();

    let stops: Vec<_> = [0, 2, 5].iter().map(|&p| network.node_at(m1, p).unwrap()).collect();
    assert_eq!(network.line(line).unwrap().stations, stops);
    let express: Vec<_> = network.edges().filter(|track| track.kind == TrackKind::Express).collect();
    assert_eq!(express.len(), 2);
    assert!(express[0].connects(stops[0], stops[1]));
    assert!(express[1].connects(stops[1], stops[2]));
    assert!(stops.iter().all(|&stop| network.kind(stop) == Some(NodeKind::Express)));
}

#[test]
fn test_express_line_validation() {
    let (mut network, m1, _) = sample();
    let edges = network.edge_count();

    assert!(matches!(
        network.create_express_line("X", "nope", &[0, 1]),
        Err(Error::Topology(TopologyError::LineNotFound { .. }))
    ));
    assert!(matches!(
        network.create_express_line("X", "M1", &[0, 9]),
        Err(Error::Topology(TopologyError::PositionOutOfRange { line, position: 9, len: 6 })) if line == m1
    ));
    assert!(matches!(
        network.create_express_line("X", "M1", &[3]),
        Err(Error::Topology(TopologyError::InvalidStructure(_)))
    ));
    assert!(matches!(
        network.create_express_line("X", "M1", &[2, 2]),
        Err(Error::Topology(TopologyError::SelfLoop { .. }))
    ));
    assert!(matches!(
        network.create_express_line("X", "M1", &[0, 3, 0]),
        Err(Error::Topology(TopologyError::InvalidStructure(_)))
    ));
    assert_eq!(network.edge_count(), edges);
    assert!(network.line_by_name("X").is_none());
}

#[test]
fn test_loop_keeps_kinds() {
    let (mut network, _, _) = sample();
    let (f, h) = (id(&network, "F"), id(&network, "H"));

    let edge = network.create_loop(f, h).unwrap();
    let track = network.edge(edge).unwrap();
    assert_eq!(track.kind, TrackKind::Loop);
    assert_eq!(track.line, None);
    assert_eq!(network.kind(f), Some(NodeKind::Terminal));
    assert_eq!(network.kind(h), Some(NodeKind::Terminal));

    assert!(matches!(
        network.create_loop(f, f),
        Err(Error::Topology(TopologyError::SelfLoop { .. }))
    ));
}

#[test]
fn test_transfer_marks_both_ends() {
    let (mut network, _, _) = sample();
    let (b, g, e) = (id(&network, "B"), id(&network, "G"), id(&network, "E"));

    network.add_transfer(b, e).unwrap();
    assert_eq!(network.kind(b), Some(NodeKind::Transfer));
    assert_eq!(network.kind(e), Some(NodeKind::Transfer));
    assert_eq!(network.kind(g), Some(NodeKind::Regular));
    assert!(network.edges().any(|track| track.kind == TrackKind::Transfer && track.connects(e, b)));
}

#[test]
fn test_find_node_by_payload_first_created_wins() {
    let mut network = Network::new();
    let first = network.create_line("L1", ["dup", "x"]).unwrap();
    let second = network.create_line("L2", ["y", "dup"]).unwrap();

    let found = network.find_node_by_payload("dup").unwrap();
    assert_eq!(Some(found), network.node_at(first, 0));
    assert_ne!(Some(found), network.node_at(second, 1));
    assert_eq!(network.find_node_by_payload("missing"), None);
}

#[test]
fn test_find_node_by_borrowed_payload() {
    let mut network: Network<String> = Network::new();
    network.create_line("L", vec!["alpha".to_string(), "beta".to_string()]).unwrap();
    assert_eq!(network.find_node_by_payload("beta"), Some(NodeId::new(1)));
}

#[test]
fn test_neighbors_cover_both_directions() {
    let (network, _, _) = sample();
    let b = id(&network, "B");

    let neighbors = network.neighbors(b).unwrap();
    let ids: Vec<_> = neighbors.iter().map(|n| n.node).collect();
    assert_eq!(ids, vec![id(&network, "A"), id(&network, "C"), id(&network, "G")]);
    assert_eq!(neighbors[0].kind, TrackKind::Main);
    assert_eq!(neighbors[2].kind, TrackKind::Branch);
    assert_eq!(neighbors[2].cost, network.costs().branch);

    assert!(matches!(
        network.neighbors(NodeId::new(100)),
        Err(Error::Topology(TopologyError::NodeNotFound { .. }))
    ));
}

#[test]
fn test_append_station_moves_terminal() {
    let (mut network, m1, m2) = sample();
    let f = id(&network, "F");

    let z = network.append_station(m1, "Z").unwrap();
    assert_eq!(network.position(z, m1), Some(6));
    assert_eq!(network.kind(z), Some(NodeKind::Terminal));
    assert_eq!(network.kind(f), Some(NodeKind::Regular));

    let h = id(&network, "H");
    let i = network.append_station(m2, "I").unwrap();
    assert_eq!(network.kind(h), Some(NodeKind::Regular));
    assert_eq!(network.kind(i), Some(NodeKind::Terminal));
    assert_eq!(network.edges().last().unwrap().kind, TrackKind::Branch);
}

#[test]
fn test_append_station_rejects_express_and_unknown_lines() {
    let (mut network, _, _) = sample();
    let express = network.create_express("X", id(&network, "A"), id(&network, "F")).unwrap();

    assert!(matches!(
        network.append_station(express, "Z"),
        Err(Error::Topology(TopologyError::InvalidStructure(_)))
    ));
    assert!(matches!(
        network.append_station(crate::types::LineId::new(40), "Z"),
        Err(Error::Topology(TopologyError::LineNotFound { .. }))
    ));
    assert_eq!(network.find_node_by_payload("Z"), None);
}

#[test]
fn test_append_to_shortest_line() {
    let mut network = Network::new();
    let first = network.append_to_shortest_line("a").unwrap();
    let main = network.line_by_name("main_0").unwrap().id;
    assert_eq!(network.node_at(main, 0), Some(first));

    let long = network.create_line("long", ["l1", "l2", "l3"]).unwrap();
    let second = network.append_to_shortest_line("b").unwrap();
    assert_eq!(network.position(second, main), Some(1));

    let third = network.append_to_shortest_line("c").unwrap();
    assert_eq!(network.position(third, main), Some(2));
    // tie at three stations goes to the earlier line
    let fourth = network.append_to_shortest_line("d").unwrap();
    assert_eq!(network.position(fourth, main), Some(3));
    let fifth = network.append_to_shortest_line("e").unwrap();
    assert_eq!(network.position(fifth, long), Some(3));
}

#[test]
fn test_kind_counts() {
    let (mut network, _, _) = sample();
    network.create_express("X", id(&network, "A"), id(&network, "F")).unwrap();

    let counts = network.kind_counts();
    assert_eq!(counts[&NodeKind::Junction], 1);
    assert_eq!(counts[&NodeKind::Express], 2);
    assert_eq!(counts[&NodeKind::Terminal], 1);
    assert_eq!(counts[&NodeKind::Regular], 4);
    assert_eq!(counts[&NodeKind::Transfer], 0);
    assert_eq!(counts.values().sum::<usize>(), network.node_count());

    let tracks = network.track_counts();
    assert_eq!(tracks[&TrackKind::Main], 5);
    assert_eq!(tracks[&TrackKind::Branch], 2);
    assert_eq!(tracks[&TrackKind::Express], 1);
    assert!(!tracks.contains_key(&TrackKind::Loop));
}

#[test]
fn test_snapshot_json() {
    let (network, _, _) = sample();
    let snapshot = network.snapshot();
    assert_eq!(snapshot.lines.len(), 2);
    assert_eq!(snapshot.tracks.len(), 7);
    assert_eq!(snapshot.stations.len(), 8);
    assert_eq!(snapshot.stations[1].lines.len(), 2);

    let json: serde_json::Value = serde_json::from_str(&network.snapshot_json().unwrap()).unwrap();
    assert_eq!(json["lines"][1]["kind"], "branch");
    assert_eq!(json["stations"][1]["kind"], "junction");
    assert_eq!(json["stations"][1]["payload"], "B");
    assert_eq!(json["tracks"][0]["kind"], "main");
}

#[test]
fn test_custom_costs_applied_to_tracks() {
    let costs = crate::core::config::TrackCosts { main: 7, ..Default::default() };
    let mut network = Network::with_costs(costs);
    network.create_line("L", [1, 2, 3]).unwrap();
    assert!(network.edges().all(|track| track.cost == 7));
}

proptest! {
    #[test]
    fn prop_line_positions_follow_payload_order(payloads in proptest::collection::vec(any::<u16>(), 1..40)) {
        let mut network = Network::new();
        let line = network.create_line("L", payloads.clone()).unwrap();

        let stored: Vec<u16> = (0..payloads.len())
            .map(|position| *network.node(network.node_at(line, position).unwrap()).unwrap().payload())
            .collect();
        prop_assert_eq!(stored, payloads.clone());
        prop_assert_eq!(network.edge_count(), payloads.len() - 1);
        prop_assert_eq!(network.node_at(line, payloads.len()), None);
    }
}
