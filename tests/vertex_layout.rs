// Integration tests for vertex resolution on full boards.

use std::collections::HashSet;

use catanviz::board::{Board, HexTile, derive_vertices, vertex_by_id};
use catanviz::types::{BuildingId, BuildingKind, HexType};
use catanviz::{BoardMapping, GameSnapshot, Layout, ResolveInputs, Session, Strategy, resolve_vertices};

fn standard_vertices() -> Vec<catanviz::Vertex> {
    derive_vertices(Board::standard().hexes(), &Layout::default())
}

#[test]
fn standard_board_has_fifty_four_vertices() {
    let vertices = standard_vertices();
    assert_eq!(vertices.len(), 54);

    let keys: HashSet<_> = vertices.iter().map(|v| v.position().rounded_key()).collect();
    assert_eq!(keys.len(), 54);
}

#[test]
fn ids_are_dense_from_one() {
    let ids: Vec<u16> = standard_vertices().iter().map(|v| v.id).collect();
    assert_eq!(ids, (1..=54).collect::<Vec<u16>>());
}

#[test]
fn adjacency_has_one_to_three_distinct_hexes() {
    let vertices = standard_vertices();
    for vertex in &vertices {
        let distinct: HashSet<_> = vertex.adjacent_hexes.iter().collect();
        assert!((1..=3).contains(&vertex.adjacent_hexes.len()), "vertex {}", vertex.id);
        assert_eq!(distinct.len(), vertex.adjacent_hexes.len(), "vertex {}", vertex.id);
    }

    let mut by_count = [0usize; 4];
    for vertex in &vertices {
        by_count[vertex.adjacent_hexes.len()] += 1;
    }
    assert_eq!(by_count, [0, 18, 12, 24]);
}

#[test]
fn every_hex_touches_six_vertices() {
    let vertices = standard_vertices();
    for hex in Board::standard().hexes() {
        let touching = vertices
            .iter()
            .filter(|v| v.adjacent_hexes.contains(&hex.id))
            .count();
        assert_eq!(touching, 6, "hex {}", hex.id);
    }
}

#[test]
fn derivation_is_deterministic() {
    assert_eq!(standard_vertices(), standard_vertices());
}

#[test]
fn numbering_follows_row_bands() {
    let vertices = standard_vertices();
    for a in &vertices {
        for b in &vertices {
            if a.id >= b.id {
                continue;
            }
            if (a.y - b.y).abs() <= 10.0 {
                assert!(a.x < b.x, "{} and {} share a row", a.id, b.id);
            } else {
                assert!(a.y < b.y, "{} should be above {}", a.id, b.id);
            }
        }
    }
}

#[test]
fn two_adjacent_hexes_share_an_edge() {
    let hexes = [
        HexTile::new(1, 0, 0, HexType::Wood, Some(6)),
        HexTile::new(2, 1, 0, HexType::Ore, Some(8)),
    ];
    let vertices = derive_vertices(&hexes, &Layout::default());
    assert_eq!(vertices.len(), 10);
    assert_eq!(vertices.iter().filter(|v| v.adjacent_hexes.len() == 2).count(), 2);
}

#[test]
fn derivation_leaves_input_untouched() {
    let board = Board::standard();
    let before = board.clone();
    let _ = derive_vertices(board.hexes(), &Layout::default());
    assert_eq!(board, before);
}

#[test]
fn no_data_falls_back_to_fixed_grid() {
    let resolution = resolve_vertices(&ResolveInputs::default(), &Layout::default());
    assert_eq!(resolution.source, Strategy::FixedGrid);
    assert_eq!(resolution.vertices.len(), 54);
    let widths: Vec<usize> = (0..6u8)
        .map(|row| {
            resolution
                .vertices
                .iter()
                .filter(|v| v.game_coords.map(|c| c.0) == Some(row))
                .count()
        })
        .collect();
    assert_eq!(widths, vec![7, 9, 11, 11, 9, 7]);
}

#[test]
fn adopted_and_derived_layouts_share_a_shape() {
    let derived = standard_vertices();
    let mapping = BoardMapping::from_json_str(&serde_json::json!({
        "points": derived
            .iter()
            .map(|v| serde_json::json!({
                "id": v.id,
                "x": v.x,
                "y": v.y,
                "adjacent_hexes": v.adjacent_hexes,
            }))
            .collect::<Vec<_>>()
    }).to_string())
    .unwrap();

    let inputs = ResolveInputs {
        mapping: Some(&mapping),
        ..ResolveInputs::default()
    };
    let adopted = resolve_vertices(&inputs, &Layout::default());
    assert_eq!(adopted.source, Strategy::ExternalMapping);
    assert_eq!(adopted.vertices.len(), derived.len());
    for (a, d) in adopted.vertices.iter().zip(&derived) {
        assert_eq!(a.id, d.id);
        assert_eq!(a.adjacent_hexes, d.adjacent_hexes);
        assert!(a.position().distance(d.position()) < 1e-9);
        assert!(a.adjacent_points.is_empty() && a.buildings.is_empty());
    }
}

#[test]
fn session_serializes_vertex_records() {
    let session = Session::new(Layout::default());
    let json = serde_json::to_value(session.vertices()).unwrap();
    let first = &json[0];
    assert_eq!(first["id"], 1);
    assert!(first["adjacent_hexes"].is_array());
    assert_eq!(first["adjacent_points"], serde_json::json!([]));
    assert_eq!(first["buildings"], serde_json::json!([]));
    assert!(first.get("game_coords").is_none());
}

/// A board mapping document as the game server publishes it: hexes carry
/// only their position, points carry the full record, plus counters.
fn server_mapping_document(with_points: bool) -> String {
    let board = Board::standard();
    let points: Vec<_> = if with_points {
        standard_vertices()
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                serde_json::json!({
                    "id": v.id,
                    "x": v.x,
                    "y": v.y,
                    "game_coords": [idx / 11, idx % 11],
                    "adjacent_points": [],
                    "adjacent_hexes": v.adjacent_hexes,
                })
            })
            .collect()
    } else {
        Vec::new()
    };
    serde_json::json!({
        "hexes": board
            .hexes()
            .iter()
            .enumerate()
            .map(|(idx, hex)| serde_json::json!({
                "id": hex.id,
                "q": hex.q,
                "r": hex.r,
                "game_coords": [idx / 5, idx % 5],
            }))
            .collect::<Vec<_>>(),
        "total_points": points.len(),
        "points": points,
        "total_hexes": board.hexes().len(),
    })
    .to_string()
}

#[test]
fn server_mapping_document_is_adopted() {
    let mut session = Session::new(Layout::default());
    session.load_mapping_json(&server_mapping_document(true));
    assert_eq!(session.source(), Strategy::ExternalMapping);
    assert_eq!(session.vertices().len(), 54);
    assert_eq!(session.vertices()[11].game_coords, Some((1, 0)));
}

#[test]
fn server_mapping_hexes_back_up_missing_points() {
    let mapping = BoardMapping::from_json_str(&server_mapping_document(false)).unwrap();
    assert_eq!(mapping.hexes().len(), 19);

    let inputs = ResolveInputs {
        mapping: Some(&mapping),
        ..ResolveInputs::default()
    };
    let resolution = resolve_vertices(&inputs, &Layout::default());
    assert_eq!(resolution.source, Strategy::MappingHexes);
    assert_eq!(resolution.vertices, standard_vertices());
}

#[test]
fn server_push_with_tagged_buildings_attaches_them() {
    let push = serde_json::json!({
        "hexes": [
            {"id": 10, "q": 0, "r": 0, "type": "desert", "number": null, "has_robber": true,
             "position": [2, 2], "axial_coords": [0, 0]},
            {"id": 11, "q": 1, "r": 0, "type": "wood", "number": 9, "has_robber": false,
             "position": [2, 3], "axial_coords": [1, 0]}
        ],
        "settlements": [{"id": "b_12", "vertex": 12, "player": 1}],
        "cities": [{"id": "b_30", "vertex": 30, "player": 2}],
        "roads": [{"id": 1, "from": 12, "to": 13, "player": 1}],
        "players": [{"id": 0, "name": "Player 1", "victory_points": 1, "total_cards": 3,
                     "cards_list": ["Wood"], "dev_cards_list": []}],
        "current_player": 0,
        "current_phase": "ACTION"
    });
    let snapshot = GameSnapshot::from_json_str(&push.to_string()).unwrap();

    let mut session = Session::new(Layout::default());
    session.apply_snapshot(snapshot);

    let settled = vertex_by_id(session.vertices(), 12).unwrap();
    assert_eq!(settled.buildings.len(), 1);
    assert_eq!(settled.buildings[0].id, BuildingId::Text("b_12".to_string()));
    assert_eq!(settled.buildings[0].kind, BuildingKind::Settlement);
    let city = vertex_by_id(session.vertices(), 30).unwrap();
    assert_eq!(city.buildings[0].kind, BuildingKind::City);
    assert_eq!(session.road_segments().len(), 1);
    assert_eq!(session.board().robber_hex().map(|h| h.id), Some(10));
}
