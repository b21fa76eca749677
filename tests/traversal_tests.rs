//! Integrationstests für die Offset-Traversierung:
//! - geschlossene Schleife aus Gerade + Halbkreis
//! - Round-Trip- und Stetigkeits-Eigenschaften
//! - Zugkette mit festem Achsabstand

use approx::assert_abs_diff_eq;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

use rail_track_engine::{
    Curve, Location, RelativeDirection, Segment, Straight, TrackError, TrackNetwork, TrackNode,
    Train, TravelDirection,
};

/// Geschlossene Schleife: Gerade A→B auf der x-Achse plus Halbkreis unter
/// der Achse zurück (Zentrum (5, 0), Radius 5, Winkel [π, 2π]).
fn loop_network() -> TrackNetwork {
    let a = TrackNode::new(1, Vec2::new(0.0, 0.0), 0.0);
    let b = TrackNode::new(2, Vec2::new(10.0, 0.0), 0.0);

    TrackNetwork::new(
        vec![a, b],
        vec![
            Segment::Straight(Straight::new(1, a, b)),
            Segment::Curve(Curve::new(2, a, b, Vec2::new(5.0, 0.0), 5.0, PI, TAU)),
        ],
    )
    .expect("Schleife muss sich aufbauen lassen")
}

/// Zwei Geraden mit identischer Steigung: A(h=0) - B(h=1) - C(h=2).
fn graded_chain() -> TrackNetwork {
    let a = TrackNode::new(1, Vec2::new(0.0, 0.0), 0.0);
    let b = TrackNode::new(2, Vec2::new(10.0, 0.0), 1.0);
    let c = TrackNode::new(3, Vec2::new(20.0, 0.0), 2.0);

    TrackNetwork::new(
        vec![a, b, c],
        vec![
            Segment::Straight(Straight::new(1, a, b)),
            Segment::Straight(Straight::new(2, b, c)),
        ],
    )
    .unwrap()
}

fn start_at_a(network: &TrackNetwork) -> Location {
    network
        .initial_location(1, 1, RelativeDirection::AwayFromNode)
        .expect("Einsetzen am Knoten A muss gelingen")
}

/// Headings vergleichen, modulo 2π (eine Runde um die Schleife verschiebt
/// den Winkelparameter um 2π, die Richtung bleibt gleich).
fn assert_heading_eq(actual: f32, expected: f32) {
    let diff = (actual - expected).rem_euclid(TAU);
    assert!(
        diff < 1e-3 || diff > TAU - 1e-3,
        "Heading {actual} weicht von {expected} ab (Differenz {diff})"
    );
}

// ─── Szenario: geschlossene Schleife ─────────────────────────────────────────

#[test]
fn offset_along_the_straight_lands_exactly_on_node_b() {
    let network = loop_network();
    let start = start_at_a(&network);

    let at_b = network.offset_location(&start, 10.0).unwrap();
    match at_b {
        Location::Straight(loc) => {
            assert_eq!(loc.segment_id, 1);
            assert_eq!(loc.t, 10.0, "t muss exakt der Segmentlänge entsprechen");
            assert_eq!(loc.direction, TravelDirection::Forward);
        }
        other => panic!("Location auf der Geraden erwartet, war {other:?}"),
    }
}

#[test]
fn offset_around_the_full_loop_returns_to_node_a() {
    let network = loop_network();
    let start = start_at_a(&network);

    let around = network
        .offset_location(&start, 10.0 + 5.0 * PI)
        .unwrap();

    let pose = network.pose_of(&around).unwrap();
    assert_abs_diff_eq!(pose.position.x, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(pose.position.y, 0.0, epsilon = 1e-4);
}

#[test]
fn crossing_into_the_curve_continues_clockwise() {
    let network = loop_network();
    let start = start_at_a(&network);

    // 2.5 hinter B: auf dem Bogen geht es rückwärts (Winkel fällt ab 2π)
    let on_curve = network.offset_location(&start, 12.5).unwrap();
    match on_curve {
        Location::Curve(loc) => {
            assert_eq!(loc.segment_id, 2);
            assert_eq!(loc.direction, TravelDirection::Reverse);
            assert_abs_diff_eq!(loc.angle, TAU - 0.5, epsilon = 1e-4);
        }
        other => panic!("Location auf dem Bogen erwartet, war {other:?}"),
    }
}

// ─── Round-Trip ──────────────────────────────────────────────────────────────

#[test]
fn offset_and_inverse_offset_cancel_out() {
    let network = loop_network();
    let start = start_at_a(&network);
    let reference = network.pose_of(&start).unwrap();

    for distance in [0.25, 3.7, 12.0, 10.0 + 5.0 * PI + 2.0, -6.3, -17.5] {
        let there = network.offset_location(&start, distance).unwrap();
        let back = network.offset_location(&there, -distance).unwrap();
        let pose = network.pose_of(&back).unwrap();

        assert_abs_diff_eq!(pose.position.x, reference.position.x, epsilon = 1e-3);
        assert_abs_diff_eq!(pose.position.y, reference.position.y, epsilon = 1e-3);
        assert_heading_eq(pose.heading, reference.heading);
        assert_eq!(
            back.direction(),
            start.direction(),
            "Fahrtrichtung muss den Round-Trip überleben (Offset {distance})"
        );
    }
}

#[test]
fn round_trip_also_holds_for_reverse_locations() {
    let network = loop_network();
    let start = network
        .initial_location(2, 2, RelativeDirection::AwayFromNode)
        .unwrap();
    assert_eq!(start.direction(), TravelDirection::Reverse);
    let reference = network.pose_of(&start).unwrap();

    for distance in [1.0, 8.0, -4.0, 5.0 * PI + 3.0] {
        let there = network.offset_location(&start, distance).unwrap();
        let back = network.offset_location(&there, -distance).unwrap();
        let pose = network.pose_of(&back).unwrap();

        assert_abs_diff_eq!(pose.position.x, reference.position.x, epsilon = 1e-3);
        assert_abs_diff_eq!(pose.position.y, reference.position.y, epsilon = 1e-3);
        assert_heading_eq(pose.heading, reference.heading);
        assert_eq!(back.direction(), start.direction());
    }
}

// ─── Stetigkeit an der Segmentgrenze ─────────────────────────────────────────

#[test]
fn position_is_continuous_across_the_shared_node() {
    let network = loop_network();
    let start = start_at_a(&network);

    // Exakt am Knoten anhalten vs. die Grenze um ein Epsilon überschreiten
    let at_node = network.offset_location(&start, 10.0).unwrap();
    let just_past = network.offset_location(&start, 10.0 + 1e-3).unwrap();

    assert_eq!(at_node.segment_id(), 1);
    assert_eq!(just_past.segment_id(), 2, "Grenzüberschreitung muss auf dem Bogen landen");

    let pose_at = network.pose_of(&at_node).unwrap();
    let pose_past = network.pose_of(&just_past).unwrap();

    assert_abs_diff_eq!(pose_at.position.x, pose_past.position.x, epsilon = 1e-2);
    assert_abs_diff_eq!(pose_at.position.y, pose_past.position.y, epsilon = 1e-2);
    assert_abs_diff_eq!(pose_at.elevation, pose_past.elevation, epsilon = 1e-4);
}

#[test]
fn elevation_and_slope_are_continuous_on_a_constant_grade() {
    let network = graded_chain();
    let start = network
        .initial_location(1, 1, RelativeDirection::AwayFromNode)
        .unwrap();

    let at_node = network.offset_location(&start, 10.0).unwrap();
    let just_past = network.offset_location(&start, 10.0 + 1e-3).unwrap();

    let pose_at = network.pose_of(&at_node).unwrap();
    let pose_past = network.pose_of(&just_past).unwrap();

    assert_abs_diff_eq!(pose_at.elevation, 1.0, epsilon = 1e-4);
    assert_abs_diff_eq!(pose_at.elevation, pose_past.elevation, epsilon = 1e-3);
    assert_abs_diff_eq!(pose_at.slope, pose_past.slope, epsilon = 1e-5);
}

// ─── Richtungs-Symmetrie beim Einsetzen ──────────────────────────────────────

#[test]
fn toward_and_away_seeding_yield_mirrored_directions_at_same_position() {
    let network = loop_network();

    for segment_id in [1, 2] {
        for node_id in [1, 2] {
            let toward = network
                .initial_location(segment_id, node_id, RelativeDirection::TowardNode)
                .unwrap();
            let away = network
                .initial_location(segment_id, node_id, RelativeDirection::AwayFromNode)
                .unwrap();

            assert_eq!(
                toward.direction(),
                away.direction().opposite(),
                "Segment {segment_id}, Node {node_id}: Richtungen müssen entgegengesetzt sein"
            );

            let pose_toward = network.pose_of(&toward).unwrap();
            let pose_away = network.pose_of(&away).unwrap();
            assert_abs_diff_eq!(pose_toward.position.x, pose_away.position.x, epsilon = 1e-5);
            assert_abs_diff_eq!(pose_toward.position.y, pose_away.position.y, epsilon = 1e-5);
        }
    }
}

// ─── Bogenlängen-Invariante ──────────────────────────────────────────────────

#[test]
fn curve_length_is_exactly_sweep_times_radius() {
    // Radius als Zweierpotenz, damit die Winkel-Arithmetik exakt bleibt
    let a = TrackNode::new(1, Vec2::new(8.0, 0.0), 0.0);
    let b = TrackNode::new(2, Vec2::new(-8.0, 0.0), 0.0);
    let curve = Curve::new(7, a, b, Vec2::ZERO, 8.0, 0.0, PI);

    assert_eq!(curve.length(), PI * 8.0);

    let start = curve
        .initial_location(1, RelativeDirection::AwayFromNode)
        .unwrap();
    match curve.step_offset(&start, curve.length()).unwrap() {
        rail_track_engine::OffsetStep::Settled(Location::Curve(loc)) => {
            assert_eq!(
                loc.angle, curve.end_angle,
                "Vorfahren um die Bogenlänge muss exakt auf dem Endwinkel landen"
            );
        }
        other => panic!("Settled am Endwinkel erwartet, war {other:?}"),
    }
}

// ─── Zugkette (fester Achsabstand) ───────────────────────────────────────────

#[test]
fn train_keeps_constant_axle_spacing_through_mixed_advances() {
    let network = loop_network();
    let head = network.offset_location(&start_at_a(&network), 5.0).unwrap();
    let mut train = Train::new(head, 4, 2.0);

    for offset in [7.0, -3.0, 12.5, -20.0, 30.0] {
        train.advance(&network, offset).unwrap();

        let axles = train.axle_locations(&network).unwrap();
        let mut leading = *train.head();

        for (i, axle) in axles.iter().enumerate() {
            // Achse um den Abstand vorgeschoben muss die Vorgängerin treffen
            let advanced = network.offset_location(axle, 2.0).unwrap();
            let expected = network.pose_of(&leading).unwrap();
            let actual = network.pose_of(&advanced).unwrap();

            assert_abs_diff_eq!(actual.position.x, expected.position.x, epsilon = 1e-3);
            assert_abs_diff_eq!(
                actual.position.y,
                expected.position.y,
                epsilon = 1e-3
            );
            assert!(
                actual.position.distance(expected.position) < 1e-3,
                "Achse {i} hält den Abstand nicht (Offset {offset})"
            );

            leading = *axle;
        }
    }
}

// ─── Fehlerfälle der Traversierung ───────────────────────────────────────────

#[test]
fn zero_length_cycle_hits_the_hop_limit_instead_of_hanging() {
    // Zwei Geraden der Länge 0 zwischen zwei deckungsgleichen Knoten
    let a = TrackNode::new(1, Vec2::new(0.0, 0.0), 0.0);
    let b = TrackNode::new(2, Vec2::new(0.0, 0.0), 0.0);
    let network = TrackNetwork::new(
        vec![a, b],
        vec![
            Segment::Straight(Straight::new(1, a, b)),
            Segment::Straight(Straight::new(2, b, a)),
        ],
    )
    .unwrap();

    let start = network
        .initial_location(1, 1, RelativeDirection::AwayFromNode)
        .unwrap();

    assert_eq!(
        network.offset_location(&start, 1.0).unwrap_err(),
        TrackError::HopLimitExceeded {
            max_hops: rail_track_engine::MAX_SEGMENT_HOPS
        }
    );
}

#[test]
fn curve_location_on_a_straight_segment_is_a_kind_mismatch() {
    let network = loop_network();
    let foreign = Location::Curve(rail_track_engine::CurveLocation {
        segment_id: 1,
        angle: PI,
        direction: TravelDirection::Forward,
    });

    assert_eq!(
        network.offset_location(&foreign, 1.0).unwrap_err(),
        TrackError::LocationKindMismatch { segment_id: 1 }
    );
}
