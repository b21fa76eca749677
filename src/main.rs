//! Demo-Binary: baut ein ovales Beispiel-Layout und fährt einen Zug darüber.
//!
//! Die Engine selbst hat keine CLI; das Binary dient als Verdrahtungsbeispiel
//! für Layout-Authoring, Traversierung und Pose-Abfragen.

use anyhow::Result;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use rail_track_engine::{
    Curve, RelativeDirection, Segment, Straight, TrackNetwork, TrackNode, Train,
};

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "rail-track-engine v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let network = build_oval_layout()?;
    println!("{network}");

    // Zug auf der unteren Geraden einsetzen, drei Achsen mit 2.5 m Abstand
    let head = network.initial_location(10, 1, RelativeDirection::AwayFromNode)?;
    let mut train = Train::new(head, 3, 2.5);

    // Erst das Oval einmal vorwärts umrunden, dann ein Stück zurücksetzen
    for tick in 0..20 {
        let offset = if tick < 16 { 9.0 } else { -4.5 };
        train.advance(&network, offset)?;

        let pose = network.pose_of(train.head())?;
        log::info!(
            "Tick {tick:2}: Position ({:7.2}, {:7.2}), Heading {:5.2} rad, Höhe {:4.2}",
            pose.position.x,
            pose.position.y,
            pose.heading,
            pose.elevation
        );

        for (axle, axle_pose) in train.axle_poses(&network)?.iter().enumerate() {
            log::debug!(
                "  Achse {axle}: ({:7.2}, {:7.2})",
                axle_pose.position.x,
                axle_pose.position.y
            );
        }
    }

    // Einsetzen aus einer Weltposition: nächstgelegener Gleispunkt
    if let Some(hit) = network.nearest_location(Vec2::new(20.0, 1.5)) {
        let pose = network.pose_of(&hit.location)?;
        log::info!(
            "Nächster Gleispunkt zu (20, 1.5): Segment {} bei ({:.2}, {:.2}), {:.2} m entfernt",
            hit.location.segment_id(),
            pose.position.x,
            pose.position.y,
            hit.distance
        );
    }

    Ok(())
}

/// Geschlossenes Oval: zwei Geraden, verbunden durch zwei Halbkreise.
///
/// Die untere Gerade liegt auf Höhe 0, die obere auf Höhe 2; die Bögen
/// steigen bzw. fallen entsprechend.
fn build_oval_layout() -> Result<TrackNetwork> {
    let a = TrackNode::new(1, Vec2::new(0.0, 0.0), 0.0);
    let b = TrackNode::new(2, Vec2::new(40.0, 0.0), 0.0);
    let c = TrackNode::new(3, Vec2::new(40.0, 20.0), 2.0);
    let d = TrackNode::new(4, Vec2::new(0.0, 20.0), 2.0);

    let segments = vec![
        Segment::Straight(Straight::new(10, a, b)),
        // Rechter Halbkreis B→C, tangential an beide Geraden
        Segment::Curve(Curve::new(
            11,
            b,
            c,
            Vec2::new(40.0, 10.0),
            10.0,
            3.0 * FRAC_PI_2,
            5.0 * FRAC_PI_2,
        )),
        Segment::Straight(Straight::new(12, c, d)),
        // Linker Halbkreis D→A
        Segment::Curve(Curve::new(
            13,
            d,
            a,
            Vec2::new(0.0, 10.0),
            10.0,
            FRAC_PI_2,
            3.0 * FRAC_PI_2,
        )),
    ];

    let network = TrackNetwork::new(vec![a, b, c, d], segments)?;
    Ok(network)
}
