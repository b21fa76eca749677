//! Reine Geometrie-Funktionen für Kreisbögen und Polylinien.
//!
//! Layer-neutral: kann von `core` und von Konsumenten (z.B. einem Renderer)
//! importiert werden ohne Zirkel-Abhängigkeiten zu erzeugen.

use glam::Vec2;

/// Richtungswinkel (Radiant) der Strecke von `from` nach `to`.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Punkt auf dem Kreis um `center` mit Radius `radius` beim Winkel `angle`.
pub fn arc_point(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + radius * Vec2::from_angle(angle)
}

/// Bogenlänge zwischen `start_angle` und `end_angle`.
///
/// Die Winkel werden nicht modulo 2π normalisiert; `end_angle` muss als
/// `start_angle + sweep` ausgedrückt sein (ggf. > 2π).
pub fn arc_length(radius: f32, start_angle: f32, end_angle: f32) -> f32 {
    (end_angle - start_angle) * radius
}

/// Gleichmäßige Winkel-Abtastung eines Bogens, Endpunkte einschließlich.
///
/// `samples` ist die Anzahl der Winkel-Schritte; das Ergebnis enthält
/// `samples + 1` Punkte.
pub fn sample_arc(
    center: Vec2,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    samples: usize,
) -> Vec<Vec2> {
    let steps = samples.max(1);
    let sweep = end_angle - start_angle;

    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let angle = start_angle + sweep * (i as f32 / steps as f32);
        points.push(arc_point(center, radius, angle));
    }
    points
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Verteilt Punkte gleichmäßig (Arc-Length) entlang einer Polyline.
///
/// Das Ergebnis enthält beide Endpunkte; der Abstand der Zwischenpunkte ist
/// höchstens `max_spacing`.
pub fn resample_by_distance(polyline: &[Vec2], max_spacing: f32) -> Vec<Vec2> {
    if polyline.len() < 2 {
        return polyline.to_vec();
    }

    let total = polyline_length(polyline);
    if total < f32::EPSILON {
        return vec![polyline[0]];
    }

    let segment_count = (total / max_spacing).ceil().max(1.0) as usize;
    let spacing = total / segment_count as f32;

    let mut result = Vec::with_capacity(segment_count + 1);
    result.push(polyline[0]);

    // Polyline-Stück und bereits konsumierte Bogenlänge mitführen
    let mut cursor = 0usize;
    let mut consumed = 0.0f32;

    for step in 1..segment_count {
        let target = step as f32 * spacing;

        while cursor + 2 < polyline.len()
            && consumed + polyline[cursor].distance(polyline[cursor + 1]) < target
        {
            consumed += polyline[cursor].distance(polyline[cursor + 1]);
            cursor += 1;
        }

        let piece_length = polyline[cursor].distance(polyline[cursor + 1]);
        let fraction = if piece_length > f32::EPSILON {
            (target - consumed) / piece_length
        } else {
            0.0
        };

        result.push(polyline[cursor].lerp(polyline[cursor + 1], fraction));
    }

    result.push(polyline[polyline.len() - 1]);
    result
}
