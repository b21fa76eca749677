//! Unveränderliche Positions-Werte auf genau einem Segment.

use glam::Vec2;

use super::TravelDirection;

/// Position auf einer Geraden: linearer Parameter ab dem Start-Node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLocation {
    /// Segment, auf das sich `t` bezieht
    pub segment_id: u64,
    /// Bogenlänge ab dem Start-Node, in `[0, länge]`
    pub t: f32,
    /// Fahrtrichtung relativ zu Start→Ende
    pub direction: TravelDirection,
}

/// Position auf einem Bogen: Winkelparameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveLocation {
    /// Segment, auf das sich `angle` bezieht
    pub segment_id: u64,
    /// Winkel in `[start_angle, end_angle]`, ohne 2π-Wrap-Around
    pub angle: f32,
    /// Fahrtrichtung relativ zum CCW-Sweep
    pub direction: TravelDirection,
}

/// Eine Position-und-Richtung, gebunden an die Parametrisierung eines Segments.
///
/// Locations sind Werte: jede Traversierungs-Operation liefert eine neue
/// Location statt die bestehende zu mutieren.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Location {
    /// Position auf einer Geraden
    Straight(StraightLocation),
    /// Position auf einem Bogen
    Curve(CurveLocation),
}

impl Location {
    /// ID des Segments, an das die Location gebunden ist
    pub fn segment_id(&self) -> u64 {
        match self {
            Location::Straight(loc) => loc.segment_id,
            Location::Curve(loc) => loc.segment_id,
        }
    }

    /// Fahrtrichtung der Location
    pub fn direction(&self) -> TravelDirection {
        match self {
            Location::Straight(loc) => loc.direction,
            Location::Curve(loc) => loc.direction,
        }
    }
}

/// Weltraum-Lage an einer Location: alles, was ein Renderer pro Tick braucht.
///
/// Heading und Slope sind Winkel in Radiant; Heading wird nicht modulo 2π
/// normalisiert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Weltposition in der Gleisebene
    pub position: Vec2,
    /// Tangentenrichtung der Fahrt
    pub heading: f32,
    /// Interpolierte Höhe
    pub elevation: f32,
    /// Steigungswinkel in Fahrtrichtung
    pub slope: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_dispatch_over_both_variants() {
        let straight = Location::Straight(StraightLocation {
            segment_id: 7,
            t: 1.5,
            direction: TravelDirection::Forward,
        });
        let curve = Location::Curve(CurveLocation {
            segment_id: 9,
            angle: 0.25,
            direction: TravelDirection::Reverse,
        });

        assert_eq!(straight.segment_id(), 7);
        assert_eq!(straight.direction(), TravelDirection::Forward);
        assert_eq!(curve.segment_id(), 9);
        assert_eq!(curve.direction(), TravelDirection::Reverse);
    }
}
