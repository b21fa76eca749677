//! Polymorphes Gleissegment: Gerade oder Bogen.

use std::fmt;

use glam::Vec2;

use super::{
    Curve, Location, Pose, RelativeDirection, SpatialMatch, Straight, TrackError, TrackNode,
};

/// Ergebnis eines lokalen Traversierungs-Schritts auf einem Segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetStep {
    /// Der Offset wurde vollständig innerhalb des Segments konsumiert
    Settled(Location),
    /// Die Segmentgrenze wurde überschritten; die Rest-Distanz wird am
    /// Grenzknoten an das Anschluss-Segment übergeben
    Handoff {
        /// Grenzknoten, über den die Fahrt das Segment verlässt
        node_id: u64,
        /// Bewegungssinn der Fortsetzung relativ zum Grenzknoten
        relative: RelativeDirection,
        /// Verbleibender Offset, Vorzeichen wie der Eingangs-Offset
        remaining: f32,
    },
}

/// Ein befahrbares Gleissegment zwischen zwei Knoten.
///
/// Geschlossene Variantenmenge mit einheitlicher Aufruffläche; jede Variante
/// trägt nur die Felder ihrer eigenen Parametrisierung.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Gerade zwischen zwei Knoten
    Straight(Straight),
    /// Kreisbogen, counterclockwise von Start- nach Endwinkel
    Curve(Curve),
}

impl Segment {
    /// Eindeutige Segment-ID
    pub fn id(&self) -> u64 {
        match self {
            Segment::Straight(s) => s.id,
            Segment::Curve(c) => c.id,
        }
    }

    /// Start-Node des Segments
    pub fn start_node(&self) -> &TrackNode {
        match self {
            Segment::Straight(s) => &s.start,
            Segment::Curve(c) => &c.start,
        }
    }

    /// End-Node des Segments
    pub fn end_node(&self) -> &TrackNode {
        match self {
            Segment::Straight(s) => &s.end,
            Segment::Curve(c) => &c.end,
        }
    }

    /// IDs der beiden Endpunkt-Knoten
    pub fn node_ids(&self) -> [u64; 2] {
        [self.start_node().id, self.end_node().id]
    }

    /// Bogenlänge des Segments
    pub fn length(&self) -> f32 {
        match self {
            Segment::Straight(s) => s.length(),
            Segment::Curve(c) => c.length(),
        }
    }

    /// Location am gegebenen Endpunkt mit dem gewünschten Bewegungssinn
    /// relativ zu diesem Knoten (siehe [`RelativeDirection`]).
    pub fn initial_location(
        &self,
        node_id: u64,
        relative: RelativeDirection,
    ) -> Result<Location, TrackError> {
        match self {
            Segment::Straight(s) => s.initial_location(node_id, relative).map(Location::Straight),
            Segment::Curve(c) => c.initial_location(node_id, relative).map(Location::Curve),
        }
    }

    /// Lokaler Traversierungs-Schritt in der Parametrisierung der Variante.
    ///
    /// Die Location muss von diesem Segment stammen und zur Geometrie-Variante
    /// passen, sonst ist der Parameter bedeutungslos.
    pub fn step_offset(&self, loc: &Location, offset: f32) -> Result<OffsetStep, TrackError> {
        match (self, loc) {
            (Segment::Straight(s), Location::Straight(l)) => s.step_offset(l, offset),
            (Segment::Curve(c), Location::Curve(l)) => c.step_offset(l, offset),
            _ => Err(self.mismatch_error(loc)),
        }
    }

    /// Weltraum-Lage an der gegebenen Location
    pub fn pose_at(&self, loc: &Location) -> Result<Pose, TrackError> {
        match (self, loc) {
            (Segment::Straight(s), Location::Straight(l)) => s.pose_at(l),
            (Segment::Curve(c), Location::Curve(l)) => c.pose_at(l),
            _ => Err(self.mismatch_error(loc)),
        }
    }

    /// Punktfolge entlang der Segmentgeometrie für die Visualisierung.
    ///
    /// Reine Geometrie-Abfrage ohne Traversierungszustand: eine Gerade liefert
    /// ihre zwei Endpunkte, ein Bogen eine feste Winkel-Abtastung.
    pub fn centerline(&self) -> Vec<Vec2> {
        match self {
            Segment::Straight(s) => s.centerline(),
            Segment::Curve(c) => c.centerline(),
        }
    }

    /// Nächstgelegener Gleispunkt auf diesem Segment, als Einsetz-Location.
    ///
    /// Gerade: Lotfußpunkt auf den Parameterbereich geklemmt; Bogen:
    /// radialer Fußpunkt auf den Winkelbereich geklemmt.
    pub fn closest_location(&self, query: Vec2) -> SpatialMatch {
        match self {
            Segment::Straight(s) => s.closest_location(query),
            Segment::Curve(c) => c.closest_location(query),
        }
    }

    pub(crate) fn add_connection(&mut self, node_id: u64, segment_id: u64) {
        match self {
            Segment::Straight(s) => s.add_connection(node_id, segment_id),
            Segment::Curve(c) => c.add_connection(node_id, segment_id),
        }
    }

    /// Anschluss-Segment hinter dem gegebenen Grenzknoten, falls registriert
    pub fn connection_through(&self, node_id: u64) -> Option<u64> {
        match self {
            Segment::Straight(s) => s.connection_through(node_id),
            Segment::Curve(c) => c.connection_through(node_id),
        }
    }

    // ID-Fehler hat Vorrang vor dem Varianten-Fehler
    fn mismatch_error(&self, loc: &Location) -> TrackError {
        if loc.segment_id() != self.id() {
            TrackError::ForeignLocation {
                segment_id: self.id(),
                location_segment_id: loc.segment_id(),
            }
        } else {
            TrackError::LocationKindMismatch {
                segment_id: self.id(),
            }
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Straight(s) => write!(
                f,
                "Straight {}: {} -> {}",
                s.id, s.start, s.end
            ),
            Segment::Curve(c) => write!(
                f,
                "Curve {}: {} -> {} (Zentrum ({}, {}), r={}, Winkel [{}, {}])",
                c.id,
                c.start,
                c.end,
                c.center.x,
                c.center.y,
                c.radius,
                c.start_angle,
                c.end_angle
            ),
        }
    }
}
