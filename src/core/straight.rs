//! Gerades Gleissegment zwischen zwei Knoten.

use std::collections::HashMap;
use std::f32::consts::PI;

use glam::Vec2;

use super::segment::OffsetStep;
use super::{
    Location, Pose, RelativeDirection, SpatialMatch, StraightLocation, TrackError, TrackNode,
    TravelDirection,
};
use crate::shared::bearing;

/// Gerade zwischen zwei Knoten, linear parametrisiert über `t ∈ [0, länge]`.
#[derive(Debug, Clone)]
pub struct Straight {
    /// Eindeutige Segment-ID
    pub id: u64,
    /// Start-Node (t = 0)
    pub start: TrackNode,
    /// End-Node (t = länge)
    pub end: TrackNode,
    /// Anschluss-Segmente je Grenzknoten, vom Gleisnetz eingetragen
    connections: HashMap<u64, u64>,
}

impl Straight {
    /// Erstellt eine neue Gerade
    pub fn new(id: u64, start: TrackNode, end: TrackNode) -> Self {
        Self {
            id,
            start,
            end,
            connections: HashMap::new(),
        }
    }

    /// Länge des Segments (euklidischer Abstand der Knoten)
    pub fn length(&self) -> f32 {
        self.start.position.distance(self.end.position)
    }

    /// Richtungswinkel Start→Ende (konstant über das ganze Segment)
    pub fn segment_bearing(&self) -> f32 {
        bearing(self.start.position, self.end.position)
    }

    pub(crate) fn add_connection(&mut self, node_id: u64, segment_id: u64) {
        self.connections.insert(node_id, segment_id);
    }

    /// Anschluss-Segment hinter dem gegebenen Grenzknoten, falls registriert
    pub fn connection_through(&self, node_id: u64) -> Option<u64> {
        self.connections.get(&node_id).copied()
    }

    /// Location am gegebenen Endpunkt, eingesetzt mit dem gewünschten
    /// Bewegungssinn relativ zu diesem Knoten.
    ///
    /// Am Start-Node bedeutet `TowardNode` Rückwärtsfahrt, am End-Node
    /// Vorwärtsfahrt; die beiden Endpunkte sind spiegelsymmetrisch.
    pub fn initial_location(
        &self,
        node_id: u64,
        relative: RelativeDirection,
    ) -> Result<StraightLocation, TrackError> {
        if node_id == self.start.id {
            let direction = match relative {
                RelativeDirection::TowardNode => TravelDirection::Reverse,
                RelativeDirection::AwayFromNode => TravelDirection::Forward,
            };

            return Ok(StraightLocation {
                segment_id: self.id,
                t: 0.0,
                direction,
            });
        }

        if node_id == self.end.id {
            let direction = match relative {
                RelativeDirection::TowardNode => TravelDirection::Forward,
                RelativeDirection::AwayFromNode => TravelDirection::Reverse,
            };

            return Ok(StraightLocation {
                segment_id: self.id,
                t: self.length(),
                direction,
            });
        }

        Err(TrackError::NodeNotOnSegment {
            segment_id: self.id,
            node_id,
        })
    }

    /// Lokaler Traversierungs-Schritt: wendet den signierten Offset auf den
    /// linearen Parameter an.
    ///
    /// Verlässt der neue Parameter das Segment, wird die Rest-Distanz am
    /// Grenzknoten übergeben; `remaining` behält dabei das Vorzeichen des
    /// Eingangs-Offsets, so dass Richtung und Bewegungssinn über die Grenze
    /// hinweg konsistent bleiben.
    pub fn step_offset(
        &self,
        loc: &StraightLocation,
        offset: f32,
    ) -> Result<OffsetStep, TrackError> {
        // Offsets sind nur relativ zur Parametrisierung dieses Segments sinnvoll
        if loc.segment_id != self.id {
            return Err(TrackError::ForeignLocation {
                segment_id: self.id,
                location_segment_id: loc.segment_id,
            });
        }

        let length = self.length();
        let new_t = match loc.direction {
            TravelDirection::Forward => loc.t + offset,
            TravelDirection::Reverse => loc.t - offset,
        };

        if new_t < 0.0 {
            let (relative, remaining) = match loc.direction {
                TravelDirection::Forward => (RelativeDirection::TowardNode, new_t),
                TravelDirection::Reverse => (RelativeDirection::AwayFromNode, offset - loc.t),
            };

            return Ok(OffsetStep::Handoff {
                node_id: self.start.id,
                relative,
                remaining,
            });
        }

        if new_t > length {
            let (relative, remaining) = match loc.direction {
                TravelDirection::Forward => (RelativeDirection::AwayFromNode, new_t - length),
                TravelDirection::Reverse => (RelativeDirection::TowardNode, length - new_t),
            };

            return Ok(OffsetStep::Handoff {
                node_id: self.end.id,
                relative,
                remaining,
            });
        }

        Ok(OffsetStep::Settled(Location::Straight(StraightLocation {
            segment_id: self.id,
            t: new_t,
            direction: loc.direction,
        })))
    }

    /// Weltraum-Lage an der gegebenen Location
    pub fn pose_at(&self, loc: &StraightLocation) -> Result<Pose, TrackError> {
        if loc.segment_id != self.id {
            return Err(TrackError::ForeignLocation {
                segment_id: self.id,
                location_segment_id: loc.segment_id,
            });
        }

        let length = self.length();
        let fraction = if length > 0.0 { loc.t / length } else { 0.0 };

        let position = self.start.position.lerp(self.end.position, fraction);
        let elevation = self.start.elevation + (self.end.elevation - self.start.elevation) * fraction;

        let mut heading = self.segment_bearing();
        let mut slope = (self.end.elevation - self.start.elevation).atan2(length);
        if loc.direction == TravelDirection::Reverse {
            heading += PI;
            slope = -slope;
        }

        Ok(Pose {
            position,
            heading,
            elevation,
            slope,
        })
    }

    /// Mittellinie für die Visualisierung: bei einer Geraden die zwei Endpunkte
    pub fn centerline(&self) -> Vec<Vec2> {
        vec![self.start.position, self.end.position]
    }

    /// Lotfußpunkt der Query-Position, auf den Parameterbereich geklemmt.
    ///
    /// Die zurückgegebene Location fährt vorwärts; wer rückwärts einsetzen
    /// will, nimmt die Parametrisierung und dreht die Richtung um.
    pub fn closest_location(&self, query: Vec2) -> SpatialMatch {
        let span = self.end.position - self.start.position;
        let length_sq = span.length_squared();

        let fraction = if length_sq > 0.0 {
            ((query - self.start.position).dot(span) / length_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let position = self.start.position.lerp(self.end.position, fraction);
        let location = StraightLocation {
            segment_id: self.id,
            t: fraction * self.length(),
            direction: TravelDirection::Forward,
        };

        SpatialMatch {
            location: Location::Straight(location),
            distance: query.distance(position),
        }
    }
}
