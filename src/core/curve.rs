//! Bogensegment: Kreisbogen zwischen zwei Knoten.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use super::segment::OffsetStep;
use super::{
    CurveLocation, Location, Pose, RelativeDirection, SpatialMatch, TrackError, TrackNode,
    TravelDirection,
};
use crate::shared::{arc_length, arc_point, sample_arc};

/// Anzahl der Winkel-Schritte für die Mittellinien-Abtastung eines Bogens
pub const CURVE_CENTERLINE_STEPS: usize = 100;

/// Kreisbogen, winkel-parametrisiert über `angle ∈ [start_angle, end_angle]`.
///
/// Invarianten (vom Layout-Authoring garantiert):
/// - `radius > 0`
/// - `start_angle < end_angle <= start_angle + 2π`
/// - der Bogen wird immer counterclockwise von `start_angle` nach
///   `end_angle` durchlaufen; der Start-Node liegt beim Startwinkel
///
/// Winkel werden nie modulo 2π normalisiert: `end_angle` ist als
/// `start_angle + sweep` ausgedrückt und darf 2π überschreiten.
#[derive(Debug, Clone)]
pub struct Curve {
    /// Eindeutige Segment-ID
    pub id: u64,
    /// Start-Node (beim Startwinkel)
    pub start: TrackNode,
    /// End-Node (beim Endwinkel)
    pub end: TrackNode,
    /// Kreismittelpunkt
    pub center: Vec2,
    /// Kreisradius
    pub radius: f32,
    /// Startwinkel (Radiant)
    pub start_angle: f32,
    /// Endwinkel (Radiant), immer größer als der Startwinkel
    pub end_angle: f32,
    /// Anschluss-Segmente je Grenzknoten, vom Gleisnetz eingetragen
    connections: HashMap<u64, u64>,
}

impl Curve {
    /// Erstellt einen neuen Bogen
    pub fn new(
        id: u64,
        start: TrackNode,
        end: TrackNode,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    ) -> Self {
        debug_assert!(radius > 0.0, "Bogen {id}: Radius muss positiv sein");
        debug_assert!(
            start_angle < end_angle && end_angle <= start_angle + TAU,
            "Bogen {id}: Winkelbereich verletzt start < end <= start + 2π"
        );

        Self {
            id,
            start,
            end,
            center,
            radius,
            start_angle,
            end_angle,
            connections: HashMap::new(),
        }
    }

    /// Bogenlänge: überstrichener Winkel mal Radius
    pub fn length(&self) -> f32 {
        arc_length(self.radius, self.start_angle, self.end_angle)
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
    /// Gleiches Endpunkt-Mapping wie bei der Geraden: am Start-Node bedeutet
    /// `TowardNode` Rückwärtsfahrt, am End-Node Vorwärtsfahrt.
    pub fn initial_location(
        &self,
        node_id: u64,
        relative: RelativeDirection,
    ) -> Result<CurveLocation, TrackError> {
        if node_id == self.start.id {
            let direction = match relative {
                RelativeDirection::TowardNode => TravelDirection::Reverse,
                RelativeDirection::AwayFromNode => TravelDirection::Forward,
            };

            return Ok(CurveLocation {
                segment_id: self.id,
                angle: self.start_angle,
                direction,
            });
        }

        if node_id == self.end.id {
            let direction = match relative {
                RelativeDirection::TowardNode => TravelDirection::Forward,
                RelativeDirection::AwayFromNode => TravelDirection::Reverse,
            };

            return Ok(CurveLocation {
                segment_id: self.id,
                angle: self.end_angle,
                direction,
            });
        }

        Err(TrackError::NodeNotOnSegment {
            segment_id: self.id,
            node_id,
        })
    }

    /// Lokaler Traversierungs-Schritt: der Offset wird über den Radius in
    /// einen Winkelzuwachs umgerechnet und vorzeichenrichtig angewendet.
    ///
    /// Vorwärtsfahrt läuft counterclockwise (Winkel wächst), Rückwärtsfahrt
    /// clockwise (Winkel fällt). Der Winkel wird direkt gegen die
    /// Segmentgrenzen verglichen, ohne Wrap-Around.
    pub fn step_offset(&self, loc: &CurveLocation, offset: f32) -> Result<OffsetStep, TrackError> {
        if loc.segment_id != self.id {
            return Err(TrackError::ForeignLocation {
                segment_id: self.id,
                location_segment_id: loc.segment_id,
            });
        }

        let offset_angle = offset / self.radius;
        let new_angle = match loc.direction {
            TravelDirection::Forward => loc.angle + offset_angle,
            TravelDirection::Reverse => loc.angle - offset_angle,
        };

        if new_angle < self.start_angle {
            let (relative, remaining_angle) = match loc.direction {
                TravelDirection::Forward => {
                    (RelativeDirection::TowardNode, new_angle - self.start_angle)
                }
                TravelDirection::Reverse => {
                    (RelativeDirection::AwayFromNode, self.start_angle - new_angle)
                }
            };

            return Ok(OffsetStep::Handoff {
                node_id: self.start.id,
                relative,
                remaining: remaining_angle * self.radius,
            });
        }

        if new_angle > self.end_angle {
            let (relative, remaining_angle) = match loc.direction {
                TravelDirection::Forward => {
                    (RelativeDirection::AwayFromNode, new_angle - self.end_angle)
                }
                TravelDirection::Reverse => {
                    (RelativeDirection::TowardNode, self.end_angle - new_angle)
                }
            };

            return Ok(OffsetStep::Handoff {
                node_id: self.end.id,
                relative,
                remaining: remaining_angle * self.radius,
            });
        }

        Ok(OffsetStep::Settled(Location::Curve(CurveLocation {
            segment_id: self.id,
            angle: new_angle,
            direction: loc.direction,
        })))
    }

    /// Weltraum-Lage an der gegebenen Location
    ///
    /// Das Heading ist die Tangentenrichtung der Fahrt: `angle + π/2` bei
    /// Vorwärtsfahrt (CCW), `angle − π/2` bei Rückwärtsfahrt.
    pub fn pose_at(&self, loc: &CurveLocation) -> Result<Pose, TrackError> {
        if loc.segment_id != self.id {
            return Err(TrackError::ForeignLocation {
                segment_id: self.id,
                location_segment_id: loc.segment_id,
            });
        }

        let sweep = self.end_angle - self.start_angle;
        let fraction = if sweep > 0.0 {
            (loc.angle - self.start_angle) / sweep
        } else {
            0.0
        };

        let position = arc_point(self.center, self.radius, loc.angle);
        let elevation = self.start.elevation + (self.end.elevation - self.start.elevation) * fraction;

        let heading = match loc.direction {
            TravelDirection::Forward => loc.angle + FRAC_PI_2,
            TravelDirection::Reverse => loc.angle - FRAC_PI_2,
        };

        let mut slope = (self.end.elevation - self.start.elevation).atan2(self.length());
        if loc.direction == TravelDirection::Reverse {
            slope = -slope;
        }

        Ok(Pose {
            position,
            heading,
            elevation,
            slope,
        })
    }

    /// Mittellinie für die Visualisierung: feste Winkel-Abtastung des Bogens
    pub fn centerline(&self) -> Vec<Vec2> {
        sample_arc(
            self.center,
            self.radius,
            self.start_angle,
            self.end_angle,
            CURVE_CENTERLINE_STEPS,
        )
    }

    /// Radialer Fußpunkt der Query-Position auf dem Bogen, auf den
    /// Winkelbereich geklemmt.
    ///
    /// Der rohe `atan2`-Winkel wird zuerst in das unnormalisierte
    /// Winkelfenster des Bogens gehoben; liegt er hinter dem Sweep, gewinnt
    /// der winkel-nähere Endwinkel. Die zurückgegebene Location fährt
    /// vorwärts.
    pub fn closest_location(&self, query: Vec2) -> SpatialMatch {
        let offset = query - self.center;
        let raw_angle = offset.y.atan2(offset.x);

        let mut angle = self.start_angle + (raw_angle - self.start_angle).rem_euclid(TAU);
        if angle > self.end_angle {
            let past_end = angle - self.end_angle;
            let before_start = self.start_angle + TAU - angle;
            angle = if past_end <= before_start {
                self.end_angle
            } else {
                self.start_angle
            };
        }

        let position = arc_point(self.center, self.radius, angle);
        let location = CurveLocation {
            segment_id: self.id,
            angle,
            direction: TravelDirection::Forward,
        };

        SpatialMatch {
            location: Location::Curve(location),
            distance: query.distance(position),
        }
    }
}
