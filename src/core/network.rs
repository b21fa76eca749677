//! Das Gleisnetz: besitzt alle Knoten und Segmente, baut die Adjazenz auf
//! und ist der alleinige Einstiegspunkt für Offset-Abfragen.

use std::fmt;

use glam::Vec2;
use indexmap::IndexMap;

use super::{
    Location, OffsetStep, Pose, RelativeDirection, Segment, SpatialIndex, SpatialMatch,
    TrackError, TrackNode,
};

/// Obergrenze für Segmentwechsel innerhalb einer einzelnen Offset-Abfrage.
///
/// Real begrenzt `offset / kürzeste Segmentlänge` die Anzahl der Wechsel; die
/// Schranke macht aus einem Zyklus ohne Streckenfortschritt (etwa einem
/// Segment der Länge 0) einen harten Fehler statt einer Endlosschleife.
pub const MAX_SEGMENT_HOPS: usize = 10_000;

/// Container für das gesamte Gleisnetz.
///
/// Nach der Konstruktion ist das Netz unveränderlich; Locations sind Werte
/// und dürfen von beliebig vielen Aufrufern über ein geteiltes `&TrackNetwork`
/// unabhängig voneinander fortgeschrieben werden.
#[derive(Debug, Clone)]
pub struct TrackNetwork {
    /// Alle Knoten, indexiert nach ihrer ID
    nodes: IndexMap<u64, TrackNode>,
    /// Alle Segmente, indexiert nach ihrer ID
    segments: IndexMap<u64, Segment>,
    /// Segment-IDs je Knoten (Adjazenz-Gruppierung)
    segments_by_node: IndexMap<u64, Vec<u64>>,
    /// Persistenter Spatial-Index über der abgetasteten Gleisgeometrie
    spatial_index: SpatialIndex,
}

impl TrackNetwork {
    /// Baut das Gleisnetz aus Knoten- und Segmentlisten auf.
    ///
    /// Doppelte IDs überschreiben stillschweigend (Aufruferfehler, letzter
    /// Eintrag gewinnt). Ein von einem Segment referenzierter, aber nicht
    /// übergebener Knoten ist ein harter Fehler; ein Knoten mit
    /// Anschlussgrad ungleich 2 wird nur als degenerierte Topologie geloggt.
    pub fn new(nodes: Vec<TrackNode>, segments: Vec<Segment>) -> Result<Self, TrackError> {
        let mut node_map: IndexMap<u64, TrackNode> = IndexMap::new();
        for node in nodes {
            node_map.insert(node.id, node);
        }

        let mut segment_map: IndexMap<u64, Segment> = IndexMap::new();
        let mut segments_by_node: IndexMap<u64, Vec<u64>> = IndexMap::new();
        for segment in segments {
            for node_id in segment.node_ids() {
                segments_by_node.entry(node_id).or_default().push(segment.id());
            }
            segment_map.insert(segment.id(), segment);
        }

        for (node_id, adjacent) in &segments_by_node {
            if !node_map.contains_key(node_id) {
                return Err(TrackError::MissingNode {
                    segment_id: adjacent[0],
                    node_id: *node_id,
                });
            }

            if adjacent.len() != 2 {
                log::warn!(
                    "Node {} hat {} Anschlüsse (erwartet: 2), Traversierung über diesen Knoten ist nicht definiert",
                    node_id,
                    adjacent.len()
                );
            }

            // Jedes Paar in beiden Richtungen registrieren; bei Grad >= 3
            // gewinnt je Segment der zuletzt registrierte Partner
            for &a in adjacent {
                for &b in adjacent {
                    if a == b {
                        continue;
                    }
                    if let Some(segment) = segment_map.get_mut(&a) {
                        segment.add_connection(*node_id, b);
                    }
                }
            }
        }

        let spatial_index = SpatialIndex::from_segments(&segment_map);

        Ok(Self {
            nodes: node_map,
            segments: segment_map,
            segments_by_node,
            spatial_index,
        })
    }

    /// Knoten nach ID
    pub fn node(&self, id: u64) -> Option<&TrackNode> {
        self.nodes.get(&id)
    }

    /// Segment nach ID
    pub fn segment(&self, id: u64) -> Result<&Segment, TrackError> {
        self.segments.get(&id).ok_or(TrackError::UnknownSegment(id))
    }

    /// Iterator über alle Knoten (deterministische Reihenfolge)
    pub fn nodes(&self) -> impl Iterator<Item = &TrackNode> {
        self.nodes.values()
    }

    /// Iterator über alle Segmente (deterministische Reihenfolge)
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Gibt die Anzahl der Knoten zurück
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt die Anzahl der Segmente zurück
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Segment-IDs, die den gegebenen Knoten als Endpunkt benutzen
    pub fn segments_at(&self, node_id: u64) -> &[u64] {
        self.segments_by_node
            .get(&node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Setzt eine Location auf dem Segment am gegebenen Knoten ein
    pub fn initial_location(
        &self,
        segment_id: u64,
        node_id: u64,
        relative: RelativeDirection,
    ) -> Result<Location, TrackError> {
        self.segment(segment_id)?.initial_location(node_id, relative)
    }

    /// Schiebt eine Location um die signierte Distanz entlang des Netzes.
    ///
    /// Die Traversierung läuft segmentweise: jeder lokale Schritt konsumiert
    /// den Offset innerhalb des aktuellen Segments oder übergibt die
    /// Rest-Distanz am Grenzknoten an das Anschluss-Segment. Ein Grenzknoten
    /// ohne registrierten Anschluss beendet die Abfrage mit
    /// [`TrackError::DeadEnd`]; nach [`MAX_SEGMENT_HOPS`] Wechseln bricht die
    /// Schleife mit [`TrackError::HopLimitExceeded`] ab.
    pub fn offset_location(
        &self,
        location: &Location,
        offset: f32,
    ) -> Result<Location, TrackError> {
        let mut segment = self.segment(location.segment_id())?;
        let mut current = *location;
        let mut remaining = offset;

        for _ in 0..MAX_SEGMENT_HOPS {
            match segment.step_offset(&current, remaining)? {
                OffsetStep::Settled(new_location) => return Ok(new_location),
                OffsetStep::Handoff {
                    node_id,
                    relative,
                    remaining: rest,
                } => {
                    let next_id =
                        segment
                            .connection_through(node_id)
                            .ok_or(TrackError::DeadEnd {
                                segment_id: segment.id(),
                                node_id,
                            })?;

                    segment = self.segment(next_id)?;
                    current = segment.initial_location(node_id, relative)?;
                    remaining = rest;
                }
            }
        }

        Err(TrackError::HopLimitExceeded {
            max_hops: MAX_SEGMENT_HOPS,
        })
    }

    /// Weltraum-Lage an der gegebenen Location
    pub fn pose_of(&self, location: &Location) -> Result<Pose, TrackError> {
        self.segment(location.segment_id())?.pose_at(location)
    }

    /// Setzt eine Location am nächstgelegenen Gleispunkt zur Weltposition ein.
    ///
    /// Der Spatial-Index wählt das Segment über seine Mittellinien-Stützpunkte
    /// vor, die exakte Parametrisierung kommt aus der Segmentgeometrie.
    pub fn nearest_location(&self, query: Vec2) -> Option<SpatialMatch> {
        let segment_id = self.spatial_index.nearest_segment(query)?;
        let segment = self.segments.get(&segment_id)?;
        Some(segment.closest_location(query))
    }
}

impl fmt::Display for TrackNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Gleisnetz: {} Knoten, {} Segmente",
            self.node_count(),
            self.segment_count()
        )?;

        writeln!(f, "--- Knoten ---")?;
        for node in self.nodes.values() {
            writeln!(f, "{node}")?;
        }

        writeln!(f, "--- Segmente ---")?;
        for segment in self.segments.values() {
            writeln!(f, "{segment}")?;
        }

        Ok(())
    }
}
