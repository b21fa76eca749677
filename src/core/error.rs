//! Fehlertypen der Traversierungs-Engine.

use thiserror::Error;

/// Fehler beim Aufbau oder bei der Traversierung eines Gleisnetzes.
///
/// Die strukturellen Varianten zeigen Programmierfehler des Aufrufers an
/// (falsch konstruierte Graphen oder fremde Locations); sie werden sofort
/// gemeldet und haben keinen Recovery-Pfad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackError {
    /// Node ist kein Endpunkt des angesprochenen Segments
    #[error("Node {node_id} ist weder Start noch Ende von Segment {segment_id}")]
    NodeNotOnSegment { segment_id: u64, node_id: u64 },

    /// Location stammt von einem anderen Segment
    #[error("Location gehört zu Segment {location_segment_id}, nicht zu Segment {segment_id}")]
    ForeignLocation {
        segment_id: u64,
        location_segment_id: u64,
    },

    /// Location-Variante passt nicht zur Geometrie des Segments
    #[error("Location-Variante passt nicht zur Geometrie von Segment {segment_id}")]
    LocationKindMismatch { segment_id: u64 },

    /// Segment-ID ist im Gleisnetz nicht bekannt
    #[error("Segment {0} existiert nicht im Gleisnetz")]
    UnknownSegment(u64),

    /// Segment referenziert einen Node, der nicht übergeben wurde
    #[error("Segment {segment_id} referenziert unbekannten Node {node_id}")]
    MissingNode { segment_id: u64, node_id: u64 },

    /// Traversierung erreicht einen Grenzknoten ohne registrierten Anschluss
    #[error("Kein Anschluss-Segment an Node {node_id} von Segment {segment_id}")]
    DeadEnd { segment_id: u64, node_id: u64 },

    /// Hop-Limit überschritten (Zyklus ohne Streckenfortschritt)
    #[error("Offset-Traversierung nach {max_hops} Segmentwechseln abgebrochen")]
    HopLimitExceeded { max_hops: usize },
}
