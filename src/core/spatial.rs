//! Spatial-Index über die abgetastete Gleisgeometrie.
//!
//! Indexiert nicht die Knoten, sondern Stützpunkte entlang der
//! Segment-Mittellinien (Arc-Length-Raster). Eine Weltposition führt damit
//! direkt auf das nächstgelegene Segment; die exakte Einsetz-Location auf
//! dessen Parametrisierung liefert anschließend
//! [`Segment::closest_location`](super::Segment::closest_location).

use glam::Vec2;
use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::{Location, Segment};
use crate::shared::resample_by_distance;

/// Maximaler Stützpunkt-Abstand entlang der Mittellinie.
///
/// Begrenzt den Fehler der Vorauswahl: ein Segment kann nur dann verfehlt
/// werden, wenn ein fremder Stützpunkt näher liegt als der nächste eigene.
const SAMPLE_SPACING: f32 = 2.0;

/// Ergebnis einer Gleispunkt-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Einsetz-Location am nächstgelegenen Gleispunkt (Vorwärtsfahrt)
    pub location: Location,
    /// Euklidische Distanz von der Query-Position zum Gleispunkt
    pub distance: f32,
}

/// Read-only Vorauswahl-Index über allen Segment-Mittellinien.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    /// Segment-ID je Stützpunkt, parallel zur Baum-Reihenfolge
    sample_segments: Vec<u64>,
}

impl SpatialIndex {
    /// Baut den Index aus den übergebenen Segmenten auf.
    pub fn from_segments(segments: &IndexMap<u64, Segment>) -> Self {
        let mut entries: Vec<[f64; 2]> = Vec::new();
        let mut sample_segments: Vec<u64> = Vec::new();

        for segment in segments.values() {
            for point in resample_by_distance(&segment.centerline(), SAMPLE_SPACING) {
                entries.push([point.x as f64, point.y as f64]);
                sample_segments.push(segment.id());
            }
        }

        let tree: KdTree<f64, 2> = (&entries).into();

        Self {
            tree,
            sample_segments,
        }
    }

    /// Findet das Segment mit dem nächstgelegenen Mittellinien-Stützpunkt.
    pub fn nearest_segment(&self, query: Vec2) -> Option<u64> {
        if self.sample_segments.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        self.sample_segments.get(result.item as usize).copied()
    }
}
