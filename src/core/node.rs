//! Repräsentiert einen Gleisknoten (gemeinsamen Endpunkt von Segmenten).

use std::fmt;

use glam::Vec2;

/// Ein Knotenpunkt mit 2D-Position und Höhe.
///
/// Identität ist die `id`, nicht die strukturelle Gleichheit. IDs werden vom
/// Aufrufer beim Authoring des Layouts vergeben und bleiben danach stabil;
/// Knoten werden nach der Konstruktion nie mutiert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackNode {
    /// Eindeutige Node-ID
    pub id: u64,
    /// Position in der Gleisebene
    pub position: Vec2,
    /// Höhe des Knotens
    pub elevation: f32,
}

impl TrackNode {
    /// Erstellt einen neuen Gleisknoten
    pub fn new(id: u64, position: Vec2, elevation: f32) -> Self {
        Self {
            id,
            position,
            elevation,
        }
    }
}

impl fmt::Display for TrackNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node {}: ({}, {}) h={}",
            self.id, self.position.x, self.position.y, self.elevation
        )
    }
}
