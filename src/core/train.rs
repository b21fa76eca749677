//! Ein Zug als Kette von Locations mit festem Achsabstand.

use super::{Location, Pose, TrackError, TrackNetwork};

/// Zug mit einer Kopf-Location und nachlaufenden Achsen in festem Abstand.
///
/// Der Zug besitzt nur seinen Kopf; die Achs-Locations werden bei Bedarf
/// durch Rückwärts-Offsets vom Kopf aus berechnet. Dadurch bleibt der
/// Bogenlängen-Abstand zwischen den Achsen unter beliebigen Vorwärts- und
/// Rückwärtsfahrten konstant.
#[derive(Debug, Clone)]
pub struct Train {
    head: Location,
    axle_count: usize,
    axle_spacing: f32,
}

impl Train {
    /// Erstellt einen Zug mit `axle_count` Achsen hinter der Kopf-Location
    pub fn new(head: Location, axle_count: usize, axle_spacing: f32) -> Self {
        Self {
            head,
            axle_count,
            axle_spacing,
        }
    }

    /// Aktuelle Kopf-Location
    pub fn head(&self) -> &Location {
        &self.head
    }

    /// Anzahl der Achsen hinter dem Kopf
    pub fn axle_count(&self) -> usize {
        self.axle_count
    }

    /// Bewegt den Kopf um die signierte Distanz; die Achsen folgen implizit.
    pub fn advance(&mut self, network: &TrackNetwork, offset: f32) -> Result<(), TrackError> {
        self.head = network.offset_location(&self.head, offset)?;
        Ok(())
    }

    /// Locations aller Achsen, vom Kopf aus nach hinten gelaufen.
    pub fn axle_locations(&self, network: &TrackNetwork) -> Result<Vec<Location>, TrackError> {
        let mut locations = Vec::with_capacity(self.axle_count);

        let mut current = self.head;
        for _ in 0..self.axle_count {
            current = network.offset_location(&current, -self.axle_spacing)?;
            locations.push(current);
        }

        Ok(locations)
    }

    /// Weltraum-Lagen aller Achsen, z.B. für das Rigging der Wagenmodelle.
    pub fn axle_poses(&self, network: &TrackNetwork) -> Result<Vec<Pose>, TrackError> {
        self.axle_locations(network)?
            .iter()
            .map(|loc| network.pose_of(loc))
            .collect()
    }
}
