//! Layer-neutrale Hilfsfunktionen ohne Abhängigkeit auf das Domänenmodell.

pub mod arc_geometry;

pub use arc_geometry::{
    arc_length, arc_point, bearing, polyline_length, resample_by_distance, sample_arc,
};
