//! Core-Domänentypen: Knoten, Segmente, Locations, Gleisnetz, Spatial-Index.

pub mod curve;
pub mod direction;
pub mod error;
pub mod location;
pub mod network;
pub mod node;
pub mod segment;
pub mod spatial;
pub mod straight;
pub mod train;

pub use curve::Curve;
pub use direction::{RelativeDirection, TravelDirection};
pub use error::TrackError;
pub use location::{CurveLocation, Location, Pose, StraightLocation};
pub use network::{TrackNetwork, MAX_SEGMENT_HOPS};
pub use node::TrackNode;
pub use segment::{OffsetStep, Segment};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use straight::Straight;
pub use train::Train;
