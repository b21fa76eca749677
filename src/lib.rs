//! Gleisnetz-Topologie und Location-Traversierung.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod core;
pub mod shared;

pub use crate::core::{
    Curve, CurveLocation, Location, OffsetStep, Pose, RelativeDirection, Segment, SpatialIndex,
    SpatialMatch, Straight, StraightLocation, TrackError, TrackNetwork, TrackNode, Train,
    TravelDirection, MAX_SEGMENT_HOPS,
};
