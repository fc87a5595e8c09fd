// Domain layer - Pure types and the snapshot-to-series pipeline
pub mod aggregation;
pub mod annotations;
pub mod calendar;
pub mod entity;
pub mod error;
pub mod format;
pub mod snapshot;
pub mod window;
