// Domain layer - canonical data shapes
pub mod air_quality;
pub mod dashboard;
pub mod profile;
pub mod sample;
