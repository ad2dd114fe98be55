pub mod ephemeris;
pub mod scene_manifest;
