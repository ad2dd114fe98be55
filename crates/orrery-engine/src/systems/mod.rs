pub mod orbit;
pub mod picking;
