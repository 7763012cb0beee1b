// Domain layer: registry models and the catalog port. No dependencies beyond std/serde.

pub mod model;
pub mod ports;
