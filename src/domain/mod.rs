// Domain layer: the resume document and the ports the core depends on.

pub mod model;
pub mod ports;
