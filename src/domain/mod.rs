// Domain layer: service descriptor values and the client port used to submit them.

pub mod model;
pub mod ports;
