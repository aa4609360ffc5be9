// Domain layer: listing model, filter criteria and the provider port.

pub mod criteria;
pub mod model;
pub mod ports;
