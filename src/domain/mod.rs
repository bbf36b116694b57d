// Domain layer: request/response records and the service port.

pub mod model;
pub mod ports;
