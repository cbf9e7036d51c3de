// Domain layer: data model and the collaborator ports the engine reads from.

pub mod model;
pub mod ports;
