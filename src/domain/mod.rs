// Domain layer: survey models, command lines and ports. No process or network access here.

pub mod command;
pub mod model;
pub mod ports;
