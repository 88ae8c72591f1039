// Small process-wide helpers shared by the simulation layers.

pub mod rng;
