// Interface adapters: CLI definitions, ASCII rendering and output DTOs.

pub mod cli;
pub mod protocol;
pub mod render;
