//! Engine protocol handling.
//!
//! Parsing and serialization at the engine boundary: text board diagrams,
//! the harness's JSON observation format, and the line command parser used
//! by the main loop.

pub mod diagram;
pub mod observation;
pub mod parser;

pub use diagram::{encode_diagram, parse_diagram, DiagramError};
pub use observation::{
    board_from_flat, encode_observation, parse_observation, Observation, ObservationError,
    ObservationInput,
};
pub use parser::{parse_command, Command};
