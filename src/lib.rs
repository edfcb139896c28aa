//! Input checks and artifact persistence shared by tabular data synthesizers.
//!
//! A concrete synthesizer embeds a [`SynthBase`] and implements
//! [`Synthesizer`]; that gives it input validation against a remembered
//! header and writers for the output table (`.csv`) and for itself (`.p`),
//! both named `<name>_<tag>_<epsilon>eps.<ext>`.

pub mod artifact;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod schema;
pub mod synth;
pub mod table;

pub use artifact::{find_artifacts, ArtifactKind, ArtifactName};
pub use config::SynthConfig;
pub use error::{Result, SynthError};
pub use paths::default_path;
pub use schema::Header;
pub use synth::{load_model, SynthBase, Synthesizer};
pub use table::{read_table, CanonicalTable, TabularInput};
