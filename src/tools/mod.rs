//! Known external tools: what they consume and produce, and where they live.

pub mod catalog;
pub mod discovery;
pub mod kind;
pub mod registry;

pub use catalog::{ToolSpec, CATALOG};
pub use discovery::ToolOverrides;
pub use kind::{link, ArgLayout, ArtifactKind, Emission, FlagStyle, Link};
pub use registry::{LookupError, ToolDescriptor, ToolRegistry};
