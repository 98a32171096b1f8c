mod arc;
mod boundary;
mod component;
mod config;
mod interactions;
mod model;
mod render;
mod selection;
mod simulation;
mod state;
mod types;
mod viewport;

pub use arc::{ArcPath, arc_offset};
pub use boundary::Boundary;
pub use component::ForceGraphCanvas;
pub use config::GraphConfig;
pub use interactions::describe;
pub use model::{Adjacency, GraphModel, Interaction, Species, build_adjacency, degree_of};
pub use selection::{
	EdgeLabel, Focus, Highlight, InfoPanel, InteractionPanel, SelectionController, SpeciesPanel,
};
pub use simulation::{Simulation, TickOutcome};
pub use state::{ForceGraphState, FrameGeometry, GraphEvent, Hit};
pub use types::{GraphData, InteractionRecord, Observations, SpeciesRecord};
pub use viewport::{ViewTransform, fit};
