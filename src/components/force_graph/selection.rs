//! Click-driven focus and the highlight it produces.
//!
//! A focus is either one species or one interaction. Every transition returns
//! a complete [`Highlight`]: opacities for every species, background disc and
//! interaction, the edge labels to draw, and the info panel content. The
//! presentation layer applies it as-is.

use log::debug;

use super::interactions::describe;
use super::model::GraphModel;
use super::types::Observations;

/// Unit appended to each per-type interaction count.
pub const COUNT_UNIT: &str = "specie";
/// Shown when a species has no interactions.
pub const NO_INTERACTIONS: &str = "Nessuna";

/// What the user clicked last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
	/// A species, by arena index.
	Species(usize),
	/// An interaction, by input index.
	Interaction(usize),
}

/// Type label drawn along an interaction arc.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLabel {
	/// Interaction index.
	pub edge: usize,
	/// Interaction type.
	pub text: String,
}

/// Info panel for a focused species.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesPanel {
	/// Common name.
	pub name: String,
	/// Scientific name.
	pub scientific_name: String,
	/// Portrait URL.
	pub image: String,
	/// Number of distinct species this one interacts with.
	pub connected: usize,
	/// Observation count, `NaN` when malformed.
	pub observations: Observations,
	/// Interaction type and how many interactions of that type touch the
	/// species, in first-seen order.
	pub interactions: Vec<(String, usize)>,
}

impl SpeciesPanel {
	/// One `"{type} {count} specie"` line per type, or `"Nessuna"`.
	pub fn interaction_lines(&self) -> Vec<String> {
		if self.interactions.is_empty() {
			return vec![NO_INTERACTIONS.to_string()];
		}
		self.interactions
			.iter()
			.map(|(kind, count)| format!("{kind} {count} {COUNT_UNIT}"))
			.collect()
	}
}

/// Info panel for a focused interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionPanel {
	/// Subject's common name.
	pub source_name: String,
	/// Subject's portrait.
	pub source_image: String,
	/// Object's common name.
	pub target_name: String,
	/// Object's portrait.
	pub target_image: String,
	/// Interaction type.
	pub kind: String,
	/// Empty for interaction types outside the vocabulary.
	pub description: &'static str,
}

/// Content of the info box.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InfoPanel {
	/// Nothing focused.
	#[default]
	Hidden,
	/// A species is focused.
	Species(SpeciesPanel),
	/// An interaction is focused.
	Interaction(InteractionPanel),
}

impl InfoPanel {
	/// False when hidden.
	pub fn is_visible(&self) -> bool {
		!matches!(self, Self::Hidden)
	}
}

/// Full visual state produced by a focus change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	/// Portrait opacity per species.
	pub species: Vec<f64>,
	/// Background disc opacity per species.
	pub backgrounds: Vec<f64>,
	/// Opacity per interaction.
	pub interactions: Vec<f64>,
	/// Labels to draw.
	pub labels: Vec<EdgeLabel>,
	/// Info box content.
	pub panel: InfoPanel,
}

impl Highlight {
	/// Everything opaque, no labels, panel hidden.
	pub fn idle(model: &GraphModel) -> Self {
		Self {
			species: vec![1.0; model.species.len()],
			backgrounds: vec![1.0; model.species.len()],
			interactions: vec![1.0; model.interactions.len()],
			labels: Vec::new(),
			panel: InfoPanel::Hidden,
		}
	}
}

/// Idle/focused state machine.
pub struct SelectionController {
	focus: Option<Focus>,
	dim: f64,
}

impl SelectionController {
	/// Idle controller dimming unfocused items to `dim`.
	pub fn new(dim: f64) -> Self {
		Self { focus: None, dim }
	}

	/// Current focus, if any.
	pub fn focus(&self) -> Option<Focus> {
		self.focus
	}

	/// Focuses a species: it and its neighbours stay opaque, its
	/// interactions are labelled.
	pub fn select_species(&mut self, model: &GraphModel, idx: usize) -> Highlight {
		let Some(species) = model.species.get(idx) else {
			return self.clear(model);
		};
		self.focus = Some(Focus::Species(idx));
		debug!("Focused species {}", species.scientific_name);

		let mut visible = model.neighbors(idx);
		visible.insert(idx);
		let species_opacity: Vec<f64> = (0..model.species.len())
			.map(|i| if visible.contains(&i) { 1.0 } else { self.dim })
			.collect();

		let mut labels = Vec::new();
		let mut tally: Vec<(String, usize)> = Vec::new();
		let interactions = model
			.interactions
			.iter()
			.enumerate()
			.map(|(e, link)| {
				if !link.touches(idx) {
					return self.dim;
				}
				labels.push(EdgeLabel {
					edge: e,
					text: link.kind.clone(),
				});
				match tally.iter_mut().find(|(kind, _)| *kind == link.kind) {
					Some((_, count)) => *count += 1,
					None => tally.push((link.kind.clone(), 1)),
				}
				1.0
			})
			.collect();

		Highlight {
			backgrounds: species_opacity.clone(),
			species: species_opacity,
			interactions,
			labels,
			panel: InfoPanel::Species(SpeciesPanel {
				name: species.name.clone(),
				scientific_name: species.scientific_name.clone(),
				image: species.image.clone(),
				connected: model.degree(idx),
				observations: species.observations,
				interactions: tally,
			}),
		}
	}

	/// Focuses one interaction and its two endpoints.
	pub fn select_interaction(&mut self, model: &GraphModel, edge: usize) -> Highlight {
		let Some(link) = model.interactions.get(edge) else {
			return self.clear(model);
		};
		self.focus = Some(Focus::Interaction(edge));
		let (source, target) = (&model.species[link.source], &model.species[link.target]);
		debug!(
			"Focused interaction {} {} {}",
			source.scientific_name, link.kind, target.scientific_name
		);

		let species_opacity: Vec<f64> = (0..model.species.len())
			.map(|i| if link.touches(i) { 1.0 } else { self.dim })
			.collect();
		let interactions = (0..model.interactions.len())
			.map(|e| if e == edge { 1.0 } else { self.dim })
			.collect();

		Highlight {
			backgrounds: species_opacity.clone(),
			species: species_opacity,
			interactions,
			labels: Vec::new(),
			panel: InfoPanel::Interaction(InteractionPanel {
				source_name: source.name.clone(),
				source_image: source.image.clone(),
				target_name: target.name.clone(),
				target_image: target.image.clone(),
				kind: link.kind.clone(),
				description: describe(&link.kind),
			}),
		}
	}

	/// Back to idle.
	pub fn clear(&mut self, model: &GraphModel) -> Highlight {
		if self.focus.take().is_some() {
			debug!("Selection cleared");
		}
		Highlight::idle(model)
	}
}
