use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use log::{info, warn};

use super::config::GraphConfig;
use super::types::{GraphData, InteractionRecord, Observations};

/// Neighbour sets keyed by scientific name.
pub type Adjacency = HashMap<String, HashSet<String>>;

/// Undirected, deduplicated neighbour sets keyed by scientific name.
pub fn build_adjacency(interactions: &[InteractionRecord]) -> Adjacency {
	let mut adjacency = Adjacency::new();
	for link in interactions {
		adjacency
			.entry(link.source.clone())
			.or_default()
			.insert(link.target.clone());
		adjacency
			.entry(link.target.clone())
			.or_default()
			.insert(link.source.clone());
	}
	adjacency
}

/// Number of distinct neighbours; 0 for unknown species.
pub fn degree_of(adjacency: &Adjacency, id: &str) -> usize {
	adjacency.get(id).map_or(0, HashSet::len)
}

/// A species in the node arena. Position, velocity and pin belong to the
/// simulation; everything else is fixed once the model is built.
#[derive(Clone, Debug)]
pub struct Species {
	/// Arena key.
	pub scientific_name: String,
	/// Common name.
	pub name: String,
	/// Portrait URL.
	pub image: String,
	/// Parsed observation count.
	pub observations: Observations,
	/// Base opacity; faded when never observed.
	pub opacity: f64,
	/// Distinct neighbours.
	pub degree: usize,
	/// Disc radius, scaled by degree.
	pub radius: f64,
	/// Graph-space x.
	pub x: f64,
	/// Graph-space y.
	pub y: f64,
	/// Velocity along x.
	pub vx: f64,
	/// Velocity along y.
	pub vy: f64,
	/// Pinned x while dragged.
	pub fx: Option<f64>,
	/// Pinned y while dragged.
	pub fy: Option<f64>,
}

/// An interaction with both endpoints resolved to arena indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
	/// Subject index.
	pub source: usize,
	/// Object index.
	pub target: usize,
	/// Interaction type.
	pub kind: String,
}

impl Interaction {
	/// True when `idx` is either endpoint.
	pub fn touches(&self, idx: usize) -> bool {
		self.source == idx || self.target == idx
	}
}

/// Species arena, resolved interactions and the neighbour index.
pub struct GraphModel {
	/// Species in input order.
	pub species: Vec<Species>,
	/// Interactions whose endpoints both exist, in input order.
	pub interactions: Vec<Interaction>,
	adjacency: Adjacency,
	index: HashMap<String, usize>,
}

impl GraphModel {
	/// Resolves the tables into the arena. Interactions naming an unknown
	/// species are dropped.
	pub fn new(data: &GraphData, config: &GraphConfig) -> Self {
		let adjacency = build_adjacency(&data.interactions);
		let degrees: Vec<usize> = data
			.species
			.iter()
			.map(|s| degree_of(&adjacency, &s.scientific_name))
			.collect();
		let scale = SizeScale::over(&degrees, config.radius_range);

		let golden_angle = PI * (3.0 - 5f64.sqrt());
		let mut index = HashMap::new();
		let species: Vec<Species> = data
			.species
			.iter()
			.zip(&degrees)
			.enumerate()
			.map(|(i, (record, &degree))| {
				index.insert(record.scientific_name.clone(), i);
				let observations = Observations::parse(&record.observations);
				let (r, angle) = (10.0 * (0.5 + i as f64).sqrt(), i as f64 * golden_angle);
				Species {
					scientific_name: record.scientific_name.clone(),
					name: record.name.clone(),
					image: record.image.clone(),
					observations,
					opacity: if observations.is_zero() {
						config.unobserved_opacity
					} else {
						1.0
					},
					degree,
					radius: scale.apply(degree),
					x: r * angle.cos(),
					y: r * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					fx: None,
					fy: None,
				}
			})
			.collect();

		let interactions: Vec<Interaction> = data
			.interactions
			.iter()
			.filter_map(|link| {
				match (index.get(&link.source), index.get(&link.target)) {
					(Some(&source), Some(&target)) => Some(Interaction {
						source,
						target,
						kind: link.kind.clone(),
					}),
					_ => {
						warn!(
							"dropping interaction {} -> {}: unknown species",
							link.source, link.target
						);
						None
					}
				}
			})
			.collect();

		info!(
			"Graph built: {} species, {} interactions",
			species.len(),
			interactions.len()
		);

		Self {
			species,
			interactions,
			adjacency,
			index,
		}
	}

	/// Arena index of a species.
	pub fn index_of(&self, scientific_name: &str) -> Option<usize> {
		self.index.get(scientific_name).copied()
	}

	/// Degree of `idx`; 0 when out of range.
	pub fn degree(&self, idx: usize) -> usize {
		self.species.get(idx).map_or(0, |s| s.degree)
	}

	/// Arena indices of the species adjacent to `idx`.
	pub fn neighbors(&self, idx: usize) -> HashSet<usize> {
		let Some(species) = self.species.get(idx) else {
			return HashSet::new();
		};
		self.adjacency
			.get(&species.scientific_name)
			.into_iter()
			.flatten()
			.filter_map(|id| self.index_of(id))
			.collect()
	}

	/// Species with the most neighbours; the first one wins a tie.
	pub fn most_connected(&self) -> Option<&Species> {
		self.species
			.iter()
			.reduce(|best, s| if s.degree > best.degree { s } else { best })
	}

	/// Current species centres.
	pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
		self.species.iter().map(|s| (s.x, s.y))
	}

	/// True when there are no species.
	pub fn is_empty(&self) -> bool {
		self.species.is_empty()
	}
}

/// Linear map from the degree extent onto a radius range.
struct SizeScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl SizeScale {
	fn over(degrees: &[usize], range: (f64, f64)) -> Self {
		let min = degrees.iter().copied().min().unwrap_or(0) as f64;
		let max = degrees.iter().copied().max().unwrap_or(0) as f64;
		Self {
			domain: (min, max),
			range,
		}
	}

	fn apply(&self, degree: usize) -> f64 {
		let span = self.domain.1 - self.domain.0;
		// A flat domain maps everything to the middle of the range.
		let t = if span == 0.0 {
			0.5
		} else {
			(degree as f64 - self.domain.0) / span
		};
		self.range.0 + t * (self.range.1 - self.range.0)
	}
}
