//! Velocity-Verlet style force simulation with a decaying `alpha`.
//!
//! Each tick cools `alpha` toward `alpha_target`, lets the link, charge,
//! centering and collision forces nudge velocities (or positions, for
//! centering), then integrates. Pinned species ignore their velocity and sit
//! on their pin.

use log::{debug, info};

use super::config::GraphConfig;
use super::model::{Interaction, Species};

/// Result of one [`Simulation::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
	/// Positions moved and the layout is still cooling.
	Active,
	/// Alpha just fell below the threshold. Reported once per cooling run.
	Settled,
	/// Nothing to do until the next restart.
	Idle,
}

#[derive(Clone, Debug)]
struct Spring {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// Linear congruential generator used for tie-breaking jiggle, so layouts
/// are reproducible.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	fn next(&mut self) -> f64 {
		self.0 = (1_664_525 * self.0 + 1_013_904_223) % 4_294_967_296;
		self.0 as f64 / 4_294_967_296.0
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

/// Layout state: alpha lifecycle, springs and the active drag.
pub struct Simulation {
	alpha: f64,
	alpha_target: f64,
	alpha_min: f64,
	alpha_decay: f64,
	velocity_decay: f64,
	drag_alpha_target: f64,
	link_distance: f64,
	charge_strength: f64,
	collide_margin: f64,
	center: (f64, f64),
	springs: Vec<Spring>,
	running: bool,
	dragging: Option<usize>,
	random: Lcg,
}

impl Simulation {
	/// A hot simulation (alpha 1) over `species`, centred on `center`.
	/// Spring strength and bias come from each endpoint's link count.
	pub fn new(
		species: &[Species],
		interactions: &[Interaction],
		config: &GraphConfig,
		center: (f64, f64),
	) -> Self {
		let mut incidences = vec![0usize; species.len()];
		for link in interactions {
			incidences[link.source] += 1;
			incidences[link.target] += 1;
		}
		let springs = interactions
			.iter()
			.map(|link| {
				let (s, t) = (
					incidences[link.source] as f64,
					incidences[link.target] as f64,
				);
				Spring {
					source: link.source,
					target: link.target,
					strength: 1.0 / s.min(t),
					bias: s / (s + t),
				}
			})
			.collect();

		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_min: config.alpha_min,
			alpha_decay: config.alpha_decay,
			velocity_decay: config.velocity_decay,
			drag_alpha_target: config.drag_alpha_target,
			link_distance: config.link_distance,
			charge_strength: config.charge_strength,
			collide_margin: config.collide_margin,
			center,
			springs,
			running: !species.is_empty(),
			dragging: None,
			random: Lcg(1),
		}
	}

	/// Current energy.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Level alpha decays toward; raised while dragging.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// False once settled, until the next restart or drag.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Species currently dragged.
	pub fn dragging(&self) -> Option<usize> {
		self.dragging
	}

	/// Moves the point the centering force pulls toward.
	pub fn set_center(&mut self, cx: f64, cy: f64) {
		self.center = (cx, cy);
	}

	/// Reheats the layout from full energy. An active drag keeps its pin.
	pub fn restart(&mut self) {
		self.alpha = 1.0;
		self.running = true;
		debug!("Simulation restarted");
	}

	/// Pins `idx` where it is and holds alpha up while it is dragged. Returns
	/// false if another species already owns the drag.
	pub fn drag_start(&mut self, species: &mut [Species], idx: usize) -> bool {
		if self.dragging.is_some() {
			return false;
		}
		let Some(node) = species.get_mut(idx) else {
			return false;
		};
		node.fx = Some(node.x);
		node.fy = Some(node.y);
		self.dragging = Some(idx);
		self.alpha_target = self.drag_alpha_target;
		self.running = true;
		true
	}

	/// Moves the pin of the dragged species.
	pub fn drag_move(&mut self, species: &mut [Species], idx: usize, x: f64, y: f64) {
		if self.dragging != Some(idx) {
			return;
		}
		if let Some(node) = species.get_mut(idx) {
			node.fx = Some(x);
			node.fy = Some(y);
		}
	}

	/// Releases the pin. Alpha keeps decaying from wherever it is.
	pub fn drag_end(&mut self, species: &mut [Species], idx: usize) {
		if self.dragging != Some(idx) {
			return;
		}
		if let Some(node) = species.get_mut(idx) {
			node.fx = None;
			node.fy = None;
		}
		self.dragging = None;
		self.alpha_target = 0.0;
	}

	/// Cools alpha, applies the forces and integrates one step.
	pub fn tick(&mut self, species: &mut [Species]) -> TickOutcome {
		if !self.running || species.is_empty() {
			return TickOutcome::Idle;
		}

		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		let alpha = self.alpha;

		self.apply_links(species, alpha);
		self.apply_charge(species, alpha);
		self.apply_center(species);
		self.apply_collision(species);

		let keep = 1.0 - self.velocity_decay;
		for node in species.iter_mut() {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= keep;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= keep;
					node.y += node.vy;
				}
			}
		}

		if self.alpha < self.alpha_min {
			self.running = false;
			info!("Simulation settled");
			return TickOutcome::Settled;
		}
		TickOutcome::Active
	}

	fn apply_links(&mut self, species: &mut [Species], alpha: f64) {
		for spring in &self.springs {
			let (s, t) = (&species[spring.source], &species[spring.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.random.jiggle();
			}
			if y == 0.0 {
				y = self.random.jiggle();
			}
			let l = (x * x + y * y).sqrt();
			let l = (l - self.link_distance) / l * alpha * spring.strength;
			let (x, y) = (x * l, y * l);

			let t = &mut species[spring.target];
			t.vx -= x * spring.bias;
			t.vy -= y * spring.bias;
			let s = &mut species[spring.source];
			s.vx += x * (1.0 - spring.bias);
			s.vy += y * (1.0 - spring.bias);
		}
	}

	/// Exact pairwise repulsion, O(n²).
	fn apply_charge(&mut self, species: &mut [Species], alpha: f64) {
		let positions: Vec<(f64, f64)> = species.iter().map(|s| (s.x, s.y)).collect();
		for (i, node) in species.iter_mut().enumerate() {
			for (j, &(ox, oy)) in positions.iter().enumerate() {
				if i == j {
					continue;
				}
				let mut x = ox - positions[i].0;
				let mut y = oy - positions[i].1;
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				if l < 1.0 {
					l = l.sqrt();
				}
				let w = self.charge_strength * alpha / l;
				node.vx += x * w;
				node.vy += y * w;
			}
		}
	}

	fn apply_center(&self, species: &mut [Species]) {
		let n = species.len() as f64;
		let (sx, sy) = species
			.iter()
			.fold((0.0, 0.0), |(sx, sy), s| (sx + s.x, sy + s.y));
		let (dx, dy) = (sx / n - self.center.0, sy / n - self.center.1);
		for node in species.iter_mut() {
			node.x -= dx;
			node.y -= dy;
		}
	}

	fn apply_collision(&mut self, species: &mut [Species]) {
		let n = species.len();
		for i in 0..n {
			let ri = species[i].radius + self.collide_margin;
			let ri2 = ri * ri;
			let xi = species[i].x + species[i].vx;
			let yi = species[i].y + species[i].vy;
			for j in (i + 1)..n {
				let rj = species[j].radius + self.collide_margin;
				let r = ri + rj;
				let mut x = xi - (species[j].x + species[j].vx);
				let mut y = yi - (species[j].y + species[j].vy);
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				let d = l.sqrt();
				let push = (r - d) / d;
				x *= push;
				y *= push;
				let rj2 = rj * rj;
				let share = rj2 / (ri2 + rj2);
				species[i].vx += x * share;
				species[i].vy += y * share;
				species[j].vx -= x * (1.0 - share);
				species[j].vy -= y * (1.0 - share);
			}
		}
	}
}
