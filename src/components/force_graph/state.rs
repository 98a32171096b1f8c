use log::{debug, warn};

use super::arc::{ArcOffsets, ArcPath};
use super::boundary::Boundary;
use super::config::GraphConfig;
use super::model::GraphModel;
use super::selection::{Highlight, SelectionController};
use super::simulation::{Simulation, TickOutcome};
use super::types::GraphData;
use super::viewport::{self, FitAnimation, ViewTransform};

/// Screen-space tolerance for picking an interaction arc.
pub const EDGE_HIT_TOLERANCE: f64 = 4.0;
/// Pointer travel, in pixels, that turns a press into a drag.
pub const CLICK_SLOP: f64 = 3.0;
/// Longest frame interval fed to the fit transition.
pub const MAX_FRAME_MS: f64 = 100.0;

/// Milliseconds between two animation-frame timestamps, clamped to
/// `[0, MAX_FRAME_MS]`. The first frame has no predecessor and counts as 0.
pub fn frame_delta(previous: Option<f64>, now: f64) -> f64 {
	previous.map_or(0.0, |p| (now - p).clamp(0.0, MAX_FRAME_MS))
}

/// Discrete input the coordinator reacts to. Coordinates are graph-space.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// Focus a species.
	ClickSpecies(usize),
	/// Focus an interaction.
	ClickInteraction(usize),
	/// Drop any focus.
	ClickBackground,
	/// Reheat the layout and drop any focus.
	Reset,
	/// Pin a species under the pointer and keep the layout warm.
	DragStart(usize),
	/// Move the pinned species.
	DragMove {
		/// Dragged species.
		species: usize,
		/// New graph-space x.
		x: f64,
		/// New graph-space y.
		y: f64,
	},
	/// Release the pin.
	DragEnd(usize),
}

/// What lies under the pointer, topmost first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
	/// A species disc.
	Species(usize),
	/// An interaction arc, within [`EDGE_HIT_TOLERANCE`].
	Interaction(usize),
	/// Nothing.
	Background,
}

#[derive(Clone, Debug, Default)]
struct DragState {
	active: bool,
	species: Option<usize>,
	moved: bool,
	start_x: f64,
	start_y: f64,
	node_start_x: f64,
	node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
struct PanState {
	active: bool,
	moved: bool,
	pressed: Option<Hit>,
	start_x: f64,
	start_y: f64,
	transform_start_x: f64,
	transform_start_y: f64,
}

/// Geometry published after every tick for the render layer.
#[derive(Clone, Debug, Default)]
pub struct FrameGeometry {
	/// Species centres, in arena order.
	pub positions: Vec<(f64, f64)>,
	/// One arc per interaction, in input order.
	pub arcs: Vec<ArcPath>,
	/// Ring around the layout; `None` for an empty graph.
	pub boundary: Option<Boundary>,
	/// SVG path of the circle the boundary caption runs along.
	pub caption_path: Option<String>,
}

/// Everything the canvas needs: model, simulation, selection and view.
pub struct ForceGraphState {
	/// Species arena and resolved interactions.
	pub model: GraphModel,
	/// Tunables the state was built with.
	pub config: GraphConfig,
	/// Opacities, labels and panel of the current focus.
	pub highlight: Highlight,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Latest published geometry.
	pub geometry: FrameGeometry,
	/// Viewport width in pixels.
	pub width: f64,
	/// Viewport height in pixels.
	pub height: f64,
	drag: DragState,
	pan: PanState,
	simulation: Simulation,
	offsets: ArcOffsets,
	selection: SelectionController,
	fit_animation: Option<FitAnimation>,
}

impl ForceGraphState {
	/// Builds the model and a hot simulation centred on the viewport.
	pub fn new(data: &GraphData, config: GraphConfig, width: f64, height: f64) -> Self {
		let model = GraphModel::new(data, &config);
		if model.is_empty() {
			warn!("Graph has no species; nothing to lay out");
		}
		let simulation = Simulation::new(
			&model.species,
			&model.interactions,
			&config,
			(width / 2.0, height / 2.0),
		);
		let offsets = ArcOffsets::new(&model.interactions, config.arc_separation);
		let selection = SelectionController::new(config.dim_opacity);
		let highlight = Highlight::idle(&model);

		let mut state = Self {
			model,
			config,
			highlight,
			transform: ViewTransform::default(),
			geometry: FrameGeometry::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			simulation,
			offsets,
			selection,
			fit_animation: None,
		};
		state.update_geometry();
		state
	}

	/// The layout simulation.
	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	/// The focus state machine.
	pub fn selection(&self) -> &SelectionController {
		&self.selection
	}

	/// True while the layout is cooling or a fit transition is running.
	pub fn is_animating(&self) -> bool {
		self.simulation.is_running() || self.fit_animation.is_some()
	}

	/// One animation frame: step the simulation, refresh geometry and move
	/// the fit transition along by `dt_ms` of wall-clock time.
	pub fn tick(&mut self, dt_ms: f64) -> TickOutcome {
		let outcome = self.simulation.tick(&mut self.model.species);
		if outcome != TickOutcome::Idle {
			self.update_geometry();
		}
		if outcome == TickOutcome::Settled {
			self.request_fit();
		}
		if let Some(anim) = &mut self.fit_animation {
			self.transform = anim.advance(dt_ms);
			if anim.is_finished() {
				self.fit_animation = None;
			}
		}
		outcome
	}

	fn update_geometry(&mut self) {
		let species = &self.model.species;
		self.geometry.positions = self.model.positions().collect();
		self.geometry.arcs = self
			.model
			.interactions
			.iter()
			.enumerate()
			.map(|(i, link)| {
				let (s, t) = (&species[link.source], &species[link.target]);
				ArcPath::between((s.x, s.y), (t.x, t.y), self.offsets.get(i))
			})
			.collect();
		self.geometry.boundary = Boundary::enclosing(
			self.geometry.positions.iter().copied(),
			self.config.boundary_padding,
		);
		self.geometry.caption_path = self
			.geometry
			.boundary
			.map(|b| b.text_path(self.config.boundary_text_inset));
	}

	/// Starts an animated transition that fits the whole layout in view.
	/// Skipped when there is nothing to fit.
	pub fn request_fit(&mut self) {
		let Some(target) = viewport::fit(
			self.model.positions(),
			(self.width, self.height),
			self.config.fit_padding,
		) else {
			debug!("Fit skipped: empty layout");
			return;
		};
		debug!(
			"Fitting view: k={:.3} x={:.1} y={:.1}",
			target.k, target.x, target.y
		);
		self.fit_animation = Some(FitAnimation::new(
			self.transform,
			target,
			self.config.fit_duration_ms,
		));
	}

	/// Where the running fit transition ends, if one is running.
	pub fn fit_target(&self) -> Option<ViewTransform> {
		self.fit_animation.as_ref().map(FitAnimation::target)
	}

	/// Applies one input event. Selection changes return the new highlight.
	pub fn handle(&mut self, event: GraphEvent) -> Option<Highlight> {
		let highlight = match event {
			GraphEvent::ClickSpecies(idx) => self.selection.select_species(&self.model, idx),
			GraphEvent::ClickInteraction(edge) => {
				self.selection.select_interaction(&self.model, edge)
			}
			GraphEvent::ClickBackground => self.selection.clear(&self.model),
			GraphEvent::Reset => {
				self.simulation.restart();
				self.selection.clear(&self.model)
			}
			GraphEvent::DragStart(idx) => {
				self.simulation.drag_start(&mut self.model.species, idx);
				return None;
			}
			GraphEvent::DragMove { species, x, y } => {
				self.simulation
					.drag_move(&mut self.model.species, species, x, y);
				return None;
			}
			GraphEvent::DragEnd(idx) => {
				self.simulation.drag_end(&mut self.model.species, idx);
				return None;
			}
		};
		self.highlight = highlight.clone();
		Some(highlight)
	}

	/// Inverse of the current view transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.screen_to_graph(sx, sy)
	}

	/// Topmost species whose disc contains the screen point.
	pub fn species_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// Later species are painted on top.
		self.model
			.species
			.iter()
			.rposition(|s| (s.x - gx).hypot(s.y - gy) < s.radius)
	}

	/// Closest interaction arc within the hit tolerance.
	pub fn interaction_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let p = self.screen_to_graph(sx, sy);
		let tolerance = EDGE_HIT_TOLERANCE / self.transform.k;
		self.geometry
			.arcs
			.iter()
			.enumerate()
			.map(|(i, arc)| (i, arc.distance_to(p)))
			.filter(|&(_, d)| d <= tolerance)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}

	/// Species take precedence over interactions.
	pub fn hit(&self, sx: f64, sy: f64) -> Hit {
		if let Some(idx) = self.species_at(sx, sy) {
			Hit::Species(idx)
		} else if let Some(edge) = self.interaction_at(sx, sy) {
			Hit::Interaction(edge)
		} else {
			Hit::Background
		}
	}

	/// Press at screen `(sx, sy)`. A species press starts a drag right away;
	/// anything else may become a pan or a click.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		match self.hit(sx, sy) {
			Hit::Species(idx) => {
				let node = &self.model.species[idx];
				self.drag = DragState {
					active: true,
					species: Some(idx),
					moved: false,
					start_x: sx,
					start_y: sy,
					node_start_x: node.x,
					node_start_y: node.y,
				};
				self.handle(GraphEvent::DragStart(idx));
			}
			hit => {
				self.pan = PanState {
					active: true,
					moved: false,
					pressed: Some(hit),
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	/// Moves a drag or pan once the pointer has left the click slop.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			let Some(idx) = self.drag.species else {
				return;
			};
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if dx.hypot(dy) > CLICK_SLOP {
				self.drag.moved = true;
			}
			if self.drag.moved {
				let k = self.transform.k;
				self.handle(GraphEvent::DragMove {
					species: idx,
					x: self.drag.node_start_x + dx / k,
					y: self.drag.node_start_y + dy / k,
				});
			}
		} else if self.pan.active {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			if dx.hypot(dy) > CLICK_SLOP {
				self.pan.moved = true;
			}
			if self.pan.moved {
				self.fit_animation = None;
				self.transform.x = self.pan.transform_start_x + dx;
				self.transform.y = self.pan.transform_start_y + dy;
			}
		}
	}

	/// Release. Returns the new highlight when the press turned out to be a
	/// click. A click on a species or interaction never also counts as a
	/// background click.
	pub fn pointer_up(&mut self) -> Option<Highlight> {
		let mut highlight = None;
		if self.drag.active {
			if let Some(idx) = self.drag.species {
				self.handle(GraphEvent::DragEnd(idx));
				if !self.drag.moved {
					highlight = self.handle(GraphEvent::ClickSpecies(idx));
				}
			}
		} else if self.pan.active && !self.pan.moved {
			highlight = match self.pan.pressed {
				Some(Hit::Interaction(edge)) => self.handle(GraphEvent::ClickInteraction(edge)),
				Some(_) => self.handle(GraphEvent::ClickBackground),
				None => None,
			};
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
		highlight
	}

	/// Pointer left the surface: abandon the gesture without clicking.
	pub fn pointer_cancel(&mut self) {
		if let (true, Some(idx)) = (self.drag.active, self.drag.species) {
			self.handle(GraphEvent::DragEnd(idx));
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
	}

	/// Wheel zoom around the pointer; interrupts a running fit.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.fit_animation = None;
		self.transform = self
			.transform
			.zoom_at(sx, sy, factor, self.config.zoom_extent);
	}

	/// New viewport size. Later fits and the centering force use it; the
	/// layout is not reheated.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.set_center(width / 2.0, height / 2.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::selection::{Focus, InfoPanel};
	use crate::components::force_graph::types::{InteractionRecord, SpeciesRecord};

	fn pair() -> ForceGraphState {
		let species = ["A", "B"]
			.iter()
			.map(|id| SpeciesRecord {
				scientific_name: id.to_string(),
				name: id.to_string(),
				image: String::new(),
				observations: "1".into(),
			})
			.collect();
		let data = GraphData {
			species,
			interactions: vec![InteractionRecord {
				source: "A".into(),
				target: "B".into(),
				kind: "preda".into(),
			}],
		};
		ForceGraphState::new(&data, GraphConfig::default(), 800.0, 600.0)
	}

	fn settle(state: &mut ForceGraphState) {
		for _ in 0..2000 {
			if state.tick(16.0) == TickOutcome::Idle && !state.is_animating() {
				return;
			}
		}
	}

	#[test]
	fn settling_requests_fit_and_animates_to_it() {
		let mut state = pair();
		let mut saw_target = None;
		for _ in 0..2000 {
			if state.tick(16.0) == TickOutcome::Settled {
				saw_target = state.fit_target();
			}
			if !state.is_animating() {
				break;
			}
		}
		let target = saw_target.expect("fit requested on settle");
		assert_eq!(state.transform, target);
		assert!(target.k <= 1.0);
	}

	#[test]
	fn press_and_release_on_species_is_a_click() {
		let mut state = pair();
		settle(&mut state);
		let (x, y) = state.geometry.positions[0];
		let (sx, sy) = (x * state.transform.k + state.transform.x, y * state.transform.k + state.transform.y);
		state.pointer_down(sx, sy);
		assert_eq!(state.simulation().dragging(), Some(0));
		let highlight = state.pointer_up().expect("click");
		assert!(matches!(highlight.panel, InfoPanel::Species(_)));
		assert_eq!(state.simulation().dragging(), None);
	}

	#[test]
	fn press_and_release_on_interaction_selects_it() {
		let mut state = pair();
		settle(&mut state);
		state.handle(GraphEvent::ClickSpecies(0));
		let arc = state.geometry.arcs[0];
		let ((x, y), _) = arc.along(arc.length() / 2.0);
		let t = state.transform;
		let (sx, sy) = (x * t.k + t.x, y * t.k + t.y);
		assert_eq!(state.hit(sx, sy), Hit::Interaction(0));

		state.pointer_down(sx, sy);
		let highlight = state.pointer_up().expect("click");
		assert!(matches!(highlight.panel, InfoPanel::Interaction(_)));
		assert_eq!(state.selection().focus(), Some(Focus::Interaction(0)));
		assert_eq!(state.highlight, highlight);
	}

	#[test]
	fn fit_lasts_its_duration_in_wall_clock_time() {
		let mut state = pair();
		settle(&mut state);
		state.transform = ViewTransform {
			x: 300.0,
			y: -200.0,
			k: 0.5,
		};
		state.request_fit();
		let target = state.fit_target().expect("fit");

		// 100 frames at 144 Hz are well under a second.
		let (mut prev, mut now) = (None, 0.0);
		for _ in 0..100 {
			state.tick(frame_delta(prev, now));
			prev = Some(now);
			now += 1000.0 / 144.0;
		}
		assert_eq!(state.fit_target(), Some(target));
		assert_ne!(state.transform, target);

		for _ in 0..4 {
			state.tick(MAX_FRAME_MS);
		}
		assert_eq!(state.transform, target);
		assert_eq!(state.fit_target(), None);
	}

	#[test]
	fn frame_delta_is_clamped() {
		assert_eq!(frame_delta(None, 5000.0), 0.0);
		assert_eq!(frame_delta(Some(1000.0), 1016.0), 16.0);
		assert_eq!(frame_delta(Some(1000.0), 9000.0), MAX_FRAME_MS);
		assert_eq!(frame_delta(Some(1000.0), 990.0), 0.0);
	}

	#[test]
	fn caption_path_follows_the_boundary() {
		let mut state = pair();
		settle(&mut state);
		let boundary = state.geometry.boundary.expect("boundary");
		assert_eq!(
			state.geometry.caption_path,
			Some(boundary.text_path(state.config.boundary_text_inset))
		);
	}

	#[test]
	fn dragging_species_moves_it_without_clicking() {
		let mut state = pair();
		settle(&mut state);
		let t = state.transform;
		let (x, y) = state.geometry.positions[1];
		let (sx, sy) = (x * t.k + t.x, y * t.k + t.y);
		state.pointer_down(sx, sy);
		state.pointer_move(sx + 50.0, sy);
		state.tick(16.0);
		assert!((state.model.species[1].x - (x + 50.0 / t.k)).abs() < 1e-9);
		assert_eq!(state.pointer_up(), None);
		assert_eq!(state.model.species[1].fx, None);
	}

	#[test]
	fn background_click_clears_and_pan_does_not() {
		let mut state = pair();
		settle(&mut state);
		state.handle(GraphEvent::ClickSpecies(0));
		state.pointer_down(1.0, 1.0);
		state.pointer_move(40.0, 1.0);
		assert_eq!(state.pointer_up(), None);
		assert!(state.highlight.panel.is_visible());

		state.pointer_down(1.0, 1.0);
		let cleared = state.pointer_up().expect("background click");
		assert!(!cleared.panel.is_visible());
	}

	#[test]
	fn reset_restarts_and_clears() {
		let mut state = pair();
		settle(&mut state);
		state.handle(GraphEvent::ClickInteraction(0));
		let h = state.handle(GraphEvent::Reset).unwrap();
		assert_eq!(h, Highlight::idle(&state.model));
		assert_eq!(state.simulation().alpha(), 1.0);
		assert!(state.simulation().is_running());
	}

	#[test]
	fn empty_graph_is_inert() {
		let mut state = ForceGraphState::new(&GraphData::default(), GraphConfig::default(), 800.0, 600.0);
		assert_eq!(state.tick(16.0), TickOutcome::Idle);
		state.request_fit();
		assert_eq!(state.fit_target(), None);
		assert!(state.geometry.boundary.is_none());
		assert!(state.geometry.caption_path.is_none());
		assert_eq!(state.hit(10.0, 10.0), Hit::Background);
	}
}
