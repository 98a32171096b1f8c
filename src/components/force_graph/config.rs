/// Tunables of the layout and highlighting engine.
#[derive(Clone, Debug)]
pub struct GraphConfig {
	/// Rest length of the link spring.
	pub link_distance: f64,
	/// Pairwise charge; negative repels.
	pub charge_strength: f64,
	/// Extra clearance added to each node radius by the collision force.
	pub collide_margin: f64,
	/// Render radius range mapped linearly over the degree extent.
	pub radius_range: (f64, f64),
	/// The layout stops once alpha drops below this.
	pub alpha_min: f64,
	/// Fraction of the distance to the alpha target covered per tick.
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Alpha floor held while a node is dragged.
	pub drag_alpha_target: f64,
	/// Lateral spacing between parallel edges.
	pub arc_separation: f64,
	/// Screen margin kept around a fitted layout.
	pub fit_padding: f64,
	/// Length of the fit transition.
	pub fit_duration_ms: f64,
	/// Fit is also requested this long after mount, settled or not.
	pub fit_fallback_ms: u64,
	/// Gap between the layout's bounding box and the ring.
	pub boundary_padding: f64,
	/// Boundary caption runs on a circle this much smaller than the ring.
	pub boundary_text_inset: f64,
	/// Text drawn along the ring.
	pub boundary_caption: String,
	/// Opacity of everything outside the focus.
	pub dim_opacity: f64,
	/// Base opacity of species with zero observations.
	pub unobserved_opacity: f64,
	/// Smallest and largest wheel zoom.
	pub zoom_extent: (f64, f64),
}

impl Default for GraphConfig {
	fn default() -> Self {
		let alpha_min = 0.001_f64;
		Self {
			link_distance: 90.0,
			charge_strength: -500.0,
			collide_margin: 5.0,
			radius_range: (15.0, 45.0),
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
			arc_separation: 10.0,
			fit_padding: 40.0,
			fit_duration_ms: 1000.0,
			fit_fallback_ms: 2000,
			boundary_padding: 100.0,
			boundary_text_inset: 60.0,
			boundary_caption: "Oasi Cave di Noale".into(),
			dim_opacity: 0.1,
			unobserved_opacity: 0.7,
			zoom_extent: (0.1, 5.0),
		}
	}
}
