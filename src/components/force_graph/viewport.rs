/// Screen transform: `screen = graph * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation.
	pub x: f64,
	/// Vertical translation.
	pub y: f64,
	/// Scale.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Inverse of the transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zooms by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&self, sx: f64, sy: f64, factor: f64, extent: (f64, f64)) -> Self {
		let k = (self.k * factor).clamp(extent.0, extent.1);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Axis-aligned bounds of a point set; `None` when the set is empty.
pub fn bounds(points: impl IntoIterator<Item = (f64, f64)>) -> Option<(f64, f64, f64, f64)> {
	points.into_iter().fold(None, |acc, (x, y)| match acc {
		None => Some((x, y, x, y)),
		Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
	})
}

/// Transform that fits every point into `viewport` with `padding` on each
/// side, never zooming in past 1.
pub fn fit(
	points: impl IntoIterator<Item = (f64, f64)>,
	viewport: (f64, f64),
	padding: f64,
) -> Option<ViewTransform> {
	let (min_x, min_y, max_x, max_y) = bounds(points)?;
	let (width, height) = viewport;
	// A zero-width axis divides to +inf and drops out of the min.
	let k = ((width - 2.0 * padding) / (max_x - min_x))
		.min((height - 2.0 * padding) / (max_y - min_y))
		.min(1.0);
	if !k.is_finite() {
		return None;
	}
	Some(ViewTransform {
		x: (width - k * (min_x + max_x)) / 2.0,
		y: (height - k * (min_y + max_y)) / 2.0,
		k,
	})
}

pub fn ease_cubic_out(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Time-bounded interpolation between two transforms.
#[derive(Clone, Debug)]
pub struct FitAnimation {
	from: ViewTransform,
	to: ViewTransform,
	duration_ms: f64,
	elapsed_ms: f64,
}

impl FitAnimation {
	pub fn new(from: ViewTransform, to: ViewTransform, duration_ms: f64) -> Self {
		Self {
			from,
			to,
			duration_ms,
			elapsed_ms: 0.0,
		}
	}

	pub fn target(&self) -> ViewTransform {
		self.to
	}

	pub fn is_finished(&self) -> bool {
		self.elapsed_ms >= self.duration_ms
	}

	pub fn advance(&mut self, dt_ms: f64) -> ViewTransform {
		self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
		if self.is_finished() {
			return self.to;
		}
		let t = ease_cubic_out(self.elapsed_ms / self.duration_ms);
		self.from.lerp(&self.to, t)
	}
}
