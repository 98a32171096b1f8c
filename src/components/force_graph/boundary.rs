use super::viewport::bounds;

/// Decorative circle around the whole layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
	/// Centre x.
	pub cx: f64,
	/// Centre y.
	pub cy: f64,
	/// Ring radius.
	pub radius: f64,
}

impl Boundary {
	/// Circle through the corners of the bounding box, grown by `padding`.
	pub fn enclosing(points: impl IntoIterator<Item = (f64, f64)>, padding: f64) -> Option<Self> {
		let (min_x, min_y, max_x, max_y) = bounds(points)?;
		Some(Self {
			cx: (min_x + max_x) / 2.0,
			cy: (min_y + max_y) / 2.0,
			radius: (max_x - min_x).hypot(max_y - min_y) / 2.0 + padding,
		})
	}

	/// Radius of the caption circle.
	pub fn text_radius(&self, inset: f64) -> f64 {
		self.radius - inset
	}

	/// Full circle of radius `radius - inset` as two half arcs, starting at
	/// the rightmost point.
	pub fn text_path(&self, inset: f64) -> String {
		let r = self.text_radius(inset);
		let (right, left) = (self.cx + r, self.cx - r);
		format!(
			"M {right} {cy} A {r} {r} 0 1 1 {left} {cy} A {r} {r} 0 1 1 {right} {cy}",
			cy = self.cy
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn encloses_bounding_box_with_padding() {
		let b = Boundary::enclosing([(0.0, 0.0), (60.0, 80.0), (30.0, 10.0)], 100.0).unwrap();
		assert_eq!(b, Boundary { cx: 30.0, cy: 40.0, radius: 150.0 });
		assert_eq!(b.text_radius(60.0), 90.0);
		assert_eq!(b.text_path(60.0), "M 120 40 A 90 90 0 1 1 -60 40 A 90 90 0 1 1 120 40");
	}

	#[test]
	fn single_point_has_padding_radius() {
		let b = Boundary::enclosing([(5.0, 5.0)], 100.0).unwrap();
		assert_eq!(b.radius, 100.0);
	}

	#[test]
	fn empty_layout_has_no_boundary() {
		assert!(Boundary::enclosing(Vec::new(), 100.0).is_none());
	}
}
