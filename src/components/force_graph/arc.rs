use std::collections::HashMap;
use std::f64::consts::TAU;

use super::model::Interaction;

/// Offset of `edges[idx]` within the fan of edges sharing its ordered
/// `(source, target)` pair. `A -> B` and `B -> A` are separate fans.
pub fn arc_offset(edges: &[Interaction], idx: usize, separation: f64) -> f64 {
	let Some(edge) = edges.get(idx) else {
		return 0.0;
	};
	let same: Vec<usize> = edges
		.iter()
		.enumerate()
		.filter(|(_, e)| e.source == edge.source && e.target == edge.target)
		.map(|(i, _)| i)
		.collect();
	let position = same.iter().position(|&i| i == idx).unwrap_or(0);
	ladder(position, same.len(), separation)
}

fn ladder(position: usize, count: usize, separation: f64) -> f64 {
	(position as f64 - (count as f64 - 1.0) / 2.0) * separation
}

/// Offsets of every edge, computed once for the static edge list.
#[derive(Clone, Debug, Default)]
pub struct ArcOffsets(Vec<f64>);

impl ArcOffsets {
	pub fn new(edges: &[Interaction], separation: f64) -> Self {
		let mut fans: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
		for (i, e) in edges.iter().enumerate() {
			fans.entry((e.source, e.target)).or_default().push(i);
		}
		let mut offsets = vec![0.0; edges.len()];
		for fan in fans.values() {
			for (position, &i) in fan.iter().enumerate() {
				offsets[i] = ladder(position, fan.len(), separation);
			}
		}
		Self(offsets)
	}

	pub fn get(&self, idx: usize) -> f64 {
		self.0.get(idx).copied().unwrap_or(0.0)
	}
}

/// A circular arc from `from` to `to`, drawn clockwise along the short way.
/// The offset only moves the destination, so parallel edges splay at the
/// target end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcPath {
	/// Source centre.
	pub from: (f64, f64),
	/// Target centre plus the fan offset.
	pub to: (f64, f64),
	/// Centre distance before the offset.
	pub radius: f64,
}

impl ArcPath {
	/// Arc from `from` to `to` shifted by `offset` on both axes.
	pub fn between(from: (f64, f64), to: (f64, f64), offset: f64) -> Self {
		let radius = (to.0 - from.0).hypot(to.1 - from.1);
		Self {
			from,
			to: (to.0 + offset, to.1 + offset),
			radius,
		}
	}

	/// SVG path data, `M x1,y1 A r,r 0 0,1 x2,y2`.
	pub fn to_svg(&self) -> String {
		format!(
			"M{},{} A{},{} 0 0,1 {},{}",
			self.from.0, self.from.1, self.radius, self.radius, self.to.0, self.to.1
		)
	}

	/// Centre, effective radius, start angle and clockwise sweep. `None` when
	/// the arc collapses to a straight segment or a point.
	fn circle(&self) -> Option<((f64, f64), f64, f64, f64)> {
		let (hx, hy) = ((self.from.0 - self.to.0) / 2.0, (self.from.1 - self.to.1) / 2.0);
		let half_chord2 = hx * hx + hy * hy;
		if half_chord2 == 0.0 || self.radius == 0.0 {
			return None;
		}
		// Radii too small for the chord are scaled up, as SVG does.
		let r = self.radius.max(half_chord2.sqrt());
		let k = ((r * r - half_chord2).max(0.0) / half_chord2).sqrt();
		let mid = ((self.from.0 + self.to.0) / 2.0, (self.from.1 + self.to.1) / 2.0);
		let center = (mid.0 + k * hy, mid.1 - k * hx);

		let start = (self.from.1 - center.1).atan2(self.from.0 - center.0);
		let end = (self.to.1 - center.1).atan2(self.to.0 - center.0);
		let sweep = (end - start).rem_euclid(TAU);
		Some((center, r, start, sweep))
	}

	fn point_at(&self, t: f64) -> (f64, f64) {
		match self.circle() {
			Some((c, r, start, sweep)) => {
				let a = start + sweep * t;
				(c.0 + r * a.cos(), c.1 + r * a.sin())
			}
			None => (
				self.from.0 + (self.to.0 - self.from.0) * t,
				self.from.1 + (self.to.1 - self.from.1) * t,
			),
		}
	}

	/// Length of the drawn curve.
	pub fn length(&self) -> f64 {
		match self.circle() {
			Some((_, r, _, sweep)) => r * sweep,
			None => (self.to.0 - self.from.0).hypot(self.to.1 - self.from.1),
		}
	}

	/// Point `distance` along the curve from `from`, with the tangent
	/// direction there in radians. Labels lay their glyphs out with it.
	pub fn along(&self, distance: f64) -> ((f64, f64), f64) {
		match self.circle() {
			Some((c, r, start, _)) => {
				let a = start + distance / r;
				((c.0 + r * a.cos(), c.1 + r * a.sin()), a + TAU / 4.0)
			}
			None => {
				let length = self.length();
				let t = if length == 0.0 { 0.0 } else { distance / length };
				(
					self.point_at(t),
					(self.to.1 - self.from.1).atan2(self.to.0 - self.from.0),
				)
			}
		}
	}

	/// Approximate distance from `p` to the arc.
	pub fn distance_to(&self, p: (f64, f64)) -> f64 {
		const STEPS: usize = 24;
		let mut prev = self.from;
		let mut best = f64::INFINITY;
		for i in 1..=STEPS {
			let next = self.point_at(i as f64 / STEPS as f64);
			best = best.min(segment_distance(p, prev, next));
			prev = next;
		}
		best
	}
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len2 = dx * dx + dy * dy;
	let t = if len2 == 0.0 {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
	};
	(p.0 - (a.0 + t * dx)).hypot(p.1 - (a.1 + t * dy))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn edge(source: usize, target: usize) -> Interaction {
		Interaction {
			source,
			target,
			kind: "mangia".into(),
		}
	}

	#[test]
	fn two_parallel_edges_split_evenly() {
		let edges = vec![edge(0, 1), edge(0, 1)];
		assert_eq!(arc_offset(&edges, 0, 10.0), -5.0);
		assert_eq!(arc_offset(&edges, 1, 10.0), 5.0);
	}

	#[test]
	fn odd_fan_is_symmetric_around_zero() {
		let edges = vec![edge(0, 1), edge(2, 3), edge(0, 1), edge(0, 1)];
		let offsets = ArcOffsets::new(&edges, 10.0);
		let all: Vec<f64> = (0..edges.len()).map(|i| offsets.get(i)).collect();
		assert_eq!(all, vec![-10.0, 0.0, 0.0, 10.0]);
		let fan = [offsets.get(0), offsets.get(2), offsets.get(3)];
		assert_eq!(fan.iter().sum::<f64>(), 0.0);
		assert!(fan.windows(2).all(|w| w[0] < w[1]));
		for i in 0..edges.len() {
			assert_eq!(offsets.get(i), arc_offset(&edges, i, 10.0));
		}
	}

	#[test]
	fn reversed_edges_form_their_own_fan() {
		let edges = vec![edge(0, 1), edge(1, 0)];
		assert_eq!(arc_offset(&edges, 0, 10.0), 0.0);
		assert_eq!(arc_offset(&edges, 1, 10.0), 0.0);
	}

	#[test]
	fn path_shifts_only_the_destination() {
		let path = ArcPath::between((0.0, 0.0), (30.0, 40.0), 5.0);
		assert_eq!(path.radius, 50.0);
		assert_eq!(path.from, (0.0, 0.0));
		assert_eq!(path.to, (35.0, 45.0));
		assert_eq!(path.to_svg(), "M0,0 A50,50 0 0,1 35,45");
	}

	#[test]
	fn halfway_point_lies_on_the_circle() {
		let path = ArcPath::between((0.0, 0.0), (100.0, 0.0), 0.0);
		// Chord equal to the radius subtends a sixth of the circle.
		assert!((path.length() - 100.0 * TAU / 6.0).abs() < 1e-9);
		let ((mx, my), angle) = path.along(path.length() / 2.0);
		assert!((mx - 50.0).abs() < 1e-9);
		// Clockwise in screen space bows above the chord.
		assert!(my < 0.0);
		// Tangent at the apex runs left to right.
		assert!(angle.cos() > 0.999);
		assert!(path.distance_to((mx, my)) < 1e-6);
		assert!(path.distance_to((50.0, 60.0)) > 50.0);
	}

	#[test]
	fn walking_the_arc_stays_on_it() {
		let path = ArcPath::between((0.0, 0.0), (30.0, 40.0), 5.0);
		let ((x0, y0), _) = path.along(0.0);
		assert!(x0.abs() < 1e-9 && y0.abs() < 1e-9);
		let ((x1, y1), _) = path.along(path.length());
		assert!((x1 - 35.0).abs() < 1e-9 && (y1 - 45.0).abs() < 1e-9);
		for i in 1..10 {
			let (p, _) = path.along(path.length() * i as f64 / 10.0);
			assert!(path.distance_to(p) < 0.5);
		}
	}

	#[test]
	fn coincident_endpoints_degrade_to_a_segment() {
		let path = ArcPath::between((10.0, 10.0), (10.0, 10.0), 10.0);
		assert_eq!(path.radius, 0.0);
		let (mid, _) = path.along(path.length() / 2.0);
		assert!((mid.0 - 15.0).abs() < 1e-9 && (mid.1 - 15.0).abs() < 1e-9);
	}
}
