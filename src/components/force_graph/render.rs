use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, Path2d};

use super::model::Species;
use super::state::ForceGraphState;

const BACKGROUND: &str = "#1a1a2e";
const STROKE: &str = "#646466";
const DISC: &str = "#000000";

/// Species portraits, loaded once and drawn when ready.
pub struct SpeciesImages(Vec<Option<HtmlImageElement>>);

impl SpeciesImages {
	pub fn load(species: &[Species]) -> Self {
		Self(
			species
				.iter()
				.map(|s| {
					let img = HtmlImageElement::new().ok()?;
					img.set_src(&s.image);
					Some(img)
				})
				.collect(),
		)
	}

	fn ready(&self, idx: usize) -> Option<&HtmlImageElement> {
		self.0
			.get(idx)?
			.as_ref()
			.filter(|img| img.complete() && img.natural_width() > 0)
	}
}

pub fn render(state: &ForceGraphState, images: &SpeciesImages, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	if state.model.is_empty() {
		return;
	}
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_edge_labels(state, ctx);
	draw_species(state, images, ctx);
	draw_boundary(state, ctx);
	ctx.restore();
	ctx.set_global_alpha(1.0);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(STROKE);
	ctx.set_line_width(0.4);
	for (i, arc) in state.geometry.arcs.iter().enumerate() {
		let Ok(path) = Path2d::new_with_path_string(&arc.to_svg()) else {
			continue;
		};
		ctx.set_global_alpha(state.highlight.interactions.get(i).copied().unwrap_or(1.0));
		ctx.stroke_with_path(&path);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_edge_labels(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("white");
	ctx.set_font("8px sans-serif");
	ctx.set_text_align("center");
	for label in &state.highlight.labels {
		let Some(arc) = state.geometry.arcs.get(label.edge) else {
			continue;
		};
		fill_text_along(ctx, &label.text, arc.length() / 2.0, |d| arc.along(d));
	}
}

/// Draws `text` glyph by glyph along a curve, centred `centre` units from its
/// start. `at` gives the point and tangent angle at a distance along it.
fn fill_text_along(
	ctx: &CanvasRenderingContext2d,
	text: &str,
	centre: f64,
	at: impl Fn(f64) -> ((f64, f64), f64),
) {
	let width = ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0);
	let mut along = centre - width / 2.0;
	for ch in text.chars() {
		let glyph = ch.to_string();
		let w = ctx.measure_text(&glyph).map(|m| m.width()).unwrap_or(0.0);
		let ((x, y), angle) = at(along + w / 2.0);
		ctx.save();
		let _ = ctx.translate(x, y);
		let _ = ctx.rotate(angle);
		let _ = ctx.fill_text(&glyph, 0.0, 0.0);
		ctx.restore();
		along += w;
	}
}

fn draw_species(state: &ForceGraphState, images: &SpeciesImages, ctx: &CanvasRenderingContext2d) {
	for (i, s) in state.model.species.iter().enumerate() {
		ctx.set_global_alpha(state.highlight.backgrounds.get(i).copied().unwrap_or(1.0));
		ctx.begin_path();
		let _ = ctx.arc(s.x, s.y, s.radius, 0.0, TAU);
		ctx.set_fill_style_str(DISC);
		ctx.fill();
	}

	for (i, s) in state.model.species.iter().enumerate() {
		let alpha = state.highlight.species.get(i).copied().unwrap_or(1.0);
		ctx.set_global_alpha(alpha);
		if let Some(img) = images.ready(i) {
			ctx.save();
			ctx.set_global_alpha(alpha * s.opacity);
			ctx.begin_path();
			let _ = ctx.arc(s.x, s.y, s.radius, 0.0, TAU);
			ctx.clip();
			// Centre-crop to a square, like "xMidYMid slice".
			let (w, h) = (img.natural_width() as f64, img.natural_height() as f64);
			let side = w.min(h);
			let _ = ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
				img,
				(w - side) / 2.0,
				(h - side) / 2.0,
				side,
				side,
				s.x - s.radius,
				s.y - s.radius,
				s.radius * 2.0,
				s.radius * 2.0,
			);
			ctx.restore();
		}
		ctx.begin_path();
		let _ = ctx.arc(s.x, s.y, s.radius, 0.0, TAU);
		ctx.set_stroke_style_str(STROKE);
		ctx.set_line_width(0.4);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_boundary(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(b) = state.geometry.boundary else {
		return;
	};
	ctx.set_stroke_style_str(STROKE);
	ctx.set_line_width(2.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(12.0),
		&JsValue::from_f64(8.0),
	));
	ctx.begin_path();
	let _ = ctx.arc(b.cx, b.cy, b.radius, 0.0, TAU);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	let r = b.text_radius(state.config.boundary_text_inset);
	if r <= 0.0 {
		return;
	}
	// Caption centred at 65% of the way round, running clockwise from the
	// rightmost point of the circle.
	ctx.set_fill_style_str(STROKE);
	ctx.set_font("44px Arial, sans-serif");
	ctx.set_text_align("center");
	fill_text_along(ctx, &state.config.boundary_caption, 0.65 * TAU * r, |d| {
		let angle = d / r;
		(
			(b.cx + r * angle.cos(), b.cy + r * angle.sin()),
			angle + PI / 2.0,
		)
	});
}
