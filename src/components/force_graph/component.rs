use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::config::GraphConfig;
use super::render::{self, SpeciesImages};
use super::selection::{InfoPanel, InteractionPanel, SpeciesPanel};
use super::state::{ForceGraphState, GraphEvent, frame_delta};
use super::types::GraphData;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;
type Callback<T> = Rc<RefCell<Option<Closure<T>>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
		.dyn_into()
		.map_err(JsValue::from)
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Canvas with the species graph, its reset button, top-species counter and
/// info box.
#[component]
pub fn ForceGraphCanvas(
	/// Species and interaction tables.
	#[prop(into)]
	data: Signal<GraphData>,
	/// Engine tunables; defaults when omitted.
	#[prop(optional)]
	config: Option<GraphConfig>,
	/// Fill the window and follow its resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width; the parent's width when omitted.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height; the parent's height when omitted.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let info_panel = RwSignal::new(InfoPanel::Hidden);
	let top_species = RwSignal::new(None::<(String, String)>);
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Callback<dyn FnMut(f64)> = Rc::new(RefCell::new(None));
	let resize_cb: Callback<dyn FnMut()> = Rc::new(RefCell::new(None));
	let keydown_cb: Callback<dyn FnMut(KeyboardEvent)> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let (state_init, animate_init, resize_cb_init, keydown_cb_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("No window; graph not mounted");
			return;
		};

		// The viewport is sampled once here; only fullscreen mode follows resizes.
		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				error!("Canvas setup failed: {err:?}");
				return;
			}
		};

		let graph = ForceGraphState::new(&data.get(), config.clone(), w, h);
		top_species.set(
			graph
				.model
				.most_connected()
				.map(|s| (s.name.clone(), s.scientific_name.clone())),
		);
		let images = SpeciesImages::load(&graph.model.species);
		*state_init.borrow_mut() = Some(graph);
		info!("Graph mounted at {w}x{h}");

		let state_fit = state_init.clone();
		set_timeout(
			move || {
				if let Some(ref mut s) = *state_fit.borrow_mut() {
					s.request_fit();
				}
			},
			Duration::from_millis(config.fit_fallback_ms),
		);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let state_key = state_init.clone();
		*keydown_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if ev.code() != "Space" {
				return;
			}
			ev.prevent_default();
			if let Some(ref mut s) = *state_key.borrow_mut() {
				s.handle(GraphEvent::Reset);
				info_panel.set(InfoPanel::Hidden);
			}
		}));
		if let Some(ref cb) = *keydown_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let mut last_frame = None;
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			let dt = frame_delta(last_frame, now);
			last_frame = Some(now);
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(dt);
				render::render(s, &images, &ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut()
			&& let Some(highlight) = s.pointer_up()
		{
			info_panel.set(highlight.panel);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_cancel();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
	};

	let state_reset = state.clone();
	let on_reset = move |ev: MouseEvent| {
		ev.stop_propagation();
		if let Some(ref mut s) = *state_reset.borrow_mut() {
			s.handle(GraphEvent::Reset);
			info_panel.set(InfoPanel::Hidden);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<button id="reset" class="graph-reset" on:click=on_reset>"Reset"</button>
		<TopSpecies top=top_species />
		<InfoBox panel=info_panel />
	}
}

#[component]
fn TopSpecies(top: RwSignal<Option<(String, String)>>) -> impl IntoView {
	move || {
		top.get().map(|(name, scientific_name)| {
			view! {
				<div id="top-species-counter">
					<b>"Specie che interagisce con il maggor numero di altre specie:"</b>
					<br />
					{name}
					<br />
					<i>"(" {scientific_name} ")"</i>
				</div>
			}
		})
	}
}

#[component]
fn InfoBox(panel: RwSignal<InfoPanel>) -> impl IntoView {
	let opacity = move || if panel.with(InfoPanel::is_visible) { "opacity: 1" } else { "opacity: 0" };
	view! {
		<div id="info-box" style=opacity>
			{move || match panel.get() {
				InfoPanel::Hidden => ().into_any(),
				InfoPanel::Species(p) => species_panel(p).into_any(),
				InfoPanel::Interaction(p) => interaction_panel(p).into_any(),
			}}
		</div>
	}
}

fn species_panel(p: SpeciesPanel) -> impl IntoView {
	let lines = p
		.interaction_lines()
		.into_iter()
		.map(|line| view! { <br /> {line} })
		.collect_view();
	let observations = p.observations.to_string();
	let SpeciesPanel {
		name,
		scientific_name,
		image,
		connected,
		..
	} = p;
	let alt = name.clone();
	view! {
		<h3>{name}</h3>
		<h4><i>{scientific_name}</i></h4>
		<img src=image alt=alt style="width: 100%; height: auto; margin-top: 10px;" />
		<p>"Specie collegata con " <b>{connected}</b> " specie"</p>
		<p style="margin-top: 10px;"><u>"Osservazioni"</u>": " {observations}</p>
		<p style="margin-top: 10px;"><u>"Interazioni"</u>":" {lines}</p>
	}
}

fn interaction_panel(p: InteractionPanel) -> impl IntoView {
	let InteractionPanel {
		source_name,
		source_image,
		target_name,
		target_image,
		kind,
		description,
	} = p;
	let description =
		(!description.is_empty()).then(|| view! { <p style="margin-top: 10px;">{description}</p> });
	view! {
		<h3><i>{source_name.clone()}</i>" → "<em>{kind}</em>" → "<i>{target_name.clone()}</i></h3>
		<div style="display: flex; gap: 10px; margin-top: 10px;">
			<img src=source_image alt=source_name style="width: 80px; height: auto" />
			<img src=target_image alt=target_name style="width: 80px; height: auto" />
		</div>
		{description}
	}
}
