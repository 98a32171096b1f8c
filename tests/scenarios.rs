use std::collections::HashSet;

use species_graph::force_graph::*;

fn species(id: &str, observations: &str) -> SpeciesRecord {
	SpeciesRecord {
		scientific_name: id.to_string(),
		name: format!("Nome {id}"),
		image: format!("{id}.jpg"),
		observations: observations.to_string(),
	}
}

fn link(source: &str, target: &str, kind: &str) -> InteractionRecord {
	InteractionRecord {
		source: source.to_string(),
		target: target.to_string(),
		kind: kind.to_string(),
	}
}

fn state(data: GraphData) -> ForceGraphState {
	ForceGraphState::new(&data, GraphConfig::default(), 1024.0, 768.0)
}

fn star() -> GraphData {
	GraphData {
		species: vec![species("A", "5"), species("B", "1"), species("C", "2")],
		interactions: vec![link("A", "B", "mangia"), link("A", "C", "preda")],
	}
}

#[test]
fn adjacency_is_symmetric_and_bounded() {
	let ids = ["A", "B", "C", "D", "E"];
	let links: Vec<_> = (0..40)
		.map(|i| (ids[i % 5], ids[(i * 7 + 3) % 5]))
		.filter(|(s, t)| s != t)
		.map(|(s, t)| link(s, t, "interagisce con"))
		.collect();
	let adjacency = build_adjacency(&links);
	for (id, neighbors) in &adjacency {
		for other in neighbors {
			assert!(adjacency[other].contains(id), "{id} -> {other} not mirrored");
		}
		assert!(degree_of(&adjacency, id) <= ids.len() - 1);
	}
}

#[test]
fn clicking_hub_keeps_everything_visible() {
	let mut s = state(star());
	let a = s.model.index_of("A").unwrap();
	let h = s.handle(GraphEvent::ClickSpecies(a)).unwrap();
	assert_eq!(h.species, vec![1.0, 1.0, 1.0]);
	assert_eq!(h.interactions, vec![1.0, 1.0]);
	assert_eq!(h.labels.len(), 2);
	let InfoPanel::Species(panel) = &h.panel else {
		panic!("expected species panel");
	};
	assert_eq!(panel.connected, 2);

	let idle = s.handle(GraphEvent::ClickBackground).unwrap();
	assert_eq!(idle.species, vec![1.0, 1.0, 1.0]);
	assert!(idle.labels.is_empty());
}

#[test]
fn focus_round_trip_restores_idle_exactly() {
	let mut data = star();
	data.species.push(species("D", "Nessuna"));
	data.interactions.push(link("C", "D", "ospite di"));
	let mut s = state(data);
	let before = s.highlight.clone();

	let b = s.model.index_of("B").unwrap();
	let focused = s.handle(GraphEvent::ClickSpecies(b)).unwrap();
	assert!(focused.species.contains(&0.1));

	let after = s.handle(GraphEvent::ClickBackground).unwrap();
	assert_eq!(after, before);
	assert_eq!(s.selection().focus(), None);
}

#[test]
fn edge_then_node_focus_skips_idle() {
	let mut data = star();
	data.species.push(species("D", "3"));
	data.interactions.push(link("C", "D", "ospite di"));
	let mut s = state(data);

	s.handle(GraphEvent::ClickInteraction(2)).unwrap();
	assert_eq!(s.selection().focus(), Some(Focus::Interaction(2)));

	let c = s.model.index_of("C").unwrap();
	let h = s.handle(GraphEvent::ClickSpecies(c)).unwrap();
	assert_eq!(s.selection().focus(), Some(Focus::Species(c)));

	let mut expected = s.model.neighbors(c);
	expected.insert(c);
	let visible: HashSet<usize> = h
		.species
		.iter()
		.enumerate()
		.filter(|(_, o)| **o == 1.0)
		.map(|(i, _)| i)
		.collect();
	assert_eq!(visible, expected);
}

#[test]
fn parallel_edges_fan_out() {
	let data = GraphData {
		species: vec![species("A", "1"), species("B", "1")],
		interactions: vec![link("A", "B", "mangia"), link("A", "B", "preda")],
	};
	let model = GraphModel::new(&data, &GraphConfig::default());
	assert_eq!(arc_offset(&model.interactions, 0, 10.0), -5.0);
	assert_eq!(arc_offset(&model.interactions, 1, 10.0), 5.0);

	for k in 1..=6 {
		let edges: Vec<_> = (0..k)
			.map(|_| Interaction {
				source: 0,
				target: 1,
				kind: "mangia".into(),
			})
			.collect();
		let offsets: Vec<f64> = (0..k).map(|i| arc_offset(&edges, i, 10.0)).collect();
		assert!(offsets.windows(2).all(|w| w[0] < w[1]));
		assert_eq!(offsets.iter().sum::<f64>(), 0.0);
		assert_eq!(offsets[0], -offsets[k - 1]);
	}
}

#[test]
fn unobserved_species_is_faded() {
	let data = GraphData {
		species: vec![species("A", "Nessuna"), species("B", "4")],
		interactions: vec![link("A", "B", "mangia"), link("B", "A", "preda")],
	};
	let model = GraphModel::new(&data, &GraphConfig::default());
	assert!(model.species[0].observations.is_zero());
	assert_eq!(model.species[0].opacity, 0.7);
	assert_eq!(model.species[1].opacity, 1.0);
}

#[test]
fn fit_never_upscales() {
	let t = fit([(0.0, 0.0), (100.0, 50.0)], (1024.0, 768.0), 40.0).unwrap();
	assert_eq!(t.k, 1.0);
	assert_eq!((t.x, t.y), (462.0, 359.0));

	let t = fit([(0.0, 0.0), (4000.0, 1000.0)], (1024.0, 768.0), 40.0).unwrap();
	assert_eq!(t.k, (944.0_f64 / 4000.0).min(688.0 / 1000.0));
}

#[test]
fn full_session_settles_fits_and_resets() {
	let mut s = state(star());
	let mut settled = 0;
	for _ in 0..1000 {
		if s.tick(16.0) == TickOutcome::Settled {
			settled += 1;
		}
	}
	assert_eq!(settled, 1);
	let boundary = s.geometry.boundary.expect("boundary");
	for &(x, y) in &s.geometry.positions {
		assert!((x - boundary.cx).hypot(y - boundary.cy) <= boundary.radius);
	}
	assert_eq!(s.geometry.arcs.len(), 2);

	s.handle(GraphEvent::ClickSpecies(1));
	let h = s.handle(GraphEvent::Reset).unwrap();
	assert!(!h.panel.is_visible());
	assert_eq!(s.simulation().alpha(), 1.0);
}
