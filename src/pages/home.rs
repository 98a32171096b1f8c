use leptos::prelude::*;

use crate::components::force_graph::{
	ForceGraphCanvas, GraphData, InteractionRecord, SpeciesRecord,
};

/// Common name, scientific name, observation count.
const SPECIES: &[(&str, &str, &str)] = &[
	("Airone cenerino", "Ardea cinerea", "34"),
	("Martin pescatore", "Alcedo atthis", "12"),
	("Germano reale", "Anas platyrhynchos", "58"),
	("Rana verde", "Pelophylax esculentus", "21"),
	("Luccio", "Esox lucius", "Nessuna"),
	("Gambero della Louisiana", "Procambarus clarkii", "9"),
	("Biscia dal collare", "Natrix helvetica", "6"),
	("Libellula depressa", "Libellula depressa", "17"),
	("Zanzara comune", "Culex pipiens", "3"),
	("Salicaria", "Lythrum salicaria", "11"),
	("Ape europea", "Apis mellifera", "25"),
	("Cannuccia di palude", "Phragmites australis", "40"),
	("Cannaiola", "Acrocephalus scirpaceus", "Nessuna"),
	("Cuculo", "Cuculus canorus", "2"),
	("Nutria", "Myocastor coypus", "14"),
];

/// Source, target, interaction type.
const INTERACTIONS: &[(&str, &str, &str)] = &[
	("Ardea cinerea", "Pelophylax esculentus", "mangia"),
	("Ardea cinerea", "Pelophylax esculentus", "preda"),
	("Ardea cinerea", "Esox lucius", "mangia"),
	("Ardea cinerea", "Procambarus clarkii", "mangia"),
	("Ardea cinerea", "Natrix helvetica", "preda"),
	("Alcedo atthis", "Esox lucius", "mangia"),
	("Esox lucius", "Pelophylax esculentus", "preda"),
	("Esox lucius", "Anas platyrhynchos", "preda"),
	("Natrix helvetica", "Pelophylax esculentus", "mangia"),
	("Pelophylax esculentus", "Libellula depressa", "mangia"),
	("Pelophylax esculentus", "Culex pipiens", "mangia"),
	("Libellula depressa", "Culex pipiens", "preda"),
	("Culex pipiens", "Anas platyrhynchos", "è vettore di"),
	("Lythrum salicaria", "Apis mellifera", "fiore visitato da"),
	("Lythrum salicaria", "Libellula depressa", "interagisce con"),
	("Phragmites australis", "Acrocephalus scirpaceus", "ospite di"),
	("Cuculus canorus", "Acrocephalus scirpaceus", "interagisce con"),
	("Myocastor coypus", "Phragmites australis", "mangia"),
	("Procambarus clarkii", "Phragmites australis", "mangia"),
	("Anas platyrhynchos", "Lythrum salicaria", "ha come vettore di dispersione"),
];

fn image_for(scientific_name: &str) -> String {
	format!("img/{}.jpg", scientific_name.replace(char::is_whitespace, "_"))
}

/// The wetland survey bundled with the app.
fn sample_data() -> GraphData {
	let species = SPECIES
		.iter()
		.map(|&(name, scientific_name, observations)| SpeciesRecord {
			scientific_name: scientific_name.into(),
			name: name.into(),
			image: image_for(scientific_name),
			observations: observations.into(),
		})
		.collect();
	let interactions = INTERACTIONS
		.iter()
		.map(|&(source, target, kind)| InteractionRecord {
			source: source.into(),
			target: target.into(),
			kind: kind.into(),
		})
		.collect();
	GraphData {
		species,
		interactions,
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_data);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=graph_data fullscreen=true />
				<div class="graph-overlay">
					<h1>"Rete delle interazioni"</h1>
					<p class="subtitle">
						"Clicca una specie o un'interazione per i dettagli. Spazio per ripristinare."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphConfig, GraphModel};

	#[test]
	fn sample_interactions_reference_known_species() {
		let data = sample_data();
		let model = GraphModel::new(&data, &GraphConfig::default());
		assert_eq!(model.interactions.len(), INTERACTIONS.len());
		assert_eq!(
			model.most_connected().map(|s| s.scientific_name.as_str()),
			Some("Pelophylax esculentus")
		);
	}
}
