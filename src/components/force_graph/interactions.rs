const DESCRIPTIONS: &[(&str, &str)] = &[
	(
		"è vettore di",
		"A è un vettore per B se trasporta e trasmette un patogeno infettivo in un altro organismo vivente.",
	),
	(
		"ha come vettore di dispersione",
		"A ha come vettore di dispersione B se B trasporta e trasmette un patogeno infettivo in un altro organismo vivente.",
	),
	(
		"interagisce con",
		"Questa relazione e tutte le sotto-relazioni possono essere applicate a (1) coppie di entità che interagiscono in qualsiasi momento del tempo (2) popolazioni o specie di entità i cui membri hanno la tendenza ad interagire (3) classi i cui membri hanno la tendenza ad interagire.",
	),
	(
		"mangia",
		"Notare che questa interazione può riferirsi anche a individui cuccioli della specie, o a individui che devono ancora nascere, come ad esempio nel caso delle uova.",
	),
	(
		"preda",
		"Interazione che coinvolge un processo di predazione, in cui il soggetto uccide il bersaglio per mangiarlo o per nutrire fratelli, figli o membri del gruppo.",
	),
	(
		"predato da",
		"Il soggetto subisce un processo di predazione, in cui viene ucciso per essere mangiato o per nutrire fratelli, figli o membri del gruppo del predatore.",
	),
	(
		"fiore visitato da",
		"Un animale o un insetto interagisce con il fiore, in genere allo scopo di ottenere cibo o risorse come nettare e polline.",
	),
	(
		"ospite di",
		"Si riferisce all'organismo più grande o dominante in una relazione simbiotica. Questo organismo fornisce l'habitat o l'ambiente per un altro organismo, spesso indicato come il simbionte o parassita.",
	),
];

/// Descriptive text for an interaction type; empty for unknown types.
pub fn describe(kind: &str) -> &'static str {
	DESCRIPTIONS
		.iter()
		.find(|(k, _)| *k == kind)
		.map(|(_, text)| *text)
		.unwrap_or("")
}

#[cfg(test)]
mod tests {
	use super::describe;

	#[test]
	fn known_kind_has_description() {
		assert!(describe("preda").starts_with("Interazione che coinvolge"));
	}

	#[test]
	fn unknown_kind_is_empty() {
		assert_eq!(describe("balla con"), "");
		assert_eq!(describe(""), "");
	}
}
