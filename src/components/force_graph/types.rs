/// One row of the species table, keyed by its scientific name.
#[derive(Clone, Debug)]
pub struct SpeciesRecord {
	/// Unique key; interactions refer to species by it.
	pub scientific_name: String,
	/// Common name.
	pub name: String,
	/// Portrait URL.
	pub image: String,
	/// Raw observation count, see [`Observations::parse`].
	pub observations: String,
}

/// One row of the interactions table. `source` and `target` reference
/// [`SpeciesRecord::scientific_name`].
#[derive(Clone, Debug)]
pub struct InteractionRecord {
	/// Scientific name of the subject.
	pub source: String,
	/// Scientific name of the object.
	pub target: String,
	/// Interaction type, e.g. `"mangia"`.
	pub kind: String,
}

/// The two input tables.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	/// Species rows.
	pub species: Vec<SpeciesRecord>,
	/// Interaction rows.
	pub interactions: Vec<InteractionRecord>,
}

/// Sentinel used by the species table for "never observed".
pub const NO_OBSERVATIONS: &str = "Nessuna";

/// Observation count of a species. A malformed count is kept as `NaN` and
/// shows up as such in the info panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observations(pub f64);

impl Observations {
	/// Reads a count the way JavaScript's unary `+` does. The exact sentinel
	/// and blank text are zero; surrounding whitespace is ignored for numbers
	/// only. Anything else non-numeric is `NaN`.
	pub fn parse(raw: &str) -> Self {
		if raw == NO_OBSERVATIONS {
			return Self(0.0);
		}
		let raw = raw.trim();
		if raw.is_empty() {
			return Self(0.0);
		}
		// Rust also reads "inf", "infinity" and "nan" in any case.
		if raw
			.trim_start_matches(['+', '-'])
			.starts_with(|c: char| c.is_ascii_alphabetic())
		{
			return Self(match raw {
				"Infinity" | "+Infinity" => f64::INFINITY,
				"-Infinity" => f64::NEG_INFINITY,
				_ => f64::NAN,
			});
		}
		Self(raw.parse::<f64>().unwrap_or(f64::NAN))
	}

	/// True for a count of exactly zero; `NaN` is not zero.
	pub fn is_zero(self) -> bool {
		self.0 == 0.0
	}
}

impl std::fmt::Display for Observations {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.0.is_nan() {
			f.write_str("NaN")
		} else {
			write!(f, "{}", self.0)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sentinel_maps_to_zero() {
		assert!(Observations::parse("Nessuna").is_zero());
		assert!(Observations::parse("").is_zero());
	}

	#[test]
	fn numeric_counts_parse() {
		assert_eq!(Observations::parse(" 12 "), Observations(12.0));
		assert_eq!(Observations::parse("12").to_string(), "12");
	}

	#[test]
	fn malformed_count_is_nan() {
		let obs = Observations::parse("molte");
		assert!(obs.0.is_nan());
		assert!(!obs.is_zero());
		assert_eq!(obs.to_string(), "NaN");
	}

	#[test]
	fn only_the_exact_sentinel_means_none() {
		assert!(Observations::parse(" Nessuna").0.is_nan());
		assert!(Observations::parse("nessuna").0.is_nan());
		assert!(Observations::parse("   ").is_zero());
	}

	#[test]
	fn float_spellings_follow_number_coercion() {
		for raw in ["inf", "infinity", "-inf", "NaN", "nan"] {
			assert!(Observations::parse(raw).0.is_nan(), "{raw}");
		}
		assert_eq!(Observations::parse("Infinity").0, f64::INFINITY);
		assert_eq!(Observations::parse("-Infinity").0, f64::NEG_INFINITY);
		assert_eq!(Observations::parse("1e2"), Observations(100.0));
	}
}
