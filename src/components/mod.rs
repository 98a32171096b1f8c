/// Species-interaction graph: layout engine and canvas component.
pub mod force_graph;
