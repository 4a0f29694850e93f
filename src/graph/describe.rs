//! Graphs generated from a short description such as "cyclic graph with 6
//! nodes" or "7node tree".
//!
//! The description names a shape by keyword and optionally a node count
//! (five when absent). Nodes are named A, B, C, ... in generation order.

use std::sync::OnceLock;

use regex::Regex;

use super::error::ParseError;
use super::parse::{Builder, Result};
use super::types::{GraphData, generate_node_id};

/// Node count used when the description gives none.
pub const DEFAULT_NODE_COUNT: usize = 5;
/// Largest graph a description may ask for.
pub const MAX_NODE_COUNT: usize = 100;

/// A family of graphs a description can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
	/// A DAG with an edge from every node to every later node. Always directed.
	Dag,
	/// Heap-shaped binary tree: node `i` is the parent of `2i + 1` and `2i + 2`.
	Tree,
	/// Complete bipartite graph between the first `n / 2` nodes and the rest.
	Bipartite,
	/// An edge between every pair of nodes.
	Complete,
	/// A single ring through every node.
	Cyclic,
}

impl Shape {
	/// Matching order: earlier shapes win when a description names several.
	pub const ALL: [Shape; 5] = [
		Shape::Dag,
		Shape::Tree,
		Shape::Bipartite,
		Shape::Complete,
		Shape::Cyclic,
	];

	/// Human-readable shape name.
	pub fn name(self) -> &'static str {
		match self {
			Shape::Dag => "DAG",
			Shape::Tree => "tree",
			Shape::Bipartite => "bipartite graph",
			Shape::Complete => "complete graph",
			Shape::Cyclic => "cycle",
		}
	}

	fn keywords(self) -> &'static str {
		match self {
			Shape::Dag => r"\b(?:dag|directed acyclic)\b",
			Shape::Tree => r"\b(?:trees?|acyclic connected)\b",
			Shape::Bipartite => r"\b(?:bipartite|two[- ]sets?)\b",
			Shape::Complete => r"\b(?:complete|fully connected|clique)\b",
			Shape::Cyclic => r"\b(?:cyclic|circular|cycle|ring|loop(?:ed)?)\b",
		}
	}

	fn min_nodes(self) -> usize {
		match self {
			Shape::Cyclic => 3,
			Shape::Bipartite => 2,
			_ => 1,
		}
	}

	/// Edges as index pairs over `n` nodes.
	fn edges(self, n: usize) -> Vec<(usize, usize)> {
		match self {
			Shape::Cyclic => (0..n).map(|i| (i, (i + 1) % n)).collect(),
			Shape::Tree => (1..n).map(|i| ((i - 1) / 2, i)).collect(),
			Shape::Complete | Shape::Dag => (0..n)
				.flat_map(|i| (i + 1..n).map(move |j| (i, j)))
				.collect(),
			Shape::Bipartite => {
				let half = n / 2;
				(0..half)
					.flat_map(|i| (half..n).map(move |j| (i, j)))
					.collect()
			}
		}
	}
}

struct Patterns {
	letter_digit: Regex,
	digit_letter: Regex,
	count: Regex,
	shapes: Vec<(Shape, Regex)>,
}

impl Patterns {
	fn new() -> std::result::Result<Self, regex::Error> {
		Ok(Self {
			letter_digit: Regex::new(r"([a-z]+)(\d+)")?,
			digit_letter: Regex::new(r"(\d+)([a-z]+)")?,
			count: Regex::new(r"(\d+)\s*(?:nodes?|vertex|vertices)\b")?,
			shapes: Shape::ALL
				.into_iter()
				.map(|shape| Regex::new(shape.keywords()).map(|re| (shape, re)))
				.collect::<std::result::Result<_, regex::Error>>()?,
		})
	}
}

static PATTERNS: OnceLock<std::result::Result<Patterns, regex::Error>> = OnceLock::new();

fn patterns() -> Result<&'static Patterns> {
	PATTERNS
		.get_or_init(Patterns::new)
		.as_ref()
		.map_err(|err| ParseError::Pattern(err.clone()))
}

/// Lowercases and splits glued runs like "6nodes" or "k5".
fn normalize(patterns: &Patterns, text: &str) -> String {
	let lower = text.to_lowercase();
	let spaced = patterns.digit_letter.replace_all(&lower, "$1 $2");
	patterns
		.letter_digit
		.replace_all(&spaced, "$1 $2")
		.into_owned()
}

fn find_shape(patterns: &Patterns, normalized: &str) -> Option<Shape> {
	patterns
		.shapes
		.iter()
		.find(|(_, re)| re.is_match(normalized))
		.map(|&(shape, _)| shape)
}

/// The shape named by `text`, if any.
pub fn shape_of(text: &str) -> Result<Option<Shape>> {
	let patterns = patterns()?;
	Ok(find_shape(patterns, &normalize(patterns, text)))
}

/// Builds the graph a description names. `directed` applies to every shape
/// but [`Shape::Dag`], which is always directed.
pub fn parse_description(text: &str, directed: bool) -> Result<GraphData> {
	let patterns = patterns()?;
	let normalized = normalize(patterns, text);
	let Some(shape) = find_shape(patterns, &normalized) else {
		return Err(ParseError::UnknownShape(text.trim().to_string()));
	};

	let count = match patterns.count.captures(&normalized) {
		Some(caps) => caps[1]
			.parse::<usize>()
			.map_err(|_| ParseError::NodeCount {
				count: caps[1].to_string(),
				max: MAX_NODE_COUNT,
			})?,
		None => DEFAULT_NODE_COUNT,
	};
	if count > MAX_NODE_COUNT {
		return Err(ParseError::NodeCount {
			count: count.to_string(),
			max: MAX_NODE_COUNT,
		});
	}
	if count < shape.min_nodes() {
		return Err(ParseError::TooFewNodes {
			shape: shape.name(),
			min: shape.min_nodes(),
		});
	}

	let ids: Vec<String> = (0..count).map(generate_node_id).collect();
	let mut builder = Builder::new(directed || shape == Shape::Dag);
	for id in &ids {
		builder.node(id);
	}
	for (a, b) in shape.edges(count) {
		builder.edge(&ids[a], &ids[b])?;
	}
	builder.finish()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphKind, classify};

	fn pairs(g: &GraphData) -> Vec<(&str, &str)> {
		g.edges
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str()))
			.collect()
	}

	#[test]
	fn test_shape_keywords() {
		assert_eq!(shape_of("A circular graph").unwrap(), Some(Shape::Cyclic));
		assert_eq!(shape_of("directed acyclic graph").unwrap(), Some(Shape::Dag));
		assert_eq!(shape_of("acyclic connected graph").unwrap(), Some(Shape::Tree));
		assert_eq!(shape_of("fully connected").unwrap(), Some(Shape::Complete));
		assert_eq!(shape_of("two set graph").unwrap(), Some(Shape::Bipartite));
		assert_eq!(shape_of("a star").unwrap(), None);
	}

	#[test]
	fn test_cycle_with_glued_count() {
		let g = parse_description("Cyclic graph with 4nodes", false).unwrap();
		assert!(!g.directed);
		assert_eq!(g.node_ids(), ["A", "B", "C", "D"]);
		assert_eq!(pairs(&g), [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
		assert_eq!(classify(&g), GraphKind::Cyclic);
	}

	#[test]
	fn test_tree_defaults_to_five_nodes() {
		let g = parse_description("a tree", true).unwrap();
		assert_eq!(pairs(&g), [("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
		assert_eq!(classify(&g), GraphKind::Tree);
	}

	#[test]
	fn test_dag_is_always_directed() {
		let g = parse_description("DAG of 4 nodes", false).unwrap();
		assert!(g.directed);
		assert_eq!(g.edges.len(), 6);
		assert_eq!(classify(&g), GraphKind::Dag);
	}

	#[test]
	fn test_complete_and_bipartite() {
		let g = parse_description("complete graph, 5 vertices", false).unwrap();
		assert_eq!(g.edges.len(), 10);

		let g = parse_description("bipartite 5 nodes", false).unwrap();
		assert_eq!(g.nodes.len(), 5);
		assert_eq!(g.edges.len(), 6);
		assert!(g.edges.iter().all(|e| ["A", "B"].contains(&e.source.as_str())));
	}

	#[test]
	fn test_description_errors() {
		assert!(matches!(
			parse_description("something pretty", false),
			Err(ParseError::UnknownShape(t)) if t == "something pretty"
		));
		assert!(matches!(
			parse_description("cycle with 2 nodes", false),
			Err(ParseError::TooFewNodes { min: 3, .. })
		));
		assert!(matches!(
			parse_description("tree with 500 nodes", false),
			Err(ParseError::NodeCount { max: MAX_NODE_COUNT, .. })
		));
		assert!(matches!(parse_description("tree with 0 nodes", false), Err(ParseError::TooFewNodes { .. })));
	}
}
