//! Graph index and connection finder.
//!
//! Builds an in-memory bipartite graph (people on one side, movies on
//! the other) from a completed ingestion batch and answers shortest-
//! connection queries over it with breadth-first search. The index is
//! built once and never mutated afterwards, so concurrent reads are
//! safe without locking.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::{Graph, NodeIndex};
use petgraph::Undirected;

use crate::error::{DegreesError, Result};
use crate::types::{Dataset, Hop, Movie, Person};

/// Node weight in the bipartite graph: the owning table's id.
#[derive(Clone, Debug)]
enum GraphNode {
    Person(String),
    Movie(String),
}

/// Read-only index over people, movies, and their appearance edges.
///
/// Holds id-keyed Person/Movie tables, the bipartite adjacency graph,
/// and a case-insensitive name-to-ids multimap. Edges referencing an
/// unknown person or movie are dropped at build time; duplicate ids
/// overwrite the earlier record (last write wins); duplicate appearance
/// pairs collapse to a single edge.
pub struct DegreesGraph {
    graph: Graph<GraphNode, (), Undirected>,
    person_nodes: HashMap<String, NodeIndex>,
    movie_nodes: HashMap<String, NodeIndex>,
    people: HashMap<String, Person>,
    movies: HashMap<String, Movie>,
    names: HashMap<String, Vec<String>>,
    dropped_appearances: usize,
    skipped_rows: usize,
}

/// Normalization applied to name-index keys and lookups.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl DegreesGraph {
    /// Build the index from a completed ingestion batch.
    ///
    /// Single linear pass over each input: people and movies first
    /// (overwrite on duplicate id), then appearance edges with both
    /// endpoints checked before insertion, then the name index.
    pub fn build(dataset: Dataset) -> Self {
        let mut graph = Graph::new_undirected();

        let mut people = HashMap::with_capacity(dataset.people.len());
        let mut person_order = Vec::with_capacity(dataset.people.len());
        for person in dataset.people {
            if !people.contains_key(&person.id) {
                person_order.push(person.id.clone());
            }
            people.insert(person.id.clone(), person);
        }

        let mut movies = HashMap::with_capacity(dataset.movies.len());
        let mut movie_order = Vec::with_capacity(dataset.movies.len());
        for movie in dataset.movies {
            if !movies.contains_key(&movie.id) {
                movie_order.push(movie.id.clone());
            }
            movies.insert(movie.id.clone(), movie);
        }

        // Every person and movie gets a node up front, so ids with no
        // appearances still exist in the graph with an empty adjacency.
        let mut person_nodes = HashMap::with_capacity(person_order.len());
        for id in &person_order {
            let node = graph.add_node(GraphNode::Person(id.clone()));
            person_nodes.insert(id.clone(), node);
        }
        let mut movie_nodes = HashMap::with_capacity(movie_order.len());
        for id in &movie_order {
            let node = graph.add_node(GraphNode::Movie(id.clone()));
            movie_nodes.insert(id.clone(), node);
        }

        // Appearance edges: both endpoints must exist or the edge is
        // dropped (dangling references are expected noise in cast data).
        // update_edge makes repeated pairs idempotent.
        let mut dropped_appearances = 0;
        for appearance in &dataset.appearances {
            match (
                person_nodes.get(&appearance.person_id),
                movie_nodes.get(&appearance.movie_id),
            ) {
                (Some(&person), Some(&movie)) => {
                    graph.update_edge(person, movie, ());
                }
                _ => dropped_appearances += 1,
            }
        }
        if dropped_appearances > 0 {
            tracing::debug!(
                dropped = dropped_appearances,
                "dropped appearance edges with unknown person or movie"
            );
        }

        let mut names: HashMap<String, Vec<String>> = HashMap::new();
        for id in &person_order {
            let person = &people[id];
            names
                .entry(normalize_name(&person.name))
                .or_default()
                .push(id.clone());
        }

        Self {
            graph,
            person_nodes,
            movie_nodes,
            people,
            movies,
            names,
            dropped_appearances,
            skipped_rows: dataset.skipped_rows,
        }
    }

    /// Resolve a free-text name to candidate person ids.
    ///
    /// Exact case-insensitive match only. Empty result means the name
    /// is unknown; more than one id means the caller must disambiguate.
    pub fn resolve_name(&self, name: &str) -> &[String] {
        self.names
            .get(&normalize_name(name))
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Find one shortest chain of shared-movie links between two people.
    ///
    /// Returns `Ok(Some(chain))` with one hop per degree of separation,
    /// `Ok(Some(vec![]))` when source and target are the same person,
    /// and `Ok(None)` when no connection exists. Both ids must be
    /// present in the index.
    pub fn find_connection(&self, source: &str, target: &str) -> Result<Option<Vec<Hop>>> {
        let start = self.person_node(source)?;
        let goal = self.person_node(target)?;
        if start == goal {
            return Ok(Some(Vec::new()));
        }

        // BFS over person nodes, expanding through each movie's cast.
        // Back-pointers record (via movie, from person) for the first
        // time a person is reached, which is also a shortest route.
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut parent: HashMap<NodeIndex, (NodeIndex, NodeIndex)> = HashMap::new();
        let mut queue = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(person) = queue.pop_front() {
            for movie in self.ordered_neighbors(person) {
                for costar in self.ordered_neighbors(movie) {
                    if visited.contains(&costar) {
                        continue;
                    }
                    visited.insert(costar);
                    parent.insert(costar, (movie, person));

                    if costar == goal {
                        return Ok(Some(self.reconstruct_chain(start, goal, &parent)));
                    }
                    queue.push_back(costar);
                }
            }
        }

        Ok(None)
    }

    /// Degrees of separation between two people: the chain length, or
    /// `None` when they are not connected.
    pub fn degrees(&self, source: &str, target: &str) -> Result<Option<usize>> {
        Ok(self
            .find_connection(source, target)?
            .map(|chain| chain.len()))
    }

    /// Look up a person record by id.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.get(id)
    }

    /// Look up a movie record by id.
    pub fn movie(&self, id: &str) -> Option<&Movie> {
        self.movies.get(id)
    }

    pub fn has_person(&self, id: &str) -> bool {
        self.people.contains_key(id)
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Number of admitted appearance edges (duplicates collapsed,
    /// dangling references excluded).
    pub fn appearance_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Appearance edges dropped at build time for referencing an
    /// unknown person or movie.
    pub fn dropped_appearances(&self) -> usize {
        self.dropped_appearances
    }

    /// Malformed rows skipped during ingestion of the source batch.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Ids of the movies a person appeared in, in input order.
    ///
    /// `None` means the person id is unknown; a person with no recorded
    /// appearances yields an empty list, so existence and neighbor
    /// queries agree.
    pub fn movies_of(&self, person_id: &str) -> Option<Vec<&str>> {
        let &node = self.person_nodes.get(person_id)?;
        Some(
            self.ordered_neighbors(node)
                .into_iter()
                .map(|n| self.movie_id_of(n))
                .collect(),
        )
    }

    /// Ids of the people who appeared in a movie, in input order.
    pub fn stars_of(&self, movie_id: &str) -> Option<Vec<&str>> {
        let &node = self.movie_nodes.get(movie_id)?;
        Some(
            self.ordered_neighbors(node)
                .into_iter()
                .map(|n| self.person_id_of(n))
                .collect(),
        )
    }

    fn person_node(&self, id: &str) -> Result<NodeIndex> {
        self.person_nodes
            .get(id)
            .copied()
            .ok_or_else(|| DegreesError::UnknownPerson { id: id.to_string() })
    }

    /// Neighbors of a node in edge-insertion order. petgraph walks the
    /// adjacency list newest-first, so the collected list is reversed
    /// to make tie-breaks reproduce the input order.
    fn ordered_neighbors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        neighbors.reverse();
        neighbors
    }

    fn reconstruct_chain(
        &self,
        start: NodeIndex,
        goal: NodeIndex,
        parent: &HashMap<NodeIndex, (NodeIndex, NodeIndex)>,
    ) -> Vec<Hop> {
        let mut hops = Vec::new();
        let mut current = goal;
        while current != start {
            let (movie, previous) = parent[&current];
            hops.push(Hop::new(
                self.person_id_of(previous),
                self.movie_id_of(movie),
                self.person_id_of(current),
            ));
            current = previous;
        }
        hops.reverse();
        hops
    }

    fn person_id_of(&self, node: NodeIndex) -> &str {
        match &self.graph[node] {
            GraphNode::Person(id) => id,
            GraphNode::Movie(id) => panic!("expected person node, found movie {id}"),
        }
    }

    fn movie_id_of(&self, node: NodeIndex) -> &str {
        match &self.graph[node] {
            GraphNode::Movie(id) => id,
            GraphNode::Person(id) => panic!("expected movie node, found person {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Appearance;

    fn person(id: &str, name: &str) -> Person {
        Person::new(id, name, None)
    }

    fn movie(id: &str, title: &str) -> Movie {
        Movie::new(id, title, None)
    }

    fn edge(person_id: &str, movie_id: &str) -> Appearance {
        Appearance::new(person_id, movie_id)
    }

    /// Path graph a-M1-b-M2-c-M3-d.
    fn path_dataset() -> Dataset {
        Dataset {
            people: vec![
                person("a", "Alice Park"),
                person("b", "Ben Ode"),
                person("c", "Cara Lim"),
                person("d", "Dan Roe"),
            ],
            movies: vec![movie("M1", "First"), movie("M2", "Second"), movie("M3", "Third")],
            appearances: vec![
                edge("a", "M1"),
                edge("b", "M1"),
                edge("b", "M2"),
                edge("c", "M2"),
                edge("c", "M3"),
                edge("d", "M3"),
            ],
            skipped_rows: 0,
        }
    }

    #[test]
    fn test_adjacency_symmetry() {
        let graph = DegreesGraph::build(path_dataset());
        for (person_id, movie_id) in [("a", "M1"), ("b", "M1"), ("b", "M2"), ("d", "M3")] {
            assert!(graph.movies_of(person_id).unwrap().contains(&movie_id));
            assert!(graph.stars_of(movie_id).unwrap().contains(&person_id));
        }
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let mut dataset = path_dataset();
        dataset.appearances.push(edge("a", "NOPE"));
        dataset.appearances.push(edge("NOBODY", "M1"));

        let graph = DegreesGraph::build(dataset);
        assert_eq!(graph.dropped_appearances(), 2);
        assert_eq!(graph.appearance_count(), 6);
        assert!(!graph.movies_of("a").unwrap().contains(&"NOPE"));
        assert!(!graph.stars_of("M1").unwrap().contains(&"NOBODY"));
    }

    #[test]
    fn test_duplicate_appearances_are_idempotent() {
        let mut dataset = path_dataset();
        dataset.appearances.push(edge("a", "M1"));
        dataset.appearances.push(edge("a", "M1"));

        let graph = DegreesGraph::build(dataset);
        assert_eq!(graph.appearance_count(), 6);
        assert_eq!(graph.movies_of("a").unwrap(), vec!["M1"]);
    }

    #[test]
    fn test_duplicate_ids_overwrite() {
        let mut dataset = path_dataset();
        dataset.people.push(person("a", "Alice Replaced"));

        let graph = DegreesGraph::build(dataset);
        assert_eq!(graph.person_count(), 4);
        assert_eq!(graph.person("a").unwrap().name, "Alice Replaced");
        assert_eq!(graph.resolve_name("alice replaced"), &["a".to_string()]);
        assert!(graph.resolve_name("alice park").is_empty());
    }

    #[test]
    fn test_isolated_person_has_explicit_empty_adjacency() {
        let mut dataset = path_dataset();
        dataset.people.push(person("e", "Eve Solo"));

        let graph = DegreesGraph::build(dataset);
        assert!(graph.has_person("e"));
        assert!(!graph.has_person("missing"));
        assert_eq!(graph.movies_of("e"), Some(Vec::new()));
        assert_eq!(graph.movies_of("missing"), None);
    }

    #[test]
    fn test_self_connection_is_zero_hops() {
        let graph = DegreesGraph::build(path_dataset());
        assert_eq!(graph.find_connection("a", "a").unwrap(), Some(Vec::new()));
        assert_eq!(graph.degrees("a", "a").unwrap(), Some(0));
    }

    #[test]
    fn test_shortest_path_on_path_graph() {
        let graph = DegreesGraph::build(path_dataset());
        let chain = graph.find_connection("a", "d").unwrap().unwrap();
        assert_eq!(
            chain,
            vec![
                Hop::new("a", "M1", "b"),
                Hop::new("b", "M2", "c"),
                Hop::new("c", "M3", "d"),
            ]
        );
    }

    #[test]
    fn test_connection_length_is_symmetric() {
        let graph = DegreesGraph::build(path_dataset());
        let forward = graph.degrees("a", "d").unwrap();
        let backward = graph.degrees("d", "a").unwrap();
        assert_eq!(forward, Some(3));
        assert_eq!(backward, Some(3));
    }

    #[test]
    fn test_disconnected_people_have_no_connection() {
        let mut dataset = path_dataset();
        dataset.people.push(person("x", "Xan Apart"));
        dataset.people.push(person("y", "Yve Apart"));
        dataset.movies.push(movie("M9", "Elsewhere"));
        dataset.appearances.push(edge("x", "M9"));
        dataset.appearances.push(edge("y", "M9"));

        let graph = DegreesGraph::build(dataset);
        // x-y are connected to each other but not to the a..d component.
        assert_eq!(graph.degrees("x", "y").unwrap(), Some(1));
        assert_eq!(graph.find_connection("a", "x").unwrap(), None);
        assert_eq!(graph.degrees("a", "x").unwrap(), None);
    }

    #[test]
    fn test_unknown_person_id_is_an_error() {
        let graph = DegreesGraph::build(path_dataset());
        assert!(matches!(
            graph.find_connection("a", "ghost"),
            Err(DegreesError::UnknownPerson { .. })
        ));
    }

    #[test]
    fn test_name_resolution_case_insensitive_and_ambiguous() {
        let mut dataset = path_dataset();
        dataset.people.push(person("j1", "Jane Doe"));
        dataset.people.push(person("j2", "Jane Doe"));

        let graph = DegreesGraph::build(dataset);
        let ids = graph.resolve_name("jane doe");
        assert_eq!(ids, &["j1".to_string(), "j2".to_string()]);
        assert_eq!(graph.resolve_name("JANE DOE"), ids);
        assert_eq!(graph.resolve_name("  Jane Doe  "), ids);
        assert!(graph.resolve_name("john doe").is_empty());
    }

    #[test]
    fn test_tie_break_prefers_first_loaded_movie() {
        // Two movies both link a and b; the first-loaded one wins.
        let dataset = Dataset {
            people: vec![person("a", "Alice Park"), person("b", "Ben Ode")],
            movies: vec![movie("M1", "First"), movie("M2", "Second")],
            appearances: vec![
                edge("a", "M1"),
                edge("b", "M1"),
                edge("a", "M2"),
                edge("b", "M2"),
            ],
            skipped_rows: 0,
        };

        let graph = DegreesGraph::build(dataset);
        let chain = graph.find_connection("a", "b").unwrap().unwrap();
        assert_eq!(chain, vec![Hop::new("a", "M1", "b")]);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let first = DegreesGraph::build(path_dataset());
        let second = DegreesGraph::build(path_dataset());

        assert_eq!(first.person_count(), second.person_count());
        assert_eq!(first.movie_count(), second.movie_count());
        assert_eq!(first.appearance_count(), second.appearance_count());
        for person_id in ["a", "b", "c", "d"] {
            let mut lhs = first.movies_of(person_id).unwrap();
            let mut rhs = second.movies_of(person_id).unwrap();
            lhs.sort_unstable();
            rhs.sort_unstable();
            assert_eq!(lhs, rhs);
        }
        assert_eq!(
            first.find_connection("a", "d").unwrap(),
            second.find_connection("a", "d").unwrap()
        );
    }

    #[test]
    fn test_large_ensemble_cast_expands_correctly() {
        // One big ensemble movie: everyone in it is one hop from
        // everyone else, through the quadratic per-movie expansion.
        let cast: Vec<Person> = (0..50)
            .map(|i| person(&format!("p{i}"), &format!("Person {i}")))
            .collect();
        let appearances: Vec<Appearance> =
            (0..50).map(|i| edge(&format!("p{i}"), "BIG")).collect();
        let dataset = Dataset {
            people: cast,
            movies: vec![movie("BIG", "Ensemble")],
            appearances,
            skipped_rows: 0,
        };

        let graph = DegreesGraph::build(dataset);
        assert_eq!(graph.degrees("p0", "p49").unwrap(), Some(1));
        assert_eq!(graph.stars_of("BIG").unwrap().len(), 50);
    }
}
