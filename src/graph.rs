// Route graph: a fixed-capacity adjacency-list graph of airports.
//
// Vertices are appended in index order and never removed, so a vertex index stays
// valid for the whole lifetime of the graph. Every lookup by airport id or code is a
// linear scan over the vertex array, which is fine for the tens of airports the
// network holds but will not scale to large graphs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::airport::{Airport, AirportError};
use crate::linked_list::{Cursor, Edge, LinkedList, Weight};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Graph capacity must be greater than zero")]
    InvalidCapacity,

    #[error("Graph is full: capacity {0} reached")]
    Full(usize),

    #[error("Airport {0} is already in the graph")]
    DuplicateAirport(i32),

    #[error("Airport code {0} is already in the graph")]
    DuplicateCode(String),

    #[error("Airport {0} not found")]
    AirportNotFound(i32),

    #[error("Invalid airport: {0}")]
    InvalidAirport(#[from] AirportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    #[default]
    Undirected,
    Directed,
}

// A vertex owns its airport and, once it has an outgoing route, a neighbor list.
#[derive(Debug, Clone)]
pub struct Vertex {
    airport: Airport,
    neighbors: Option<LinkedList>,
}

impl Vertex {
    fn new(airport: Airport) -> Self {
        Self {
            airport,
            neighbors: None,
        }
    }

    pub fn airport(&self) -> &Airport {
        &self.airport
    }

    pub fn has_neighbors(&self) -> bool {
        self.neighbors.as_ref().is_some_and(|list| !list.is_empty())
    }

    pub fn neighbors(&self) -> Option<&LinkedList> {
        self.neighbors.as_ref()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.as_ref().map_or(0, LinkedList::len)
    }

    /// Cursor at the first neighbor, `None` for a vertex without routes.
    /// The cursor belongs to the caller; nested walks over the same vertex are fine.
    pub fn start(&self) -> Option<Cursor<'_>> {
        self.neighbors.as_ref().map(LinkedList::cursor_front)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.neighbors.iter().flat_map(LinkedList::iter)
    }

    fn find_neighbor(&self, index: usize) -> Option<&Edge> {
        self.neighbors.as_ref()?.find(index).current()
    }

    // Returns false when a record for `index` already exists.
    fn insert(&mut self, index: usize, weight: Weight) -> bool {
        let list = self.neighbors.get_or_insert_with(LinkedList::new);
        if list.contains(index) {
            return false;
        }
        list.push_back(index, weight);
        true
    }
}

#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    capacity: usize,
    kind: GraphKind,
}

impl Graph {
    pub fn new(capacity: usize, kind: GraphKind) -> Result<Self, GraphError> {
        if capacity == 0 {
            return Err(GraphError::InvalidCapacity);
        }

        Ok(Self {
            vertices: Vec::with_capacity(capacity),
            capacity,
            kind,
        })
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.vertices.len() == self.capacity
    }

    /// Builds the airport payload and appends it as the next vertex.
    /// Returns the index of the new vertex.
    pub fn add_vertex(
        &mut self,
        id: i32,
        code: &str,
        city: &str,
        name: &str,
        utc_offset: i8,
    ) -> Result<usize, GraphError> {
        let airport = Airport::new(id, code, city, name, utc_offset)?;
        self.add_airport(airport)
    }

    pub fn add_airport(&mut self, airport: Airport) -> Result<usize, GraphError> {
        if self.is_full() {
            warn!(id = airport.id, capacity = self.capacity, "graph full, airport rejected");
            return Err(GraphError::Full(self.capacity));
        }
        airport.validate()?;
        if self.index_of(airport.id).is_some() {
            return Err(GraphError::DuplicateAirport(airport.id));
        }
        if self.index_of_code(&airport.code).is_some() {
            return Err(GraphError::DuplicateCode(airport.code));
        }

        let index = self.vertices.len();
        debug!(index, id = airport.id, code = %airport.code, "vertex added");
        self.vertices.push(Vertex::new(airport));

        Ok(index)
    }

    pub fn add_edge(&mut self, from: i32, to: i32) -> Result<bool, GraphError> {
        self.add_weighted_edge(from, to, 0)
    }

    /// Adds a route between the airports with ids `from` and `to`.
    ///
    /// For an undirected graph the mirrored record is added as well. Adding an
    /// existing route changes nothing and returns `Ok(false)`. An unknown id
    /// leaves the graph untouched.
    pub fn add_weighted_edge(
        &mut self,
        from: i32,
        to: i32,
        weight: Weight,
    ) -> Result<bool, GraphError> {
        let Some(from_idx) = self.index_of(from) else {
            warn!(from, to, "route rejected, unknown origin");
            return Err(GraphError::AirportNotFound(from));
        };
        let Some(to_idx) = self.index_of(to) else {
            warn!(from, to, "route rejected, unknown destination");
            return Err(GraphError::AirportNotFound(to));
        };

        let inserted = self.vertices[from_idx].insert(to_idx, weight);

        if self.kind == GraphKind::Undirected {
            self.vertices[to_idx].insert(from_idx, weight);
        }

        if inserted {
            debug!(from, to, weight, "route added");
        }

        Ok(inserted)
    }

    /// Weight of the edge between two vertex indices, `None` if either index is
    /// out of range or there is no such edge.
    pub fn weight(&self, from_idx: usize, to_idx: usize) -> Option<Weight> {
        if to_idx >= self.vertices.len() {
            return None;
        }
        self.vertex(from_idx)?
            .find_neighbor(to_idx)
            .map(|edge| edge.weight)
    }

    pub fn weight_by_key(&self, from: i32, to: i32) -> Option<Weight> {
        self.weight(self.index_of(from)?, self.index_of(to)?)
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn airport(&self, index: usize) -> Option<&Airport> {
        self.vertex(index).map(Vertex::airport)
    }

    pub fn vertex_by_key(&self, id: i32) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.airport.id == id)
    }

    pub fn index_of(&self, id: i32) -> Option<usize> {
        self.vertices.iter().position(|v| v.airport.id == id)
    }

    // Exact match, so "MEX" does not match "MEXX" or "me".
    pub fn index_of_code(&self, code: &str) -> Option<usize> {
        self.vertices.iter().position(|v| v.airport.code == code)
    }

    pub fn vertex_by_code(&self, code: &str) -> Option<&Vertex> {
        self.vertex(self.index_of_code(code)?)
    }

    /// True when `dest` is in the neighbor list of `src`.
    pub fn is_neighbor(&self, dest: &Airport, src: &Airport) -> bool {
        match (self.index_of(src.id), self.index_of(dest.id)) {
            (Some(src_idx), Some(dest_idx)) => self.vertices[src_idx]
                .find_neighbor(dest_idx)
                .is_some(),
            _ => false,
        }
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter()
    }

    pub fn airports(&self) -> impl Iterator<Item = &Airport> + '_ {
        self.vertices.iter().map(Vertex::airport)
    }

    // Every stored edge record as (from index, to index, weight). An undirected
    // route shows up once per direction.
    pub fn routes(&self) -> impl Iterator<Item = (usize, usize, Weight)> + '_ {
        self.vertices.iter().enumerate().flat_map(|(from, vertex)| {
            vertex.edges().map(move |edge| (from, edge.target, edge.weight))
        })
    }

    // `[MEX] Ciudad de México` lines, one per airport
    pub fn airport_listing(&self) -> String {
        self.airports().map(|a| format!("{a}\n")).collect()
    }
}

// Report form, one line per vertex: `[0]100=>200->300->Nil`
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, vertex) in self.vertices.iter().enumerate() {
            write!(f, "[{}]{}=>", index, vertex.airport.id)?;

            if let Some(mut cursor) = vertex.start() {
                while let Some(edge) = cursor.current() {
                    if let Some(neighbor) = self.airport(edge.target) {
                        write!(f, "{}->", neighbor.id)?;
                    }
                    cursor.move_next();
                }
            }

            writeln!(f, "Nil")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_airports(kind: GraphKind) -> Graph {
        let mut graph = Graph::new(4, kind).unwrap();
        graph
            .add_vertex(1, "MEX", "Ciudad de México", "Benito Juárez", -6)
            .unwrap();
        graph
            .add_vertex(2, "ACA", "Acapulco", "General Juan N. Álvarez", -6)
            .unwrap();
        graph
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert_eq!(
            Graph::new(0, GraphKind::Directed).unwrap_err(),
            GraphError::InvalidCapacity
        );
    }

    #[test]
    fn test_add_vertex_up_to_capacity() {
        let mut graph = Graph::new(3, GraphKind::Undirected).unwrap();
        let rows = [
            (100, "MEX", "Ciudad de México", "Benito Juárez", -6),
            (500, "CUN", "Cancún", "Internacional de Cancún", -5),
            (1000, "CUA", "Ciudad Constitución", "Ciudad Constitución", -7),
        ];

        for (i, (id, code, city, name, utc)) in rows.iter().enumerate() {
            assert_eq!(graph.add_vertex(*id, code, city, name, *utc), Ok(i));
        }
        assert_eq!(graph.len(), 3);
        assert!(graph.is_full());

        for (i, (id, code, city, name, utc)) in rows.iter().enumerate() {
            let airport = graph.airport(i).unwrap();
            assert_eq!(airport.id, *id);
            assert_eq!(airport.code, *code);
            assert_eq!(airport.city, *city);
            assert_eq!(airport.name, *name);
            assert_eq!(airport.utc_offset, *utc);
        }

        assert_eq!(
            graph.add_vertex(7, "CTM", "Chetumal", "Chetumal", -5),
            Err(GraphError::Full(3))
        );
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_duplicate_airports_are_rejected() {
        let mut graph = two_airports(GraphKind::Undirected);
        assert_eq!(
            graph.add_vertex(1, "XXX", "City", "Name", 0),
            Err(GraphError::DuplicateAirport(1))
        );
        assert_eq!(
            graph.add_vertex(3, "MEX", "City", "Name", 0),
            Err(GraphError::DuplicateCode("MEX".to_string()))
        );
        assert!(matches!(
            graph.add_vertex(3, "TOOLONG", "City", "Name", 0),
            Err(GraphError::InvalidAirport(AirportError::InvalidCode(_)))
        ));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_undirected_weighted_edge_is_mirrored() {
        let mut graph = two_airports(GraphKind::Undirected);

        assert_eq!(graph.add_weighted_edge(1, 2, 300), Ok(true));
        assert_eq!(graph.weight_by_key(1, 2), Some(300));
        assert_eq!(graph.weight_by_key(2, 1), Some(300));
        assert_eq!(graph.weight(0, 1), Some(300));
        assert_eq!(graph.weight(1, 0), Some(300));

        let mex = graph.airport(0).unwrap().clone();
        let aca = graph.airport(1).unwrap().clone();
        assert!(graph.is_neighbor(&aca, &mex));
        assert!(graph.is_neighbor(&mex, &aca));
    }

    #[test]
    fn test_directed_edge_is_one_way() {
        let mut graph = two_airports(GraphKind::Directed);
        graph.add_weighted_edge(1, 2, 300).unwrap();

        assert_eq!(graph.weight(0, 1), Some(300));
        assert_eq!(graph.weight(1, 0), None);

        let mex = graph.airport(0).unwrap().clone();
        let aca = graph.airport(1).unwrap().clone();
        assert!(graph.is_neighbor(&aca, &mex));
        assert!(!graph.is_neighbor(&mex, &aca));
        assert!(!graph.vertex(1).unwrap().has_neighbors());
    }

    #[test]
    fn test_unknown_key_mutates_nothing() {
        let mut graph = two_airports(GraphKind::Undirected);

        assert_eq!(
            graph.add_weighted_edge(1, 99, 10),
            Err(GraphError::AirportNotFound(99))
        );
        assert_eq!(
            graph.add_weighted_edge(99, 2, 10),
            Err(GraphError::AirportNotFound(99))
        );
        assert!(graph.vertices().all(|v| v.neighbors().is_none()));
        assert_eq!(graph.routes().count(), 0);
    }

    #[test]
    fn test_readding_edge_is_noop() {
        let mut graph = two_airports(GraphKind::Undirected);
        assert_eq!(graph.add_weighted_edge(1, 2, 300), Ok(true));
        assert_eq!(graph.add_weighted_edge(1, 2, 999), Ok(false));
        assert_eq!(graph.add_weighted_edge(2, 1, 5), Ok(false));

        assert_eq!(graph.vertex(0).unwrap().degree(), 1);
        assert_eq!(graph.vertex(1).unwrap().degree(), 1);
        assert_eq!(graph.weight(0, 1), Some(300));
    }

    #[test]
    fn test_zero_weight_is_not_missing() {
        let mut graph = two_airports(GraphKind::Undirected);
        graph.add_edge(1, 2).unwrap();

        assert_eq!(graph.weight(0, 1), Some(0));
        assert_eq!(graph.weight(0, 0), None);
        assert_eq!(graph.weight(0, 7), None);
        assert_eq!(graph.weight(7, 0), None);
        assert_eq!(graph.weight_by_key(1, 42), None);
    }

    #[test]
    fn test_lookups() {
        let graph = two_airports(GraphKind::Undirected);

        assert_eq!(graph.index_of(2), Some(1));
        assert_eq!(graph.index_of(3), None);
        assert_eq!(graph.index_of_code("ACA"), Some(1));
        assert_eq!(graph.index_of_code("AC"), None);
        assert_eq!(graph.index_of_code("ACAX"), None);
        assert_eq!(graph.index_of_code("aca"), None);
        assert_eq!(graph.vertex_by_key(1).unwrap().airport().code, "MEX");
        assert_eq!(graph.vertex_by_code("MEX").unwrap().airport().id, 1);
        assert!(graph.vertex(2).is_none());
        assert!(graph.airport(5).is_none());
    }

    #[test]
    fn test_is_neighbor_with_foreign_airport() {
        let mut graph = two_airports(GraphKind::Undirected);
        graph.add_weighted_edge(1, 2, 300).unwrap();

        let mex = graph.airport(0).unwrap().clone();
        let stranger = Airport::new(77, "ZZZ", "Nowhere", "Nowhere", 0).unwrap();
        assert!(!graph.is_neighbor(&stranger, &mex));
        assert!(!graph.is_neighbor(&mex, &stranger));
    }

    #[test]
    fn test_report_and_listing() {
        let mut graph = two_airports(GraphKind::Undirected);
        graph.add_weighted_edge(1, 2, 300).unwrap();

        assert_eq!(graph.to_string(), "[0]1=>2->Nil\n[1]2=>1->Nil\n");
        assert_eq!(
            graph.airport_listing(),
            "[MEX] Ciudad de México\n[ACA] Acapulco\n"
        );

        let routes: Vec<_> = graph.routes().collect();
        assert_eq!(routes, vec![(0, 1, 300), (1, 0, 300)]);
    }
}
