// Main library file for the airline network

// Core data structures
pub mod linked_list;
pub mod graph;
pub mod directory;

// Records and the layers built on top of the core
pub mod airport;
pub mod account;
pub mod booking;
pub mod config;
pub mod network;

// Re-export key types for convenience
pub use account::{Account, AccountError};
pub use airport::{Airport, AirportError};
pub use booking::{BookingError, Quote, Ticket, Wallet};
pub use config::{ConfigError, NetworkConfig};
pub use directory::{AccountTable, DirectoryError, SlotState};
pub use graph::{Graph, GraphError, GraphKind, Vertex};
pub use linked_list::{Cursor, Edge, LinkedList, Weight};
pub use network::AirlineNetwork;
