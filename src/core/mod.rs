mod consts;
mod graph_store;
mod models;

pub use consts::*;
pub use graph_store::{GraphStore, letter_label};
pub use models::{Capacity, Edge, EdgeAttribute, NodeId, Query, Weight};
