mod json_export;
mod models;
mod presets;
mod random_graph;
mod registry;
mod session;

pub use json_export::get_json_data;
pub use models::{Evidence, MaxFlow, QuizKind, QuizState, SessionId, ShortestPath, Verdict};
pub use presets::{FLOW_SINK, FLOW_SOURCE, ROUTE_SOURCE, ROUTE_TARGET, flow_example, route_example};
pub use random_graph::RandomGraphGenerator;
pub use registry::SessionRegistry;
pub use session::QuizSession;
