mod test_util;
mod test_graph_store;
mod test_app;
