pub mod graph;
pub mod nodes;
pub mod tree;
