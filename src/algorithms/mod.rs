pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;

pub use a_star::AStar;
pub use bfs::BreadthFirst;
pub use common::PathfindingAlgorithm;
pub use dfs::DepthFirst;
