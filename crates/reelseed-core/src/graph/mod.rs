pub mod dag;
pub mod topo;
