pub mod cluster;
pub mod project;
pub mod serve;
