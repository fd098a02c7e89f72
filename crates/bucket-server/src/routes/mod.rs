pub mod buckets;
pub mod cluster;
pub mod timeline;
