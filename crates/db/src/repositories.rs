pub mod snapshot;
pub mod subscription;
