pub mod clock;
pub mod resource;
pub mod slot;
pub mod subscription;
