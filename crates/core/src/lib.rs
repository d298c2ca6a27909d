//! Core types: math re-exports and bounds shared by loaders and tools.

pub use glam::{Vec2, Vec3, vec2, vec3};

pub mod bounds;

pub use bounds::Aabb;
