//! # redecs_component
//!
//! The "E" and "C" of the ECS. Entities are bare identifiers; behaviour comes
//! from the component stores that happen to hold an entry for them.
//!
//! This crate provides:
//!
//! - [`Entity`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: monotonically increasing ID allocator.
//! - [`EntityRepository`]: the set of live entities and their tags.
//! - [`Component`] trait and [`ComponentTypeId`].
//! - [`ComponentStore`]: hash-indexed storage for one component kind.

pub mod component;
pub mod entity;
pub mod repository;
pub mod store;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use repository::EntityRepository;
pub use store::ComponentStore;
