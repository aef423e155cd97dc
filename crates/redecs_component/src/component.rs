//! The [`Component`] trait and component type identity.
//!
//! [`ComponentTypeId`] is the FNV-1a 64-bit hash of the component's name, so
//! the same name always yields the same id. Lifecycle events carry it to say
//! which kind of component changed.

use serde::{Deserialize, Serialize};

/// Identifies a component kind. Derived from [`Component::type_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Hash a component name with FNV-1a 64-bit.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// The id of component type `C`.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self::from_name(C::type_name())
    }
}

/// Marker trait for data that can live in a [`ComponentStore`](crate::ComponentStore).
///
/// Components are plain values. `Send` is required because entity commands
/// carrying them may be produced by continuations resolved on another thread.
///
/// ```rust
/// use redecs_component::Component;
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// A human-readable name for this component type.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }
}
