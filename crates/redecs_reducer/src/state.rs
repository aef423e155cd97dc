//! Shared state contracts.
//!
//! The state bag is an ordinary struct owned by the
//! [`GameLoop`](crate::GameLoop). Reducers see it through two traits: [`GameState`]
//! exposes the live entity set, and one [`ComponentAccess<C>`] impl per
//! component kind exposes that kind's store.

use redecs_component::{Component, ComponentStore, EntityRepository};

/// State that tracks live entities.
pub trait GameState {
    fn entities(&self) -> &EntityRepository;

    fn entities_mut(&mut self) -> &mut EntityRepository;

    /// The store for component kind `C`.
    fn store<C: Component>(&self) -> &ComponentStore<C>
    where
        Self: ComponentAccess<C>,
    {
        <Self as ComponentAccess<C>>::components(self)
    }

    /// Mutable store for component kind `C`.
    fn store_mut<C: Component>(&mut self) -> &mut ComponentStore<C>
    where
        Self: ComponentAccess<C>,
    {
        <Self as ComponentAccess<C>>::components_mut(self)
    }
}

/// Access to the store of one component kind.
///
/// Usually implemented with [`component_access!`](crate::component_access).
pub trait ComponentAccess<C: Component> {
    fn components(&self) -> &ComponentStore<C>;

    fn components_mut(&mut self) -> &mut ComponentStore<C>;
}

/// Implements [`ComponentAccess`] for each `field: Component` pair of a state
/// struct.
///
/// ```rust,ignore
/// component_access!(World { transforms: Transform, sprites: Sprite });
/// ```
#[macro_export]
macro_rules! component_access {
    ($state:ty { $($field:ident : $component:ty),* $(,)? }) => {
        $(
            impl $crate::ComponentAccess<$component> for $state {
                fn components(&self) -> &$crate::ComponentStore<$component> {
                    &self.$field
                }

                fn components_mut(&mut self) -> &mut $crate::ComponentStore<$component> {
                    &mut self.$field
                }
            }
        )*
    };
}
