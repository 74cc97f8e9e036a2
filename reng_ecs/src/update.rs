//! Per-frame update of *components* in ECS.

use std::any::TypeId;
use std::time::Duration;

use crate::component::{component_name, Component, ComponentContainer};
use crate::database::ComponentDatabase;
use crate::error::Result;

/// Type which represents duration between two frames.
pub type DeltaTime = Duration;

/// Objects of this trait represent *component* which is updated every frame.
///
/// Register type of the component in [`ComponentDatabase::register_update`]
/// so the update pass will visit all its instances.
///
pub trait UpdateComponent: Component {
    /// Updates state of the component.
    ///
    /// Database gives access to components of other types.
    /// Components of the type being updated are not accessible through it.
    ///
    fn update(&mut self, delta_time: DeltaTime, database: &mut ComponentDatabase);
}

/// Entry of the dispatch table: updates all instances of one component type.
#[derive(Copy, Clone)]
pub(crate) struct Updater {
    pub type_id: TypeId,
    pub name: &'static str,
    pub run: fn(&mut ComponentDatabase, DeltaTime) -> Result<usize>,
}

impl Updater {
    pub fn of<T>() -> Self
    where
        T: UpdateComponent,
    {
        Self {
            type_id: TypeId::of::<T>(),
            name: component_name::<T>(),
            run: update_all::<T>,
        }
    }
}

/// Updates all components of type `T` in order of their slots.
///
/// Returns count of updated components.
///
fn update_all<T>(database: &mut ComponentDatabase, delta_time: DeltaTime) -> Result<usize>
where
    T: UpdateComponent,
{
    let container = match database.check_out::<T>()? {
        Some(container) => container,
        None => return Ok(0),
    };
    let mut checked_out = CheckedOut {
        database,
        container: Some(container),
    };
    let checked_out = &mut checked_out;
    let count = match checked_out.container.as_mut() {
        Some(container) => {
            for component in container.all_mut() {
                component.update(delta_time, &mut *checked_out.database);
            }
            container.len()
        }
        None => 0,
    };
    Ok(count)
}

/// Container taken out of the database for the update of its components.
///
/// Container is put back on drop, also when some update panics.
///
struct CheckedOut<'db, T>
where
    T: Component,
{
    database: &'db mut ComponentDatabase,
    container: Option<Box<ComponentContainer<T>>>,
}

impl<T> Drop for CheckedOut<'_, T>
where
    T: Component,
{
    fn drop(&mut self) {
        if let Some(container) = self.container.take() {
            self.database.check_in(container);
        }
    }
}
