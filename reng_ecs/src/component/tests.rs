#![cfg(test)]

use std::any::TypeId;

use super::*;
use crate::entity::EntityId;
use crate::error::EcsError;

#[derive(Debug, PartialEq)]
struct TestThing {
    test: i32,
}

impl From<i32> for TestThing {
    fn from(test: i32) -> Self {
        Self { test }
    }
}

/// Checks that every entity is paired with its own slot.
fn assert_paired<T>(container: &ComponentContainer<T>)
where
    T: Component,
{
    assert_eq!(container.all().len(), container.entity_ids().len());
    for (slot, &entity) in container.entity_ids().iter().enumerate() {
        assert_eq!(container.slot_of(entity), Some(slot));
        assert_eq!(container.entity_id(slot), Some(entity));
    }
}

#[test]
fn test_as_typed() {
    let container = ComponentContainer::<TestThing>::new();
    let erased: Box<dyn AnyContainer> = Box::new(container);

    assert!(erased.is::<TestThing>());
    assert_eq!(erased.component_type(), TypeId::of::<TestThing>());
    assert_eq!(erased.component_name(), "TestThing");

    let typed = erased.try_as::<TestThing>().unwrap();
    assert_eq!(typed.len(), 0);
    assert!(erased.try_as::<i32>().is_none());

    let typed = erased
        .try_into_typed::<TestThing>()
        .ok()
        .expect("container stores `TestThing`");
    assert!(typed.is_empty());
}

#[test]
fn test_wrong_type_recovery() {
    let erased: Box<dyn AnyContainer> = Box::new(ComponentContainer::<i32>::new());
    let erased = erased.try_into_typed::<u8>().err().unwrap();
    assert!(erased.is::<i32>());
}

#[test]
fn test_get_component() {
    let mut container = ComponentContainer::new();
    let e1 = EntityId::new(1);
    let e2 = EntityId::new(2);

    container.add(e1, 2).unwrap();
    container.add(e2, 99).unwrap();
    assert_eq!(
        container.add(e1, 3),
        Err(EcsError::DuplicateComponent {
            entity: e1,
            component: "i32",
        }),
    );

    assert_eq!(container.get(e1), Ok(&2));
    assert_eq!(container.all(), &[2, 99]);
    assert_eq!(container.entity_ids(), &[e1, e2]);
}

#[test]
fn test_get_entity_id() {
    let mut container = ComponentContainer::new();
    let e1 = EntityId::new(1);
    container.add(e1, 2).unwrap();

    assert_eq!(container.entity_id(0), Some(e1));
    assert_eq!(container.entity_id(1), None);
}

#[test]
fn test_add() {
    let id1 = EntityId::new(1);
    let id2 = EntityId::new(2);
    let mut container = ComponentContainer::<TestThing>::new();

    container.add(id1, 5.into()).unwrap();
    assert_eq!(container.all().len(), 1);
    assert_eq!(container.entity_ids().len(), 1);

    container.add(id2, 99.into()).unwrap();
    assert_eq!(container.all().len(), 2);
    assert_eq!(container.entity_ids().len(), 2);

    assert_eq!(container.all()[0].test, 5);
    assert_eq!(container.all()[1].test, 99);
}

#[test]
fn test_failed_add_keeps_state() {
    let id = EntityId::new(1);
    let mut container = ComponentContainer::<TestThing>::new();
    container.add(id, 5.into()).unwrap();

    assert!(container.add(id, 6.into()).is_err());
    assert_eq!(container.len(), 1);
    assert_eq!(container[id].test, 5);
    assert_paired(&container);
}

#[test]
fn test_remove() {
    let entity = EntityId::new(0);
    let mut container = ComponentContainer::<TestThing>::new();

    container.add(entity, 5.into()).unwrap();
    container.add(EntityId::new(1), 99.into()).unwrap();

    assert_eq!(container.remove(entity).unwrap().test, 5);
    assert_eq!(container.all().len(), 1);
    assert_eq!(container.entity_ids().len(), 1);
    assert_eq!(container.all()[0].test, 99);
    assert_eq!(container.entity_ids()[0], EntityId::new(1));
}

#[test]
fn test_remove_unknown() {
    let mut container = ComponentContainer::new();
    container.add(EntityId::new(1), 'a').unwrap();

    let missing = EntityId::new(2);
    assert_eq!(
        container.remove(missing),
        Err(EcsError::UnknownEntity {
            entity: missing,
            component: "char",
        }),
    );
    assert_eq!(container.len(), 1);
    assert!(container.get(missing).is_err());
}

#[test]
fn test_swap_with_last() {
    let mut container = ComponentContainer::new();
    for id in 0..5 {
        container.add(EntityId::new(id), id * 10).unwrap();
    }

    container.remove(EntityId::new(1)).unwrap();
    assert_eq!(container.all(), &[0, 40, 20, 30]);
    assert_paired(&container);

    container.remove(EntityId::new(3)).unwrap();
    assert_eq!(container.all(), &[0, 40, 20]);
    assert_paired(&container);

    container.remove(EntityId::new(0)).unwrap();
    container.remove(EntityId::new(2)).unwrap();
    container.remove(EntityId::new(4)).unwrap();
    assert!(container.is_empty());
    assert_paired(&container);
}

#[test]
fn test_pairing_after_mixed_mutations() {
    let mut container = ComponentContainer::new();
    let mut alive = Vec::new();
    for id in 0..32u64 {
        container.add(EntityId::new(id), id).unwrap();
        alive.push(id);
        if id % 3 == 2 {
            let victim = alive.remove((id as usize * 7) % alive.len());
            container.remove(EntityId::new(victim)).unwrap();
        }
        assert_paired(&container);
    }

    assert_eq!(container.len(), alive.len());
    for &id in &alive {
        assert_eq!(container[EntityId::new(id)], id);
    }
    for (entity, value) in container.iter() {
        assert_eq!(entity.get(), *value);
    }
}

#[test]
fn test_handles() {
    let mut container = ComponentContainer::new();
    let first = container.add(EntityId::new(1), "first").unwrap();
    let second = container.add(EntityId::new(2), "second").unwrap();
    let third = container.add(EntityId::new(3), "third").unwrap();

    assert_eq!(container.handle_slot(third), Ok(2));
    container.remove(EntityId::new(1)).unwrap();

    // third was moved into the freed slot, handle follows it
    assert_eq!(container.handle_slot(third), Ok(0));
    assert_eq!(container.resolve(third), Ok(&"third"));
    assert_eq!(container.resolve(second), Ok(&"second"));
    assert_eq!(
        container.resolve(first),
        Err(EcsError::StaleHandle { component: "&str" }),
    );

    // slot of the removed component is reused, stale handle must not alias it
    container.add(EntityId::new(4), "fourth").unwrap();
    assert!(container.resolve(first).is_err());
    assert_eq!(container.handle_of(EntityId::new(2)), Some(second));

    *container.resolve_mut(second).unwrap() = "changed";
    assert_eq!(container[EntityId::new(2)], "changed");
}

#[test]
#[should_panic]
fn test_index() {
    let mut container = ComponentContainer::new();

    let entity = EntityId::new(1);
    container.add(entity, 0).unwrap();
    container[entity] = 1;
    assert_eq!(container[entity], 1);

    let _component = container[EntityId::new(2)];
}

#[test]
fn test_iterator() {
    let mut container = ComponentContainer::new();
    for int in 0..100 {
        container.add(EntityId::new(int as u64), int).unwrap();
    }

    for component in &mut container {
        *component += 10;
    }
    for (component, value) in (&container).into_iter().zip(10..110) {
        assert_eq!(*component, value);
    }
    for (entity, component) in container.iter_mut() {
        *component -= entity.get() as i32;
    }
    assert!(container.all().iter().all(|&component| component == 10));

    // iteration is restartable
    let first: i32 = container.iter().map(|(_, component)| component).sum();
    let second: i32 = container.iter().map(|(_, component)| component).sum();
    assert_eq!(first, second);
}
