use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::*;

/// Records every update call into shared journal.
struct Recorder {
    tag: &'static str,
    journal: Arc<Mutex<Vec<(&'static str, DeltaTime)>>>,
}

impl UpdateComponent for Recorder {
    fn update(&mut self, delta_time: DeltaTime, _: &mut ComponentDatabase) {
        self.journal.lock().unwrap().push((self.tag, delta_time));
    }
}

struct Other(Recorder);

impl UpdateComponent for Other {
    fn update(&mut self, delta_time: DeltaTime, database: &mut ComponentDatabase) {
        self.0.update(delta_time, database)
    }
}

struct Position(f32);

/// Moves position of its entity every frame.
struct Velocity {
    position: ComponentHandle<Position>,
    speed: f32,
}

impl UpdateComponent for Velocity {
    fn update(&mut self, delta_time: DeltaTime, database: &mut ComponentDatabase) {
        if let Ok(position) = database.resolve_mut(self.position) {
            position.0 += self.speed * delta_time.as_secs_f32();
        }
    }
}

/// Tries to access the database in a forbidden way.
#[derive(Default)]
struct Intruder {
    nested: Option<Result<usize>>,
    same_type: Option<Result<usize>>,
    lookup: Option<Result<bool>>,
    peek: Option<Result<usize>>,
}

impl UpdateComponent for Intruder {
    fn update(&mut self, delta_time: DeltaTime, database: &mut ComponentDatabase) {
        self.nested = Some(database.run_update(delta_time));
        self.same_type = Some(
            database
                .get_or_create_container::<Intruder>()
                .map(|container| container.len()),
        );
        self.lookup = Some(database.contains_component::<Intruder>(EntityId::new(1)));
        self.peek = Some(
            database
                .container::<Intruder>()
                .map(|container| container.map_or(0, |container| container.len())),
        );
    }
}

/// Removes its own entity while being updated.
struct SelfDestruct {
    entity: EntityId,
    removed: Option<Result<usize>>,
}

impl UpdateComponent for SelfDestruct {
    fn update(&mut self, _: DeltaTime, database: &mut ComponentDatabase) {
        self.removed = Some(database.remove_entity(self.entity));
    }
}

/// Panics in update while armed.
struct Fuse {
    armed: bool,
    updates: usize,
}

impl UpdateComponent for Fuse {
    fn update(&mut self, _: DeltaTime, _: &mut ComponentDatabase) {
        if self.armed {
            panic!("fuse blew up");
        }
        self.updates += 1;
    }
}

static DROPPED: AtomicUsize = AtomicUsize::new(0);

struct Tracked;

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPPED.fetch_add(1, Ordering::SeqCst);
    }
}

fn journal() -> Arc<Mutex<Vec<(&'static str, DeltaTime)>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn test_container_created_once() {
    let mut database = ComponentDatabase::new();
    assert!(database.container::<u32>().unwrap().is_none());

    database.get_or_create_container::<u32>().unwrap();
    database
        .get_or_create_container::<u32>()
        .unwrap()
        .add(EntityId::new(1), 1)
        .unwrap();
    let container = database.get_or_create_container::<u32>().unwrap();
    assert_eq!(container.len(), 1);
    assert_eq!(database.container_count(), 1);

    database.add_component(EntityId::new(1), 1.5f64).unwrap();
    assert_eq!(database.container_count(), 2);
}

#[test]
fn test_component_routing() {
    let mut database = ComponentDatabase::new();
    let e1 = EntityId::new(1);
    let e2 = EntityId::new(2);

    database.add_component(e1, 10u8).unwrap();
    database.add_component(e1, "name").unwrap();
    database.add_component(e2, 20u8).unwrap();

    assert_eq!(database.get_component::<u8>(e2), Ok(&20));
    assert_eq!(database.get_component::<&str>(e1), Ok(&"name"));
    assert_eq!(
        database.get_component::<&str>(e2),
        Err(EcsError::UnknownEntity {
            entity: e2,
            component: "&str",
        }),
    );
    assert!(matches!(
        database.add_component(e2, 30u8),
        Err(EcsError::DuplicateComponent { .. }),
    ));
    assert!(matches!(
        database.remove_component::<u16>(e1),
        Err(EcsError::UnknownEntity { .. }),
    ));

    *database.get_component_mut::<u8>(e1).unwrap() += 1;
    assert_eq!(database.remove_component::<u8>(e1), Ok(11));
    assert_eq!(database.container::<u8>().unwrap().unwrap().all(), &[20]);
}

#[test]
fn test_remove_entity() {
    let mut database = ComponentDatabase::new();
    let entity = EntityId::new(3);
    let other = EntityId::new(4);
    let handle = database.add_component(entity, 1u32).unwrap();
    database.add_component(entity, 'x').unwrap();
    database.add_component(other, 'y').unwrap();

    assert_eq!(database.remove_entity(entity), Ok(2));
    assert_eq!(database.remove_entity(entity), Ok(0));
    assert!(matches!(
        database.resolve(handle),
        Err(EcsError::StaleHandle { .. })
    ));
    assert_eq!(database.get_component::<char>(other), Ok(&'y'));
}

#[test]
fn test_update_calls() {
    let mut database = ComponentDatabase::new();
    let journal = journal();
    assert!(database.register_update::<Recorder>());
    assert!(database.register_update::<Other>());
    assert!(!database.register_update::<Recorder>());

    for id in 0..3 {
        let recorder = Recorder {
            tag: "recorder",
            journal: journal.clone(),
        };
        database.add_component(EntityId::new(id), recorder).unwrap();
        let other = Other(Recorder {
            tag: "other",
            journal: journal.clone(),
        });
        database.add_component(EntityId::new(id), other).unwrap();
    }

    let delta_time = Duration::from_millis(16);
    assert_eq!(database.run_update(delta_time), Ok(6));

    let journal = journal.lock().unwrap();
    assert_eq!(journal.len(), 6);
    assert!(journal.iter().all(|&(_, time)| time == delta_time));
    let tags: Vec<_> = journal.iter().map(|&(tag, _)| tag).collect();
    assert_eq!(
        tags,
        ["recorder", "recorder", "recorder", "other", "other", "other"],
    );
}

#[test]
fn test_update_order_follows_registration() {
    let mut database = ComponentDatabase::new();
    let journal = journal();
    database.register_update::<Other>();
    database.register_update::<Recorder>();

    let recorder = Recorder {
        tag: "recorder",
        journal: journal.clone(),
    };
    database.add_component(EntityId::new(1), recorder).unwrap();
    let other = Other(Recorder {
        tag: "other",
        journal: journal.clone(),
    });
    database.add_component(EntityId::new(1), other).unwrap();

    database.run_update(Duration::ZERO).unwrap();
    let tags: Vec<_> = journal.lock().unwrap().iter().map(|&(tag, _)| tag).collect();
    assert_eq!(tags, ["other", "recorder"]);
}

#[test]
fn test_update_without_components() {
    let mut database = ComponentDatabase::new();
    database.register_update::<Recorder>();
    assert_eq!(database.run_update(Duration::from_secs(1)), Ok(0));
    assert!(database.container::<Recorder>().unwrap().is_none());
}

#[test]
fn test_cross_component_update() {
    let mut database = ComponentDatabase::new();
    database.register_update::<Velocity>();

    let mut entity = Entity::new(EntityId::new(1), &mut database);
    let position = entity.emplace_component(Position(1.0)).unwrap();
    entity
        .emplace_component(Velocity {
            position,
            speed: 2.0,
        })
        .unwrap();

    database.run_update(Duration::from_millis(500)).unwrap();
    database.run_update(Duration::from_millis(500)).unwrap();
    let position = database.resolve(position).unwrap();
    assert!((position.0 - 3.0).abs() < f32::EPSILON);
}

#[test]
fn test_forbidden_access_during_update() {
    let mut database = ComponentDatabase::new();
    database.register_update::<Intruder>();
    database
        .add_component(EntityId::new(1), Intruder::default())
        .unwrap();

    assert_eq!(database.run_update(Duration::ZERO), Ok(1));

    let intruder = database.get_component::<Intruder>(EntityId::new(1)).unwrap();
    assert_eq!(intruder.nested, Some(Err(EcsError::ReentrantUpdate)));
    assert_eq!(
        intruder.same_type,
        Some(Err(EcsError::ContainerBusy {
            component: "Intruder",
        })),
    );
    let busy = EcsError::ContainerBusy {
        component: "Intruder",
    };
    assert_eq!(intruder.lookup, Some(Err(busy.clone())));
    assert_eq!(intruder.peek, Some(Err(busy)));
    assert_eq!(database.container_count(), 1);

    // container was returned and the database is usable again
    assert_eq!(database.run_update(Duration::ZERO), Ok(1));
}

#[test]
fn test_drop_releases_components() {
    let mut database = ComponentDatabase::new();
    for id in 0..4 {
        database.add_component(EntityId::new(id), Tracked).unwrap();
    }
    database.remove_component::<Tracked>(EntityId::new(0)).unwrap();
    assert_eq!(DROPPED.load(Ordering::SeqCst), 1);

    drop(database);
    assert_eq!(DROPPED.load(Ordering::SeqCst), 4);
}

#[test]
fn test_remove_entity_during_update() {
    let mut database = ComponentDatabase::new();
    database.register_update::<SelfDestruct>();
    let entity = EntityId::new(5);
    database.add_component(entity, 7u32).unwrap();
    database
        .add_component(
            entity,
            SelfDestruct {
                entity,
                removed: None,
            },
        )
        .unwrap();

    assert_eq!(database.run_update(Duration::ZERO), Ok(1));

    let component = database.get_component::<SelfDestruct>(entity).unwrap();
    assert_eq!(
        component.removed,
        Some(Err(EcsError::ContainerBusy {
            component: "SelfDestruct",
        })),
    );
    assert_eq!(database.get_component::<u32>(entity), Ok(&7));

    // outside of the update the whole entity goes away
    assert_eq!(database.remove_entity(entity), Ok(2));
    assert_eq!(database.contains_component::<SelfDestruct>(entity), Ok(false));
}

#[test]
fn test_panic_in_update_releases_database() {
    let mut database = ComponentDatabase::new();
    database.register_update::<Fuse>();
    let entity = EntityId::new(1);
    database
        .add_component(
            entity,
            Fuse {
                armed: true,
                updates: 0,
            },
        )
        .unwrap();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        database.run_update(Duration::ZERO)
    }));
    assert!(outcome.is_err());

    let fuse = database.get_component_mut::<Fuse>(entity).unwrap();
    fuse.armed = false;
    assert_eq!(database.run_update(Duration::ZERO), Ok(1));
    assert_eq!(database.get_component::<Fuse>(entity).unwrap().updates, 1);
    assert_eq!(database.container_count(), 1);
}

#[test]
fn test_handle_of_another_database() {
    let mut first = ComponentDatabase::new();
    let mut second = ComponentDatabase::new();
    let entity = EntityId::new(1);

    let handle = first.add_component(entity, 99u32).unwrap();
    let own = second.add_component(entity, 7u32).unwrap();
    assert_ne!(handle, own);

    assert_eq!(
        second.resolve(handle),
        Err(EcsError::ForeignHandle { component: "u32" }),
    );
    assert!(second.resolve_mut(handle).is_err());
    assert_eq!(first.resolve(handle), Ok(&99));
    assert_eq!(second.resolve(own), Ok(&7));
}
