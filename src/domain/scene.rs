//! Authoritative store of live entities.
//!
//! Every structural mutation (insert, prune, collision removal) happens under one
//! mutex. The quadratic collision scan runs on a snapshot of `Arc` handles taken under
//! that lock, so the critical sections stay linear and an insert that races with a
//! sweep is simply not part of that sweep.

use super::entity::{Entity, EntityKind};
use super::ports::Surface;
use super::tuning::Playfield;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct SceneStore {
    playfield: Playfield,
    entities: Mutex<Vec<Arc<Entity>>>,
}

impl SceneStore {
    pub fn new(playfield: Playfield) -> Self {
        Self {
            playfield,
            entities: Mutex::new(Vec::new()),
        }
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    // A panic while holding the lock cannot leave the Vec half-mutated, so a poisoned
    // guard is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Entity>>> {
        self.entities.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a newly created entity and returns its id.
    pub fn insert(&self, entity: Entity) -> u64 {
        let id = entity.id();
        self.lock().push(Arc::new(entity));
        id
    }

    pub fn is_off_field(&self, entity: &Entity, now: Duration) -> bool {
        !self.playfield.contains(entity.position(now))
    }

    /// Drops every entity that has left the playfield and draws the rest.
    ///
    /// Each live entity is visited exactly once. Returns the number pruned.
    pub fn prune_and_draw_sweep(&self, now: Duration, surface: &mut dyn Surface) -> usize {
        let mut entities = self.lock();
        let before = entities.len();
        entities.retain(|entity| {
            let position = entity.position(now);
            if !self.playfield.contains(position) {
                return false;
            }
            surface.draw(entity.kind(), position);
            true
        });
        let pruned = before - entities.len();
        if pruned > 0 {
            debug!(pruned, live = entities.len(), "pruned off-field entities");
        }
        pruned
    }

    /// Detects intersecting entity pairs, removes them and returns the number of hits.
    ///
    /// Off-field entities and the stationary Target/Launcher never take part. Every
    /// member of every intersecting pair is removed, but only a Plate/Rocket pair whose
    /// members have not already scored in this sweep counts as a hit, so the hit count
    /// never exceeds half the live entities.
    pub fn collision_sweep(&self, now: Duration) -> u32 {
        let candidates: Vec<Arc<Entity>> = self
            .snapshot()
            .into_iter()
            .filter(|entity| !entity.is_static() && !self.is_off_field(entity, now))
            .collect();

        let mut hits = 0;
        let mut removed: HashSet<u64> = HashSet::new();
        let mut scored: HashSet<u64> = HashSet::new();
        for (i, first) in candidates.iter().enumerate() {
            for second in &candidates[i + 1..] {
                if !first.intersects(second, now) {
                    continue;
                }
                removed.insert(first.id());
                removed.insert(second.id());
                if is_interception(first.kind(), second.kind())
                    && !scored.contains(&first.id())
                    && !scored.contains(&second.id())
                {
                    scored.insert(first.id());
                    scored.insert(second.id());
                    hits += 1;
                }
            }
        }

        if !removed.is_empty() {
            self.lock().retain(|entity| !removed.contains(&entity.id()));
            debug!(hits, removed = removed.len(), "collision sweep removed entities");
        }
        hits
    }

    /// Cheap copy of the live set; entities are shared, not cloned.
    pub fn snapshot(&self) -> Vec<Arc<Entity>> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.lock().iter().filter(|e| e.kind() == kind).count()
    }
}

fn is_interception(a: EntityKind, b: EntityKind) -> bool {
    matches!(
        (a, b),
        (EntityKind::Plate, EntityKind::Rocket) | (EntityKind::Rocket, EntityKind::Plate)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kinematics::{Position, Velocity};
    use proptest::prelude::*;
    use std::thread;

    const G: f64 = 18.0;

    #[derive(Default)]
    struct Drawn(Vec<(EntityKind, Position)>);

    impl Surface for Drawn {
        fn draw(&mut self, kind: EntityKind, at: Position) {
            self.0.push((kind, at));
        }
    }

    fn store() -> SceneStore {
        SceneStore::new(Playfield::default())
    }

    fn parked(kind: EntityKind, x: i32, y: i32) -> Entity {
        let at = Position::new(x, y);
        match kind {
            EntityKind::Target => Entity::target(at),
            EntityKind::Launcher => Entity::launcher(at),
            EntityKind::Plate => Entity::plate(at, Velocity::ZERO, 0.0, Duration::ZERO),
            EntityKind::Rocket => Entity::rocket(at, Velocity::ZERO, 0.0, Duration::ZERO),
        }
    }

    #[test]
    fn when_entity_sits_on_the_zero_edges_then_it_is_on_field() {
        let scene = store();

        assert!(!scene.is_off_field(&parked(EntityKind::Plate, 0, 10), Duration::ZERO));
        assert!(!scene.is_off_field(&parked(EntityKind::Plate, 10, 0), Duration::ZERO));
    }

    #[test]
    fn when_entity_sits_on_the_max_edges_then_it_is_off_field() {
        let scene = store();
        let field = *scene.playfield();

        assert!(scene.is_off_field(&parked(EntityKind::Plate, field.width, 10), Duration::ZERO));
        assert!(scene.is_off_field(&parked(EntityKind::Plate, 10, field.height), Duration::ZERO));
        assert!(!scene.is_off_field(
            &parked(EntityKind::Plate, field.width - 1, field.height - 1),
            Duration::ZERO
        ));
    }

    #[test]
    fn when_rocket_and_plate_converge_then_one_hit_and_both_removed() {
        let scene = store();
        let rocket = Entity::rocket(Position::new(10, 5), Velocity::new(2.0, 3.0), G, Duration::ZERO);
        let plate = Entity::plate(Position::new(12, 5), Velocity::new(-2.0, 3.0), G, Duration::ZERO);
        scene.insert(rocket);
        scene.insert(plate);

        // Both analytic trajectories reach x = 11 at the same height at t = 0.5 s.
        let hits = scene.collision_sweep(Duration::from_millis(500));

        assert_eq!(hits, 1);
        assert!(scene.is_empty());
    }

    #[test]
    fn when_static_entities_overlap_projectiles_then_they_are_never_removed() {
        let scene = store();
        scene.insert(parked(EntityKind::Launcher, 3, 0));
        scene.insert(parked(EntityKind::Rocket, 4, 1));
        scene.insert(parked(EntityKind::Target, 185, 0));
        scene.insert(parked(EntityKind::Plate, 186, 1));

        let hits = scene.collision_sweep(Duration::ZERO);

        assert_eq!(hits, 0);
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn when_two_plates_overlap_then_both_removed_without_a_hit() {
        let scene = store();
        scene.insert(parked(EntityKind::Plate, 50, 20));
        scene.insert(parked(EntityKind::Plate, 52, 20));

        let hits = scene.collision_sweep(Duration::ZERO);

        assert_eq!(hits, 0);
        assert!(scene.is_empty());
    }

    #[test]
    fn when_rocket_touches_two_plates_then_all_three_are_removed_for_one_hit() {
        let scene = store();
        scene.insert(parked(EntityKind::Rocket, 50, 20));
        scene.insert(parked(EntityKind::Plate, 48, 20));
        scene.insert(parked(EntityKind::Plate, 50, 22));

        let hits = scene.collision_sweep(Duration::ZERO);

        assert_eq!(hits, 1);
        assert!(scene.is_empty());
    }

    #[test]
    fn when_two_rockets_each_touch_a_plate_in_a_chain_then_two_hits() {
        let scene = store();
        // Plate, rocket, plate, rocket laid out so only neighbours overlap.
        scene.insert(parked(EntityKind::Plate, 40, 20));
        scene.insert(parked(EntityKind::Rocket, 44, 20));
        scene.insert(parked(EntityKind::Plate, 46, 20));
        scene.insert(parked(EntityKind::Rocket, 50, 20));

        let hits = scene.collision_sweep(Duration::ZERO);

        assert_eq!(hits, 2);
        assert!(scene.is_empty());
    }

    #[test]
    fn when_colliding_pair_is_off_field_then_it_is_ignored() {
        let scene = store();
        scene.insert(parked(EntityKind::Rocket, -2, 20));
        scene.insert(parked(EntityKind::Plate, -1, 20));

        let hits = scene.collision_sweep(Duration::ZERO);

        assert_eq!(hits, 0);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn when_pruning_then_off_field_entities_are_removed_and_the_rest_drawn() {
        let scene = store();
        scene.insert(parked(EntityKind::Launcher, 3, 0));
        scene.insert(parked(EntityKind::Plate, 250, 10));
        scene.insert(parked(EntityKind::Rocket, 20, 10));
        let mut drawn = Drawn::default();

        let pruned = scene.prune_and_draw_sweep(Duration::ZERO, &mut drawn);

        assert_eq!(pruned, 1);
        assert_eq!(scene.len(), 2);
        assert_eq!(
            drawn.0,
            vec![
                (EntityKind::Launcher, Position::new(3, 0)),
                (EntityKind::Rocket, Position::new(20, 10)),
            ]
        );
    }

    #[test]
    fn when_pruning_twice_without_time_passing_then_second_pass_removes_nothing() {
        let scene = store();
        scene.insert(parked(EntityKind::Plate, 250, 10));
        scene.insert(parked(EntityKind::Plate, 20, -3));
        scene.insert(parked(EntityKind::Rocket, 20, 10));
        let now = Duration::from_millis(1_500);

        let first = scene.prune_and_draw_sweep(now, &mut Drawn::default());
        let second = scene.prune_and_draw_sweep(now, &mut Drawn::default());

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn when_plate_leaves_the_field_within_a_tick_then_prune_runs_before_collision() {
        let scene = store();
        let tick = Duration::from_millis(10);
        scene.insert(Entity::plate(
            Position::new(188, 5),
            Velocity::new(5_000.0, 0.0),
            G,
            Duration::ZERO,
        ));
        // Parked where the plate would be if it had stayed on the field.
        scene.insert(parked(EntityKind::Rocket, 190, 5));
        let mut drawn = Drawn::default();

        let pruned = scene.prune_and_draw_sweep(tick, &mut drawn);
        let hits = scene.collision_sweep(tick);

        assert_eq!(pruned, 1);
        assert_eq!(hits, 0);
        assert_eq!(drawn.0, vec![(EntityKind::Rocket, Position::new(190, 5))]);
        assert_eq!(scene.count_of(EntityKind::Rocket), 1);
    }

    #[test]
    fn when_inserting_from_many_threads_then_no_entity_is_lost() {
        const WRITERS: i32 = 4;
        const PER_WRITER: i32 = 100;
        let scene = Arc::new(store());
        let done = Arc::new(std::sync::atomic::AtomicBool::new(false));

        // Rockets on a 4-cell grid never touch each other, so sweeps must keep them all.
        let writers: Vec<_> = (0..WRITERS)
            .map(|n| {
                let scene = Arc::clone(&scene);
                thread::spawn(move || {
                    for i in 0..PER_WRITER {
                        let slot = n * PER_WRITER + i;
                        scene.insert(parked(EntityKind::Rocket, slot % 50 * 4, slot / 50 * 4));
                    }
                })
            })
            .collect();
        let sweeper = {
            let scene = Arc::clone(&scene);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut sweeps = 0;
                while !done.load(std::sync::atomic::Ordering::Acquire) || sweeps == 0 {
                    assert_eq!(scene.collision_sweep(Duration::ZERO), 0);
                    assert_eq!(scene.prune_and_draw_sweep(Duration::ZERO, &mut Drawn::default()), 0);
                    sweeps += 1;
                }
            })
        };
        for writer in writers {
            writer.join().expect("writer panicked");
        }
        done.store(true, std::sync::atomic::Ordering::Release);
        sweeper.join().expect("sweeper panicked");

        assert_eq!(scene.len(), (WRITERS * PER_WRITER) as usize);
    }

    fn kind_strategy() -> impl Strategy<Value = EntityKind> {
        prop_oneof![
            Just(EntityKind::Target),
            Just(EntityKind::Launcher),
            Just(EntityKind::Plate),
            Just(EntityKind::Rocket),
        ]
    }

    proptest! {
        #[test]
        fn hits_never_exceed_half_the_live_entities(
            layout in prop::collection::vec((kind_strategy(), 0i32..30, 0i32..10), 0..40)
        ) {
            let scene = store();
            for (kind, x, y) in &layout {
                scene.insert(parked(*kind, *x, *y));
            }
            let statics = scene.count_of(EntityKind::Target) + scene.count_of(EntityKind::Launcher);
            let live = scene.len();

            let hits = scene.collision_sweep(Duration::ZERO) as usize;

            prop_assert!(hits * 2 <= live);
            prop_assert_eq!(
                scene.count_of(EntityKind::Target) + scene.count_of(EntityKind::Launcher),
                statics
            );
            prop_assert!(live - scene.len() >= hits * 2);
        }
    }
}
