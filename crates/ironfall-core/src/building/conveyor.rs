use super::Neighborhood;
use crate::fixed::Fixed64;
use crate::item::Item;
use crate::spatial::{Direction, GridPosition};
use serde::{Deserialize, Serialize};

/// Seconds for an item to cross one tile (4 items/s on a single lane).
pub const MOVE_TIME: Fixed64 = Fixed64::from_bits(0x4000_0000); // 0.25

/// Minimum progress gap between consecutive items on one belt.
pub const SPACING: Fixed64 = Fixed64::from_bits(0x547A_E148); // 0.33

/// Where a blocked item waits: just short of the tile edge.
///
/// Exactly three spacings (0.99), so a jammed queue of four clamps its tail
/// to zero rather than below it.
pub const BLOCKED_PROGRESS: Fixed64 = Fixed64::from_bits(SPACING.to_bits() * 3);

/// An item riding a belt, `progress` of the way across the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingItem {
    pub item: Item,
    pub progress: Fixed64,
}

/// A 1x1 belt that carries items one tile in `direction`.
///
/// Items are kept in arrival order. Index 0 is the head (most advanced);
/// progress never increases toward the tail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conveyor {
    direction: Direction,
    items: Vec<MovingItem>,
    anim_phase: Fixed64,
}

impl Conveyor {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            items: Vec::new(),
            anim_phase: Fixed64::ZERO,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Queued items, head first.
    pub fn items(&self) -> &[MovingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cosmetic belt animation phase in [0, 1).
    pub fn anim_phase(&self) -> Fixed64 {
        self.anim_phase
    }

    /// Whether a new item can enter without crowding the last one admitted.
    pub fn can_accept(&self) -> bool {
        match self.items.last() {
            None => true,
            Some(tail) => tail.progress >= SPACING,
        }
    }

    /// Admit an item at the start of the tile, or hand it back if full.
    pub fn push(&mut self, item: Item) -> Result<(), Item> {
        if !self.can_accept() {
            return Err(item);
        }
        self.items.push(MovingItem {
            item,
            progress: Fixed64::ZERO,
        });
        Ok(())
    }

    /// Advance every queued item and forward the ones that reach the edge.
    ///
    /// Per item, head to tail: advance by `dt / MOVE_TIME`, clamp to the
    /// nearest item still ahead of it minus [`SPACING`], then at progress 1
    /// try the tile in front: another conveyor with room, else a core. A
    /// refused item waits at [`BLOCKED_PROGRESS`].
    pub fn tick(&mut self, origin: GridPosition, dt: Fixed64, hood: &mut dyn Neighborhood) {
        let step = dt / MOVE_TIME;
        self.anim_phase = (self.anim_phase + step).frac();

        if self.items.is_empty() {
            return;
        }

        let target = origin.step(self.direction);
        let queued = std::mem::take(&mut self.items);
        let mut kept: Vec<MovingItem> = Vec::with_capacity(queued.len());

        for mut moving in queued {
            moving.progress += step;

            if let Some(ahead) = kept.last() {
                let limit = ahead.progress - SPACING;
                if moving.progress > limit {
                    moving.progress = limit;
                }
            }

            if moving.progress >= Fixed64::ONE {
                let forwarded = hood
                    .push_to_conveyor(target, moving.item)
                    .or_else(|item| hood.push_to_core(target, item));
                match forwarded {
                    Ok(()) => continue,
                    Err(item) => {
                        moving.item = item;
                        moving.progress = BLOCKED_PROGRESS;
                    }
                }
            }

            kept.push(moving);
        }

        self.items = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    fn fixed(v: f64) -> Fixed64 {
        Fixed64::from_num(v)
    }

    fn coal() -> Item {
        Item::new(ItemKind::Coal)
    }

    /// Records deliveries; accepts into conveyors or cores as configured.
    #[derive(Default)]
    struct Recorder {
        conveyor_open: bool,
        core_open: bool,
        to_conveyor: Vec<(GridPosition, Item)>,
        to_core: Vec<(GridPosition, Item)>,
    }

    impl Neighborhood for Recorder {
        fn push_to_conveyor(&mut self, pos: GridPosition, item: Item) -> Result<(), Item> {
            if self.conveyor_open {
                self.to_conveyor.push((pos, item));
                Ok(())
            } else {
                Err(item)
            }
        }

        fn push_to_core(&mut self, pos: GridPosition, item: Item) -> Result<(), Item> {
            if self.core_open {
                self.to_core.push((pos, item));
                Ok(())
            } else {
                Err(item)
            }
        }
    }

    #[test]
    fn constants_match_tuning() {
        assert_eq!(MOVE_TIME, fixed(0.25));
        assert!((SPACING - fixed(0.33)).abs() < fixed(1e-9));
        assert!((BLOCKED_PROGRESS - fixed(0.99)).abs() < fixed(1e-9));
    }

    #[test]
    fn empty_belt_accepts() {
        let mut belt = Conveyor::new(Direction::Right);
        assert!(belt.can_accept());
        assert!(belt.push(coal()).is_ok());
        assert_eq!(belt.items()[0].progress, Fixed64::ZERO);
    }

    #[test]
    fn refuses_until_tail_clears_spacing() {
        let mut belt = Conveyor::new(Direction::Right);
        let mut hood = Recorder::default();
        belt.push(coal()).unwrap();
        assert_eq!(belt.push(coal()), Err(coal()));

        // 0.25 progress after 1/16 s: still too close.
        belt.tick(GridPosition::new(0, 0), fixed(0.0625), &mut hood);
        assert!(!belt.can_accept());

        // 0.5 progress: room for another.
        belt.tick(GridPosition::new(0, 0), fixed(0.0625), &mut hood);
        assert!(belt.can_accept());
        assert!(belt.push(coal()).is_ok());
        assert_eq!(belt.len(), 2);
    }

    #[test]
    fn advances_by_dt_over_move_time() {
        let mut belt = Conveyor::new(Direction::Up);
        let mut hood = Recorder::default();
        belt.push(coal()).unwrap();
        belt.tick(GridPosition::new(0, 0), fixed(0.125), &mut hood);
        assert_eq!(belt.items()[0].progress, fixed(0.5));
    }

    #[test]
    fn forwards_to_conveyor_in_front() {
        let mut belt = Conveyor::new(Direction::Up);
        let mut hood = Recorder {
            conveyor_open: true,
            ..Default::default()
        };
        belt.push(coal()).unwrap();
        belt.tick(GridPosition::new(3, 3), fixed(0.25), &mut hood);
        assert!(belt.is_empty());
        assert_eq!(hood.to_conveyor, vec![(GridPosition::new(3, 4), coal())]);
        assert!(hood.to_core.is_empty());
    }

    #[test]
    fn falls_back_to_core() {
        let mut belt = Conveyor::new(Direction::Left);
        let mut hood = Recorder {
            core_open: true,
            ..Default::default()
        };
        belt.push(coal()).unwrap();
        belt.tick(GridPosition::new(3, 3), fixed(0.3), &mut hood);
        assert!(belt.is_empty());
        assert_eq!(hood.to_core, vec![(GridPosition::new(2, 3), coal())]);
    }

    #[test]
    fn blocked_item_waits_at_edge() {
        let mut belt = Conveyor::new(Direction::Down);
        let mut hood = Recorder::default();
        belt.push(coal()).unwrap();
        for _ in 0..10 {
            belt.tick(GridPosition::new(0, 0), fixed(0.1), &mut hood);
        }
        assert_eq!(belt.len(), 1);
        assert_eq!(belt.items()[0].progress, BLOCKED_PROGRESS);
    }

    #[test]
    fn blocked_queue_keeps_spacing() {
        let mut belt = Conveyor::new(Direction::Right);
        let mut hood = Recorder::default();
        let origin = GridPosition::new(0, 0);
        for _ in 0..200 {
            let _ = belt.push(coal());
            belt.tick(origin, fixed(1.0 / 60.0), &mut hood);
        }
        let items = belt.items();
        assert!(items.len() >= 3);
        assert_eq!(items[0].progress, BLOCKED_PROGRESS);
        for pair in items.windows(2) {
            assert!(pair[0].progress - pair[1].progress >= SPACING);
        }
    }

    #[test]
    fn jammed_queue_never_drops_below_zero() {
        assert_eq!(BLOCKED_PROGRESS, SPACING * Fixed64::from_num(3));
        let origin = GridPosition::new(0, 0);
        for frame_ms in [5, 16, 17, 33, 50, 119] {
            let mut belt = Conveyor::new(Direction::Right);
            let mut hood = Recorder::default();
            let dt = fixed(frame_ms as f64 / 1000.0);
            for _ in 0..400 {
                let _ = belt.push(coal());
                belt.tick(origin, dt, &mut hood);
                assert!(belt.len() <= 4);
                for moving in belt.items() {
                    assert!(moving.progress >= Fixed64::ZERO, "{frame_ms} ms");
                    assert!(moving.progress < Fixed64::ONE);
                }
            }
            // Full jam: pinned head, then one spacing apart down to zero.
            let progress: Vec<_> = belt.items().iter().map(|m| m.progress).collect();
            assert_eq!(
                progress,
                vec![BLOCKED_PROGRESS, SPACING * Fixed64::from_num(2), SPACING, Fixed64::ZERO]
            );
            assert!(!belt.can_accept());
        }
    }

    #[test]
    fn follower_is_free_once_head_leaves() {
        let mut belt = Conveyor::new(Direction::Right);
        let mut hood = Recorder::default();
        let origin = GridPosition::new(0, 0);
        belt.push(coal()).unwrap();
        belt.tick(origin, fixed(0.125), &mut hood); // head at 0.5
        belt.push(Item::new(ItemKind::Iron)).unwrap();

        hood.conveyor_open = true;
        belt.tick(origin, fixed(0.125), &mut hood); // head exits, iron at 0.5
        assert_eq!(belt.len(), 1);
        assert_eq!(belt.items()[0].item.kind, ItemKind::Iron);
        assert_eq!(belt.items()[0].progress, fixed(0.5));
    }

    #[test]
    fn follower_can_leave_right_behind_head() {
        let mut belt = Conveyor::new(Direction::Right);
        let mut hood = Recorder {
            conveyor_open: true,
            ..Default::default()
        };
        let origin = GridPosition::new(0, 0);
        belt.push(coal()).unwrap();
        belt.tick(origin, fixed(0.125), &mut hood);
        belt.push(coal()).unwrap();
        // A huge step carries both past the edge. Once the head has left,
        // nothing ahead constrains the follower.
        belt.tick(origin, fixed(10.0), &mut hood);
        assert_eq!(hood.to_conveyor.len(), 2);
        assert!(belt.is_empty());
    }

    #[test]
    fn anim_phase_wraps() {
        let mut belt = Conveyor::new(Direction::Right);
        let mut hood = Recorder::default();
        belt.tick(GridPosition::new(0, 0), fixed(0.3), &mut hood);
        assert!(belt.anim_phase() < Fixed64::ONE);
        assert!((belt.anim_phase() - fixed(0.2)).abs() < fixed(1e-6));
    }
}
