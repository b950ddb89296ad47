//! Controls and their bit locations inside an input report.

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

/// A closed enumeration of the physical controls of one panel family.
pub trait PanelControl: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
}

/// Where a control lives in an input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BitLocation {
    /// One-hot bit mask within the byte.
    pub flag: u8,
    /// Byte offset from the start of the report.
    pub offset: usize,
}

impl BitLocation {
    /// Sentinel for a control the family does not place on any bit.
    pub const UNMAPPED: Self = Self::new(0, 0);

    pub const fn new(flag: u8, offset: usize) -> Self {
        Self { flag, offset }
    }

    pub const fn is_mapped(self) -> bool {
        self.flag != 0
    }

    /// Whether the bit is set in `report`. Offsets past the end read as clear.
    pub fn is_set(self, report: &[u8]) -> bool {
        self.is_mapped()
            && report
                .get(self.offset)
                .is_some_and(|byte| byte & self.flag != 0)
    }
}

/// Per-family table from control to bit location, and back.
pub trait ControlMap {
    type Control: PanelControl;

    /// Location of `control`, or [`BitLocation::UNMAPPED`].
    fn locate(control: Self::Control) -> BitLocation;

    /// The control at (`offset`, `flag`), if any.
    ///
    /// Scans [`PanelControl::ALL`] and returns the first match. Reserved bits
    /// and vendor telemetry bytes resolve to `None`.
    fn identify(offset: usize, flag: u8) -> Option<Self::Control> {
        if flag == 0 {
            return None;
        }
        let wanted = BitLocation::new(flag, offset);
        Self::Control::ALL
            .iter()
            .copied()
            .find(|control| Self::locate(*control) == wanted)
    }
}

/// Controls of `M` that have a real location, in declaration order.
pub fn mapped_controls<M: ControlMap>() -> impl Iterator<Item = M::Control> {
    M::Control::ALL
        .iter()
        .copied()
        .filter(|control| M::locate(*control).is_mapped())
}

/// A map entry the precomputed table could not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableConflict<C> {
    /// Two controls claim the same bit. The first in declaration order wins.
    Collision {
        at: BitLocation,
        kept: C,
        shadowed: C,
    },
    /// The mask selects zero or several bits and can never match a single
    /// bit transition.
    NotSingleBit { control: C, at: BitLocation },
}

/// Inverse control map precomputed into one slot per (offset, bit).
///
/// Answers single-bit queries exactly like [`ControlMap::identify`] without
/// scanning the enumeration. The decoder only ever asks about single bits.
#[derive(Debug, Clone)]
pub struct ControlTable<C> {
    slots: Vec<[Option<C>; 8]>,
    conflicts: Vec<TableConflict<C>>,
}

impl<C: PanelControl> ControlTable<C> {
    pub fn build<M: ControlMap<Control = C>>() -> Self {
        let mut table = Self {
            slots: Vec::new(),
            conflicts: Vec::new(),
        };
        for control in mapped_controls::<M>() {
            table.insert(control, M::locate(control));
        }
        debug_assert!(
            table.conflicts.is_empty(),
            "control map is not injective: {:?}",
            table.conflicts
        );
        table
    }

    fn insert(&mut self, control: C, at: BitLocation) {
        if !at.flag.is_power_of_two() {
            self.conflicts
                .push(TableConflict::NotSingleBit { control, at });
            return;
        }
        if self.slots.len() <= at.offset {
            self.slots.resize(at.offset + 1, [None; 8]);
        }
        let bit = at.flag.trailing_zeros() as usize;
        let Some(slot) = self
            .slots
            .get_mut(at.offset)
            .and_then(|byte| byte.get_mut(bit))
        else {
            return;
        };
        match slot {
            Some(kept) => self.conflicts.push(TableConflict::Collision {
                at,
                kept: *kept,
                shadowed: control,
            }),
            None => *slot = Some(control),
        }
    }

    pub fn identify(&self, offset: usize, flag: u8) -> Option<C> {
        if !flag.is_power_of_two() {
            return None;
        }
        let bit = flag.trailing_zeros() as usize;
        self.slots.get(offset)?.get(bit).copied().flatten()
    }

    /// Number of report bytes the table covers.
    pub fn span(&self) -> usize {
        self.slots.len()
    }

    pub fn conflicts(&self) -> &[TableConflict<C>] {
        &self.conflicts
    }

    pub fn is_injective(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Every mapped (location, control) pair, by offset then bit.
    pub fn entries(&self) -> impl Iterator<Item = (BitLocation, C)> + '_ {
        self.slots.iter().enumerate().flat_map(|(offset, bits)| {
            bits.iter().enumerate().filter_map(move |(bit, slot)| {
                slot.map(|control| (BitLocation::new(1u8 << bit, offset), control))
            })
        })
    }
}
