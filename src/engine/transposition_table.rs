// Transposition table
//
// A fixed-size, open-addressed hash of search results keyed by the
// position's zobrist key. Linear probing resolves collisions; a key of
// zero marks an empty slot. Entries remember whether they came from the
// main search or from quiescence, because a quiescence value must never
// satisfy a deeper main-search probe.

use crate::game::Move;

/// One stored search result. Sixteen bytes, copied on probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transposition {
    /// Zobrist key of the position; zero marks an empty slot.
    pub key: u64,
    /// Bound type crossed with search type, see the associated constants.
    pub flag: u8,
    /// Plies of search below the node that produced the value.
    pub depth: u8,
    pub best_move: Move,
    pub value: i32,
}

impl Transposition {
    /// Main-search exact value.
    pub const EXACT: u8 = 0;
    /// Main-search upper bound: every move failed low, the true value is
    /// at most `value`.
    pub const ALPHA: u8 = 1;
    /// Main-search lower bound: a beta cutoff occurred, the true value is
    /// at least `value`.
    pub const BETA: u8 = 2;
    pub const Q_EXACT: u8 = Self::EXACT + 3;
    pub const Q_ALPHA: u8 = Self::ALPHA + 3;
    pub const Q_BETA: u8 = Self::BETA + 3;

    #[inline]
    pub fn is_quiescence(&self) -> bool {
        self.flag >= Self::Q_EXACT
    }
}

pub struct TranspositionTable {
    table: Vec<Transposition>,
    capacity: usize,
    pub entries: usize,
    pub overwrites: u64,
    pub collisions: u64,
    /// Writes silently dropped because the probe wrapped around a full
    /// table.
    pub dropped: u64,
}

impl TranspositionTable {
    /// Allocates a table of the given size in MiB; the capacity is however
    /// many entries fit.
    pub fn new(size_mb: usize) -> TranspositionTable {
        let capacity = (size_mb * 1024 * 1024 / std::mem::size_of::<Transposition>()).max(1);
        TranspositionTable {
            table: vec![Transposition::default(); capacity],
            capacity,
            entries: 0,
            overwrites: 0,
            collisions: 0,
            dropped: 0,
        }
    }

    pub fn fill_percentage(&self) -> f64 {
        self.entries as f64 / self.capacity as f64 * 100.0
    }

    /// Stores a search result, linear-probing from the key's home slot.
    ///
    /// When the probe lands on an entry with the same key, the stored
    /// entry is overwritten iff any of:
    /// - the new depth is strictly greater and the search types match,
    /// - the new depth is at least the stored one and the new flag is
    ///   `EXACT`,
    /// - the stored entry came from quiescence and the new one from the
    ///   main search.
    pub fn store(&mut self, key: u64, flag: u8, depth: u8, value: i32, best_move: Move) {
        if self.fill_percentage() > 99.0 {
            self.clear();
        }

        let entry = Transposition {
            key,
            flag,
            depth,
            best_move,
            value,
        };

        let home = (key % self.capacity as u64) as usize;
        if self.table[home].key == 0 {
            self.entries += 1;
            self.table[home] = entry;
            return;
        }

        let mut slot = home;
        while self.table[slot].key != 0 && self.table[slot].key != key {
            slot = (slot + 1) % self.capacity;
            if slot == home {
                // Wrapped all the way around: the table is full, drop the
                // write.
                self.dropped += 1;
                return;
            }
        }

        if slot != home {
            self.collisions += 1;
        }

        if self.table[slot].key == 0 {
            self.entries += 1;
            self.table[slot] = entry;
            return;
        }

        let stored = self.table[slot];
        let is_quiescence = flag >= Transposition::Q_EXACT;
        let better_depth =
            stored.depth < depth && stored.is_quiescence() == is_quiescence;
        let exact_evaluation = depth >= stored.depth && flag == Transposition::EXACT;
        let replace_quiescence = stored.is_quiescence() && !is_quiescence;

        if better_depth || exact_evaluation || replace_quiescence {
            self.overwrites += 1;
            self.table[slot] = entry;
        }
    }

    /// Looks the key up, following the probe chain until a match, an
    /// empty slot or a full wrap.
    pub fn probe(&self, key: u64) -> Option<Transposition> {
        let home = (key % self.capacity as u64) as usize;
        let mut slot = home;
        while self.table[slot].key != 0 {
            if self.table[slot].key == key {
                return Some(self.table[slot]);
            }
            slot = (slot + 1) % self.capacity;
            if slot == home {
                return None;
            }
        }
        None
    }

    /// Returns the stored value if an entry exists and is usable for a
    /// probe at the given depth and bounds.
    ///
    /// An entry is usable iff its search type matches the caller's, at
    /// sufficient depth, or the stored entry is a main-search entry and
    /// the caller is in quiescence: main-search results are strictly
    /// stronger than quiescence results, never the other way around.
    pub fn lookup(
        &self,
        key: u64,
        depth: u8,
        alpha: i32,
        beta: i32,
        quiescence: bool,
    ) -> Option<i32> {
        let entry = self.probe(key)?;

        let usable = (entry.is_quiescence() == quiescence && entry.depth >= depth)
            || (!entry.is_quiescence() && quiescence);
        if !usable {
            return None;
        }

        match entry.flag {
            Transposition::EXACT | Transposition::Q_EXACT => Some(entry.value),
            Transposition::ALPHA | Transposition::Q_ALPHA if entry.value <= alpha => {
                Some(entry.value)
            }
            Transposition::BETA | Transposition::Q_BETA if entry.value >= beta => {
                Some(entry.value)
            }
            _ => None,
        }
    }

    /// Resets every entry and all counters.
    pub fn clear(&mut self) {
        self.table.fill(Transposition::default());
        self.entries = 0;
        self.overwrites = 0;
        self.collisions = 0;
        self.dropped = 0;
    }

    /// One-line occupancy report for the log.
    pub fn fill_summary(&self) -> String {
        format!(
            "table occupancy {}/{} ({:.2}%), {} overwrites, {} collisions, {} dropped",
            self.entries,
            self.capacity,
            self.fill_percentage(),
            self.overwrites,
            self.collisions,
            self.dropped,
        )
    }
}
