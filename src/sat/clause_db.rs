/*!
Storage of clauses.

Clauses are held in a [SlotMap], and identified by a [ClauseKey].
A key to a clause which has been removed is never reused for a different clause, so watch lists may hold stale keys which are dropped the next time the list is visited.

Original clauses are kept for the life of the solver.
Learnt clauses may be removed by [reduce](ClauseDB::reduce), which keeps the clauses with the smallest literal block distance.
*/

use slotmap::{new_key_type, SlotMap};

use crate::sat::literal::CLiteral;

new_key_type! {
    /// A key to a clause in the database.
    pub struct ClauseKey;
}

/// Kinds of clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseSource {
    /// A clause added to the solver.
    Original,
    /// A clause derived during conflict analysis.
    Resolution,
}

/// A clause, together with its source and literal block distance.
///
/// For a clause used as the reason for an assignment, the assigned literal is at position 0.
#[derive(Clone, Debug)]
pub struct StoredClause {
    pub literals: Vec<CLiteral>,
    pub source: ClauseSource,
    pub lbd: u32,
}

/// The clause database.
#[derive(Clone, Default)]
pub struct ClauseDB {
    store: SlotMap<ClauseKey, StoredClause>,
    learnt: usize,
}

impl ClauseDB {
    pub fn store(&mut self, literals: Vec<CLiteral>, source: ClauseSource, lbd: u32) -> ClauseKey {
        if source == ClauseSource::Resolution {
            self.learnt += 1;
        }
        self.store.insert(StoredClause {
            literals,
            source,
            lbd,
        })
    }

    pub fn get(&self, key: ClauseKey) -> Option<&StoredClause> {
        self.store.get(key)
    }

    pub fn get_mut(&mut self, key: ClauseKey) -> Option<&mut StoredClause> {
        self.store.get_mut(key)
    }

    /// A count of all clauses.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// A count of learnt clauses.
    pub fn learnt_count(&self) -> usize {
        self.learnt
    }

    /// Removes the learnt clauses with the greatest literal block distance, keeping at most `keep` learnt clauses and any clause with a distance of at most two.
    ///
    /// Returns a count of the clauses removed.
    pub fn reduce(&mut self, keep: usize) -> usize {
        let mut learnt: Vec<(u32, ClauseKey)> = self
            .store
            .iter()
            .filter(|(_, clause)| clause.source == ClauseSource::Resolution)
            .map(|(key, clause)| (clause.lbd, key))
            .collect();
        learnt.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        let excess = learnt.len().saturating_sub(keep);
        let mut removed = 0;
        for (lbd, key) in learnt.into_iter().take(excess) {
            if lbd <= 2 {
                break;
            }
            self.store.remove(key);
            removed += 1;
        }
        self.learnt -= removed;
        removed
    }
}
