/*!
Boolean constraint propagation, over two watched literals.

Each clause of two or more literals is watched by two of its literals, and a watch is visited only when the watched literal becomes false.
On a visit, either:
- Some other literal of the clause is not false, and becomes the watch.
- The other watched literal is true, and the clause is satisfied.
- The other watched literal is unassigned, and is assigned with the clause as its reason.
- Every literal is false, and the clause is a conflict.

The literal assigned by a clause is moved to position 0, as conflict analysis relies on this.
*/

use crate::sat::{
    clause_db::ClauseKey,
    literal::CLiteral,
    solver::{literal_value, Solver, Watch},
};

impl Solver {
    /// Propagates every assignment on the trail not yet propagated.
    ///
    /// Returns the key of a conflicting clause, if a conflict is found.
    pub(super) fn propagate(&mut self) -> Option<ClauseKey> {
        while self.q_head < self.trail.len() {
            let false_literal = self.trail[self.q_head].negate();
            self.q_head += 1;
            self.counters.propagations += 1;

            if let Some(conflict) = self.propagate_watches(false_literal) {
                self.q_head = self.trail.len();
                return Some(conflict);
            }
        }
        None
    }

    fn propagate_watches(&mut self, false_literal: CLiteral) -> Option<ClauseKey> {
        let mut watches = std::mem::take(&mut self.watches[false_literal.index()]);
        let mut conflict = None;
        let mut kept = 0;
        let mut index = 0;

        while index < watches.len() {
            let watch = watches[index];
            index += 1;

            if literal_value(&self.valuation, watch.blocker) == Some(true) {
                watches[kept] = watch;
                kept += 1;
                continue;
            }

            let Some(clause) = self.clause_db.get_mut(watch.key) else {
                // The clause was removed by a reduction.
                continue;
            };
            let literals = &mut clause.literals;
            if literals[0] == false_literal {
                literals.swap(0, 1);
            }
            let first = literals[0];

            if first != watch.blocker && literal_value(&self.valuation, first) == Some(true) {
                watches[kept] = Watch {
                    key: watch.key,
                    blocker: first,
                };
                kept += 1;
                continue;
            }

            let replacement = (2..literals.len())
                .find(|&position| literal_value(&self.valuation, literals[position]) != Some(false));
            if let Some(position) = replacement {
                literals.swap(1, position);
                self.watches[literals[1].index()].push(Watch {
                    key: watch.key,
                    blocker: first,
                });
                continue;
            }

            watches[kept] = Watch {
                key: watch.key,
                blocker: first,
            };
            kept += 1;

            match literal_value(&self.valuation, first) {
                Some(false) => {
                    conflict = Some(watch.key);
                    while index < watches.len() {
                        watches[kept] = watches[index];
                        kept += 1;
                        index += 1;
                    }
                }

                None => self.assign(first, Some(watch.key)),

                Some(true) => {}
            }
        }

        watches.truncate(kept);
        self.watches[false_literal.index()] = watches;
        conflict
    }
}
