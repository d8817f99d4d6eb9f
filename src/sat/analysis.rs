/*!
Analysis of conflicts, and of failed assumptions.

# Conflicts

[analyze](Solver::analyze) resolves the conflicting clause against the reasons of literals assigned at the current level, in reverse trail order, until a single literal of the current level remains (the first unique implication point).
The result is an asserting clause: the negation of the implication point at position 0, and a literal of the greatest remaining level at position 1.

# Failed assumptions

When an assumption is found false, [analyze_final](Solver::analyze_final) walks the trail back from the assumption, following reasons, and collects each decision reached.
As decisions made while assumptions remain are exactly the assumptions, the result is a set of assumptions which (with the clauses) is unsatisfiable.
*/

use crate::sat::{clause_db::ClauseKey, literal::CLiteral, solver::Solver};

impl Solver {
    /// An asserting clause derived from `conflict`, together with the level to backjump to.
    pub(super) fn analyze(&mut self, conflict: ClauseKey) -> (Vec<CLiteral>, usize) {
        let level = self.level();
        let mut learnt = vec![CLiteral::new(0, false)];
        let mut pending = 0;
        let mut resolved: Option<CLiteral> = None;
        let mut position = self.trail.len();
        let mut key = conflict;

        loop {
            let literals = match self.clause_db.get(key) {
                Some(clause) => clause.literals.clone(),
                None => Vec::default(),
            };

            for literal in literals {
                if Some(literal) == resolved {
                    continue;
                }
                let atom = literal.atom();
                if self.seen[atom as usize] || self.levels[atom as usize] == 0 {
                    continue;
                }
                self.seen[atom as usize] = true;
                self.bump_activity(atom);
                match self.levels[atom as usize] >= level {
                    true => pending += 1,
                    false => learnt.push(literal),
                }
            }

            let next = loop {
                position -= 1;
                let literal = self.trail[position];
                if self.seen[literal.atom() as usize] {
                    break literal;
                }
            };
            self.seen[next.atom() as usize] = false;
            resolved = Some(next);
            pending -= 1;

            if pending == 0 {
                learnt[0] = next.negate();
                break;
            }

            match self.reasons[next.atom() as usize] {
                Some(reason) => key = reason,
                None => {
                    learnt[0] = next.negate();
                    break;
                }
            }
        }

        for literal in &learnt[1..] {
            self.seen[literal.atom() as usize] = false;
        }

        let backjump_level = match learnt.len() {
            1 => 0,
            _ => {
                let mut max_position = 1;
                for position in 2..learnt.len() {
                    if self.levels[learnt[position].atom() as usize]
                        > self.levels[learnt[max_position].atom() as usize]
                    {
                        max_position = position;
                    }
                }
                learnt.swap(1, max_position);
                self.levels[learnt[1].atom() as usize]
            }
        };

        (learnt, backjump_level)
    }

    /// The literal block distance of `literals`, a count of the distinct levels of the literals.
    pub(super) fn lbd(&self, literals: &[CLiteral]) -> u32 {
        let mut levels: Vec<usize> = literals
            .iter()
            .map(|literal| self.levels[literal.atom() as usize])
            .collect();
        levels.sort_unstable();
        levels.dedup();
        levels.len() as u32
    }

    /// The assumptions responsible for the assumption `failed` being false.
    ///
    /// `failed` is always included.
    pub(super) fn analyze_final(&mut self, failed: CLiteral) -> Vec<CLiteral> {
        let mut core = vec![failed];
        let atom = failed.atom() as usize;
        if self.levels[atom] == 0 || self.level() == 0 {
            return core;
        }

        self.seen[atom] = true;
        let start = self.level_starts[0];
        for position in (start..self.trail.len()).rev() {
            let literal = self.trail[position];
            let atom = literal.atom() as usize;
            if !self.seen[atom] {
                continue;
            }
            match self.reasons[atom] {
                None => core.push(literal),
                Some(key) => {
                    if let Some(clause) = self.clause_db.get(key) {
                        for reason_literal in &clause.literals[1..] {
                            if self.levels[reason_literal.atom() as usize] > 0 {
                                self.seen[reason_literal.atom() as usize] = true;
                            }
                        }
                    }
                }
            }
            self.seen[atom] = false;
        }
        core
    }
}
