/*!
The solver struct, together with atoms, assignments and backjumps.

# Overview

The state of a solver is:
- A [clause database](ClauseDB), with two watched literals for each clause of two or more literals.
- A trail of assigned literals, with the position of each decision on the trail.
- For each atom, its value, the level at which it was assigned, and the clause (if any) which forced the assignment.
- An [IndexHeap] of atom activity, used to choose decisions.

Clauses are only ever added at level zero, and unit clauses are assigned (and propagated) immediately.
If a clause added is falsified at level zero the solver is noted as inconsistent, and every later solve is unsatisfiable.

A solver can be cloned, and the clone is an independent copy of the clause database and all other state.
*/

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    generic::{index_heap::IndexHeap, luby::Luby},
    misc::log::targets::{self},
    sat::{
        clause_db::{ClauseDB, ClauseKey, ClauseSource},
        literal::{Atom, CLiteral},
    },
};

/// Configuration of a solver.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// The probability of choosing a random polarity for a decision, rather than the saved phase.
    pub random_decision_bias: f64,

    /// The conflicts between restarts is this multiplied by the current element of the luby sequence.
    pub luby_u: u32,

    /// The seed of the source of randomness.
    pub seed: u64,

    /// The count of learnt clauses before the first reduction of the clause database.
    pub reduction_base: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            random_decision_bias: 0.0,
            luby_u: 128,
            seed: 0,
            reduction_base: 2000,
        }
    }
}

/// Counts of things which happen during solves.
#[derive(Clone, Debug, Default)]
pub struct SolverCounters {
    pub solves: usize,
    pub conflicts: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub restarts: usize,
    pub reductions: usize,
}

/// A watch on a clause, with some other literal of the clause which if true satisfies the clause.
#[derive(Clone, Copy, Debug)]
pub(super) struct Watch {
    pub key: ClauseKey,
    pub blocker: CLiteral,
}

/// A CDCL solver.
#[derive(Clone)]
pub struct Solver {
    pub config: SolverConfig,
    pub counters: SolverCounters,

    pub(super) clause_db: ClauseDB,
    pub(super) watches: Vec<Vec<Watch>>,

    pub(super) valuation: Vec<Option<bool>>,
    pub(super) levels: Vec<usize>,
    pub(super) reasons: Vec<Option<ClauseKey>>,
    pub(super) phases: Vec<bool>,
    pub(super) seen: Vec<bool>,

    pub(super) trail: Vec<CLiteral>,
    pub(super) level_starts: Vec<usize>,
    pub(super) q_head: usize,

    pub(super) activity: IndexHeap<f64>,
    pub(super) bump: f64,

    pub(super) luby: Luby,
    pub(super) rng: StdRng,
    pub(super) reduction_limit: usize,

    pub(super) model: Vec<Option<bool>>,
    pub(super) failed: Vec<CLiteral>,
    pub(super) inconsistent: bool,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::from_config(SolverConfig::default())
    }
}

/// The factor by which activity bumps grow after each conflict.
const ACTIVITY_DECAY: f64 = 0.95;

/// The value beyond which all activity is scaled down.
const ACTIVITY_LIMIT: f64 = 1e100;

impl Solver {
    pub fn from_config(config: SolverConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let reduction_limit = config.reduction_base;
        Solver {
            config,
            counters: SolverCounters::default(),
            clause_db: ClauseDB::default(),
            watches: Vec::default(),
            valuation: Vec::default(),
            levels: Vec::default(),
            reasons: Vec::default(),
            phases: Vec::default(),
            seen: Vec::default(),
            trail: Vec::default(),
            level_starts: Vec::default(),
            q_head: 0,
            activity: IndexHeap::default(),
            bump: 1.0,
            luby: Luby::default(),
            rng,
            reduction_limit,
            model: Vec::default(),
            failed: Vec::default(),
            inconsistent: false,
        }
    }

    /// A fresh atom, without any clause.
    pub fn fresh_atom(&mut self) -> Atom {
        let atom = self.valuation.len() as Atom;
        self.valuation.push(None);
        self.levels.push(0);
        self.reasons.push(None);
        self.phases.push(false);
        self.seen.push(false);
        self.watches.push(Vec::default());
        self.watches.push(Vec::default());
        self.activity.add(atom as usize, 0.0);
        self.activity.activate(atom as usize);
        atom
    }

    /// A count of atoms.
    pub fn atom_count(&self) -> usize {
        self.valuation.len()
    }

    /// A count of clauses, original and learnt, with more than one literal.
    pub fn clause_count(&self) -> usize {
        self.clause_db.len()
    }

    /// True if the clauses added are unsatisfiable without any assumption.
    pub fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    /// The current decision level.
    pub fn level(&self) -> usize {
        self.level_starts.len()
    }

    /// The value of `literal` on the current (partial) valuation.
    pub fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        literal_value(&self.valuation, literal)
    }

    /// Adds `clause` to the solver.
    ///
    /// Any decisions are cleared first.
    /// Duplicate literals are removed, a tautology is ignored, and literals false at level zero are dropped.
    pub fn add_clause(&mut self, clause: &[CLiteral]) {
        if self.inconsistent {
            return;
        }
        self.backjump(0);

        let mut literals = clause.to_vec();
        literals.sort_unstable();
        literals.dedup();
        if literals.windows(2).any(|pair| pair[0].atom() == pair[1].atom()) {
            return;
        }

        let mut kept = Vec::with_capacity(literals.len());
        for literal in literals {
            match self.literal_value(literal) {
                Some(true) => return,
                Some(false) => {}
                None => kept.push(literal),
            }
        }

        match kept.len() {
            0 => {
                log::debug!(target: targets::SAT, "Inconsistent on clause {clause:?}");
                self.inconsistent = true;
            }

            1 => {
                self.assign(kept[0], None);
                if self.propagate().is_some() {
                    log::debug!(target: targets::SAT, "Inconsistent on propagation of {}", kept[0]);
                    self.inconsistent = true;
                }
            }

            _ => {
                self.store_and_watch(kept, ClauseSource::Original, 0);
            }
        }
    }

    /// Stores a clause and watches its first two literals.
    pub(super) fn store_and_watch(&mut self, literals: Vec<CLiteral>, source: ClauseSource, lbd: u32) -> ClauseKey {
        let first = literals[0];
        let second = literals[1];
        let key = self.clause_db.store(literals, source, lbd);
        self.watches[first.index()].push(Watch {
            key,
            blocker: second,
        });
        self.watches[second.index()].push(Watch { key, blocker: first });
        key
    }

    /// Assigns `literal` at the current level, with `reason` as the clause which forced the assignment.
    pub(super) fn assign(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        let atom = literal.atom() as usize;
        self.valuation[atom] = Some(literal.polarity());
        self.levels[atom] = self.level();
        self.reasons[atom] = reason;
        self.trail.push(literal);
    }

    /// Opens a fresh decision level.
    pub(super) fn new_level(&mut self) {
        self.level_starts.push(self.trail.len());
    }

    /// Clears every assignment made above `level`.
    pub(super) fn backjump(&mut self, level: usize) {
        let Some(&start) = self.level_starts.get(level) else {
            return;
        };
        for literal in self.trail.drain(start..) {
            let atom = literal.atom() as usize;
            self.valuation[atom] = None;
            self.reasons[atom] = None;
            self.phases[atom] = literal.polarity();
            self.activity.activate(atom);
        }
        self.level_starts.truncate(level);
        self.q_head = self.trail.len();
    }

    /// An unassigned literal to decide on, or None if every atom is assigned.
    pub(super) fn decide(&mut self) -> Option<CLiteral> {
        while let Some(index) = self.activity.pop_max() {
            if self.valuation[index].is_some() {
                continue;
            }
            let polarity = match self.rng.gen_bool(self.config.random_decision_bias) {
                true => self.rng.gen(),
                false => self.phases[index],
            };
            return Some(CLiteral::new(index as Atom, polarity));
        }
        None
    }

    /// Increases the activity of `atom`.
    pub(super) fn bump_activity(&mut self, atom: Atom) {
        let bump = self.bump;
        self.activity.apply_to_index(atom as usize, |activity| activity + bump);
        if self.activity.value_at(atom as usize) > ACTIVITY_LIMIT {
            self.activity.apply_to_all(|activity| activity / ACTIVITY_LIMIT);
            self.bump /= ACTIVITY_LIMIT;
        }
    }

    /// Increases the bump, so that recent conflicts weigh more than older conflicts.
    pub(super) fn decay_activity(&mut self) {
        self.bump /= ACTIVITY_DECAY;
    }

    /// Removes learnt clauses, if enough have been learnt since the last reduction.
    ///
    /// Must be called at level zero, as reasons are cleared.
    pub(super) fn reduce_if_due(&mut self) {
        if self.clause_db.learnt_count() < self.reduction_limit {
            return;
        }
        let removed = self.clause_db.reduce(self.reduction_limit / 2);
        for reason in self.reasons.iter_mut() {
            *reason = None;
        }
        self.reduction_limit += self.reduction_limit / 10;
        self.counters.reductions += 1;
        log::debug!(target: targets::SAT, "Reduction removed {removed} clauses");
    }
}

/// The value of `literal` on `valuation`.
pub(super) fn literal_value(valuation: &[Option<bool>], literal: CLiteral) -> Option<bool> {
    valuation[literal.atom() as usize].map(|value| value == literal.polarity())
}
