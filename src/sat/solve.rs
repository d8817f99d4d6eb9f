/*!
Determines the satisfiability of the clauses of a solver, given some assumptions.

Roughly, the loop is:

```none
          +--------------------------+
  +-------| assume or make_decision  |
  |       +--------------------------+
  |               ⌃
  |               | if no conflict
  ⌄   +-----------+                  +-----> satisfiable, if every atom is valued
--+-->| propagate |------------------+
  ⌃   +-----------+                  +-----> unsatisfiable, on a conflict at level 0 or a false assumption
  |               |
  |               | on a conflict
  |               ⌄
  |       +--------------------+
  +-------| analyze + backjump |
          +--------------------+
```

Assumptions are placed before any decision, each at its own level, in the order given.
An assumption already true still opens a (empty) level, so the first `n` levels always correspond to the first `n` assumptions.

After a solve the solver is returned to level zero.
On a satisfiable result the model is kept until the next solve, and on an unsatisfiable result due to an assumption the failed assumptions are kept.
*/

use crate::{
    misc::log::targets::{self},
    sat::{
        clause_db::ClauseSource,
        literal::{Atom, CLiteral},
        solver::Solver,
        SatOracle, SolveReport,
    },
};

impl Solver {
    /// Determines the satisfiability of the clauses together with `assumptions`.
    pub fn solve_given(&mut self, assumptions: &[CLiteral]) -> SolveReport {
        self.counters.solves += 1;
        self.model.clear();
        self.failed.clear();

        if self.inconsistent {
            return SolveReport::Unsatisfiable;
        }

        self.backjump(0);
        if self.propagate().is_some() {
            self.inconsistent = true;
            return SolveReport::Unsatisfiable;
        }
        self.reduce_if_due();

        let mut conflicts_since_restart: usize = 0;
        let mut restart_limit = self.restart_limit();

        loop {
            if let Some(conflict) = self.propagate() {
                self.counters.conflicts += 1;
                conflicts_since_restart += 1;

                if self.level() == 0 {
                    log::debug!(target: targets::SAT, "Conflict at level zero");
                    self.inconsistent = true;
                    return SolveReport::Unsatisfiable;
                }

                let (learnt, backjump_level) = self.analyze(conflict);
                self.backjump(backjump_level);
                let asserted = learnt[0];
                match learnt.len() {
                    1 => self.assign(asserted, None),
                    _ => {
                        let lbd = self.lbd(&learnt);
                        let key = self.store_and_watch(learnt, ClauseSource::Resolution, lbd);
                        self.assign(asserted, Some(key));
                    }
                }
                self.decay_activity();
                continue;
            }

            if conflicts_since_restart >= restart_limit {
                self.counters.restarts += 1;
                conflicts_since_restart = 0;
                self.luby.next();
                restart_limit = self.restart_limit();
                self.backjump(0);
                continue;
            }

            let mut assumed = None;
            while self.level() < assumptions.len() {
                let assumption = assumptions[self.level()];
                match self.literal_value(assumption) {
                    Some(true) => self.new_level(),
                    Some(false) => {
                        self.failed = self.analyze_final(assumption);
                        self.backjump(0);
                        return SolveReport::Unsatisfiable;
                    }
                    None => {
                        assumed = Some(assumption);
                        break;
                    }
                }
            }

            let literal = match assumed {
                Some(assumption) => assumption,
                None => match self.decide() {
                    Some(decision) => {
                        self.counters.decisions += 1;
                        decision
                    }
                    None => {
                        self.model = self.valuation.clone();
                        self.backjump(0);
                        return SolveReport::Satisfiable;
                    }
                },
            };
            self.new_level();
            self.assign(literal, None);
        }
    }

    fn restart_limit(&self) -> usize {
        (self.luby.current() as usize).saturating_mul(self.config.luby_u as usize)
    }

    /// The value of `atom` in the model of the last solve, if satisfiable.
    pub fn model_value(&self, atom: Atom) -> Option<bool> {
        self.model.get(atom as usize).copied().flatten()
    }

    /// The failed assumptions of the last solve, if unsatisfiable due to assumptions.
    pub fn failed_assumptions(&self) -> &[CLiteral] {
        &self.failed
    }
}

impl SatOracle for Solver {
    fn fresh_atom(&mut self) -> Atom {
        Solver::fresh_atom(self)
    }

    fn add_clause(&mut self, clause: &[CLiteral]) {
        Solver::add_clause(self, clause)
    }

    fn solve_given(&mut self, assumptions: &[CLiteral]) -> SolveReport {
        Solver::solve_given(self, assumptions)
    }

    fn value_of(&self, atom: Atom) -> Option<bool> {
        self.model_value(atom)
    }

    fn failed_assumptions(&self) -> Option<&[CLiteral]> {
        Some(Solver::failed_assumptions(self))
    }
}
