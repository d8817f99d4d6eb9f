/*!
An arena of cube records, with reference counts.

A [CubeRecord] is a cube, together with the inputs which drive each state of the cube to its successor, and the key of the successor.
The chain of successors from a record ends at a record whose cube reaches a bad state, and so a chain from a record which intersects the initial state is a counterexample.

Records are referenced by:
- Each entry of the [obligation queue](crate::pdr::scheduler).
- Each record which has the record as its successor.

When the count of references to a record falls to zero the record is removed, and its reference to its successor is released in turn.

```rust
# use otter_pdr::pdr::arena::CubeArena;
# use otter_pdr::structures::cube::Cube;
let mut arena = CubeArena::default();
let root = arena.insert(Cube::default(), Vec::default(), None);
arena.retain(root);
let child = arena.insert(Cube::default(), Vec::default(), Some(root));
arena.retain(child);

arena.release(root);
assert!(arena.get(root).is_some());

arena.release(child);
assert!(arena.is_empty());
```
*/

use slotmap::{new_key_type, SlotMap};

use crate::structures::cube::Cube;

new_key_type! {
    /// A key to a cube record.
    pub struct CubeKey;
}

/// A cube on a path to a bad state.
#[derive(Clone, Debug)]
pub struct CubeRecord {
    pub cube: Cube,

    /// Input values, one pattern for each step from the cube to its successor.
    /// For the record which reaches a bad state, the inputs under which the state is bad.
    pub inputs: Vec<Vec<bool>>,

    /// The next cube on the path to a bad state, if any.
    pub successor: Option<CubeKey>,

    references: usize,
}

/// Cube records, by key.
#[derive(Default)]
pub struct CubeArena {
    records: SlotMap<CubeKey, CubeRecord>,
}

impl CubeArena {
    /// Stores a fresh record, without any reference to it.
    ///
    /// The record holds a reference to `successor`.
    pub fn insert(&mut self, cube: Cube, inputs: Vec<Vec<bool>>, successor: Option<CubeKey>) -> CubeKey {
        if let Some(successor) = successor {
            self.retain(successor);
        }
        self.records.insert(CubeRecord {
            cube,
            inputs,
            successor,
            references: 0,
        })
    }

    pub fn get(&self, key: CubeKey) -> Option<&CubeRecord> {
        self.records.get(key)
    }

    /// Adds a reference to the record at `key`.
    pub fn retain(&mut self, key: CubeKey) {
        if let Some(record) = self.records.get_mut(key) {
            record.references += 1;
        }
    }

    /// Removes a reference to the record at `key`, removing the record (and so on, along successors) if no reference remains.
    pub fn release(&mut self, key: CubeKey) {
        let mut next = Some(key);
        while let Some(key) = next {
            let Some(record) = self.records.get_mut(key) else {
                return;
            };
            record.references = record.references.saturating_sub(1);
            if record.references > 0 {
                return;
            }
            next = self.records.remove(key).and_then(|record| record.successor);
        }
    }

    /// The records on the path from `key`, in order, ending with the record which reaches a bad state.
    pub fn chain(&self, key: CubeKey) -> Vec<&CubeRecord> {
        let mut chain = Vec::default();
        let mut next = Some(key);
        while let Some(record) = next.and_then(|key| self.records.get(key)) {
            chain.push(record);
            next = record.successor;
        }
        chain
    }

    /// A count of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
