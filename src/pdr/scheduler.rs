/*!
The queue of proof obligations.

An obligation is a frame index paired with the key of a cube record, and asks for the cube to be blocked at the frame.
The queue is a bucket queue, with one bucket for each frame, and [pop](ObligationQueue::pop) always returns an obligation from the lowest frame with an obligation.
Within a bucket obligations are returned first in, first out.

Popping from the lowest frame ensures every predecessor found for an obligation is resolved before the obligation is revisited.
*/

use std::collections::VecDeque;

use crate::pdr::arena::CubeKey;

/// A bucket queue of obligations, keyed by frame.
#[derive(Default)]
pub struct ObligationQueue {
    buckets: Vec<VecDeque<CubeKey>>,
    lowest: usize,
    count: usize,
}

impl ObligationQueue {
    pub fn add(&mut self, frame: usize, key: CubeKey) {
        if self.buckets.len() <= frame {
            self.buckets.resize_with(frame + 1, VecDeque::default);
        }
        self.buckets[frame].push_back(key);
        self.lowest = std::cmp::min(self.lowest, frame);
        self.count += 1;
    }

    /// An obligation at the lowest frame with an obligation, if any.
    pub fn pop(&mut self) -> Option<(usize, CubeKey)> {
        while self.lowest < self.buckets.len() {
            if let Some(key) = self.buckets[self.lowest].pop_front() {
                self.count -= 1;
                return Some((self.lowest, key));
            }
            self.lowest += 1;
        }
        None
    }

    /// Removes and returns every obligation.
    pub fn drain(&mut self) -> Vec<(usize, CubeKey)> {
        let mut drained = Vec::with_capacity(self.count);
        for (frame, bucket) in self.buckets.iter_mut().enumerate() {
            drained.extend(bucket.drain(..).map(|key| (frame, key)));
        }
        self.count = 0;
        self.lowest = 0;
        drained
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
