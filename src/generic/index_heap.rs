/*!
A max-heap over a fixed set of indices, each paired with a value.

Values are stored by index in a backing vector, and the heap itself only holds indices.
A companion vector records where (if anywhere) each index sits in the heap.
So, an index may leave the heap and later return with its value unchanged.

The [SAT solver](crate::sat) uses the heap to choose an unvalued atom with the most activity, removing atoms as they are valued and returning them on a backjump.

```rust
# use otter_pdr::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(600, 10.0);
heap.add(0, 70.0);

heap.activate(600);
heap.activate(0);

assert_eq!(heap.count(), 601);

assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(600));
assert!(heap.pop_max().is_none());
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default + Copy> {
    values: Vec<V>,
    position: Vec<Option<usize>>,
    heap: Vec<usize>,
}

impl<V: PartialOrd + Default + Copy> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position: Vec::default(),
            heap: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Default + Copy> Clone for IndexHeap<V> {
    fn clone(&self) -> Self {
        IndexHeap {
            values: self.values.clone(),
            position: self.position.clone(),
            heap: self.heap.clone(),
        }
    }
}

impl<V: PartialOrd + Default + Copy> IndexHeap<V> {
    /// Stores `value` at `index`, growing the structure if required.
    /// Returns true if `index` was fresh, false otherwise.
    ///
    /// The index is not placed on the heap, for this see [activate](IndexHeap::activate).
    pub fn add(&mut self, index: usize, value: V) -> bool {
        let fresh = index >= self.values.len();
        if fresh {
            self.values.resize(index + 1, V::default());
            self.position.resize(index + 1, None);
        }
        self.values[index] = value;
        if !fresh {
            self.heapify_if_active(index);
        }
        fresh
    }

    /// Places `index` on the heap, if not already present.
    /// Returns true if the index was placed, false otherwise.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.position.get(index) {
            Some(None) => {
                let heap_index = self.heap.len();
                self.heap.push(index);
                self.position[index] = Some(heap_index);
                self.sift_up(heap_index);
                true
            }
            _ => false,
        }
    }

    /// Removes `index` from the heap, if present.
    /// Returns true if `index` was removed, false otherwise.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(Some(heap_index)) = self.position.get(index).copied() else {
            return false;
        };

        let last = self.heap.len() - 1;
        self.swap(heap_index, last);
        self.heap.pop();
        self.position[index] = None;

        if heap_index < self.heap.len() {
            self.sift_down(heap_index);
            self.sift_up(heap_index);
        }
        true
    }

    /// True if `index` is on the heap.
    pub fn contains(&self, index: usize) -> bool {
        matches!(self.position.get(index), Some(Some(_)))
    }

    /// The index with the greatest value on the heap, if any.
    pub fn peek_max(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Removes and returns the index with the greatest value on the heap, if any.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// The value stored at `index`.
    pub fn value_at(&self, index: usize) -> V {
        self.values[index]
    }

    /// Applies `f` to the value at `index`, and restores the heap.
    pub fn apply_to_index(&mut self, index: usize, f: impl Fn(V) -> V) {
        self.values[index] = f(self.values[index]);
        self.heapify_if_active(index);
    }

    /// Applies `f` to every stored value.
    ///
    /// As `f` is expected to be monotone (e.g. scaling) the order of the heap is kept as is.
    pub fn apply_to_all(&mut self, f: impl Fn(V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(*value)
        }
    }

    /// Restores the heap property for `index`, if on the heap.
    pub fn heapify_if_active(&mut self, index: usize) {
        if let Some(Some(heap_index)) = self.position.get(index).copied() {
            self.sift_up(heap_index);
            self.sift_down(heap_index);
        }
    }

    /// A count of indices stored by the structure (on the heap or not).
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of indices on the heap.
    pub fn active(&self) -> usize {
        self.heap.len()
    }
}

impl<V: PartialOrd + Default + Copy> IndexHeap<V> {
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        self.values[self.heap[a]] > self.values[self.heap[b]]
    }

    fn sift_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if self.greater(heap_index, parent) {
                self.swap(heap_index, parent);
                heap_index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut heap_index: usize) {
        loop {
            let left = 2 * heap_index + 1;
            let right = left + 1;
            let mut largest = heap_index;

            if left < self.heap.len() && self.greater(left, largest) {
                largest = left;
            }
            if right < self.heap.len() && self.greater(right, largest) {
                largest = right;
            }

            if largest == heap_index {
                break;
            }
            self.swap(heap_index, largest);
            heap_index = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_simple() {
        let mut test_heap = IndexHeap::default();
        for (index, value) in [(6, 10), (5, 20), (4, 30), (1, 60), (0, 70)] {
            test_heap.add(index, value);
            test_heap.activate(index);
        }

        assert_eq!(test_heap.pop_max(), Some(0));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(6));
        assert!(test_heap.pop_max().is_none());
    }

    #[test]
    fn heap_update() {
        let mut test_heap = IndexHeap::default();
        for (index, value) in [(6, 10), (4, 30), (1, 60), (0, 70)] {
            test_heap.add(index, value);
            test_heap.activate(index);
        }

        test_heap.apply_to_index(6, |_| 100);
        test_heap.apply_to_index(0, |_| 0);

        assert_eq!(test_heap.pop_max(), Some(6));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_remove_and_return() {
        let mut test_heap = IndexHeap::default();
        for index in [6, 5, 4, 1, 0] {
            test_heap.add(index, index);
            test_heap.activate(index);
        }

        assert!(test_heap.remove(4));
        assert!(!test_heap.remove(4));
        assert!(test_heap.remove(6));
        assert!(!test_heap.contains(6));
        assert!(!test_heap.add(4, 10));
        test_heap.activate(4);

        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(0));
        assert_eq!(test_heap.active(), 0);
    }

    #[test]
    fn heap_scale() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(0, 1e100);
        test_heap.add(1, 2e100);
        test_heap.activate(0);
        test_heap.activate(1);
        test_heap.apply_to_all(|value: f64| value * 1e-100);

        assert!(test_heap.value_at(1) < 3.0);
        assert_eq!(test_heap.pop_max(), Some(1));
    }
}
