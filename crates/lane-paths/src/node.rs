use std::cmp::Ordering;

/// Parent sentinel for the start node.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-cell search state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) parent: usize,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: NO_PARENT,
            closed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Open-set entry
// ---------------------------------------------------------------------------

/// Entry in the open set, ordered for `BinaryHeap` (a max-heap) so the
/// smallest `f` pops first, then the smallest `h`, then the oldest `seq`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: f64,
    pub(crate) h: f64,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn entry(idx: usize, f: f64, h: f64, seq: u64) -> OpenEntry {
        OpenEntry { idx, f, h, seq }
    }

    #[test]
    fn pops_lowest_f_then_h_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(0, 5.0, 1.0, 0));
        heap.push(entry(1, 4.0, 3.0, 1));
        heap.push(entry(2, 4.0, 2.0, 2));
        heap.push(entry(3, 4.0, 2.0, 3));
        heap.push(entry(4, 6.0, 0.0, 4));
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![2, 3, 1, 0, 4]);
    }
}
