use alloc::vec::Vec;

use crate::DisplayedItem;

/// The clone-extended sequence, expressed as an index map over the caller's items.
///
/// In looping mode the displayed sequence is `[last slots items, all items, first slots items]`.
/// Clones are never materialized: the two clone blocks are cached as real indexes and every
/// displayed slot resolves back to an index into the caller's sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CloneSet {
    count: usize,
    leading: Vec<usize>,
    trailing: Vec<usize>,
    initial_index: usize,
}

impl CloneSet {
    /// Builds the clone map for `count` real items showing `slots` at once.
    ///
    /// Without looping, or when there are not more items than slots, the sequence is left
    /// untouched and starts at `0`.
    pub fn build(count: usize, slots: usize, infinite: bool) -> Self {
        if !infinite || slots == 0 || count <= slots {
            return Self {
                count,
                leading: Vec::new(),
                trailing: Vec::new(),
                initial_index: 0,
            };
        }
        Self {
            count,
            leading: (count - slots..count).collect(),
            trailing: (0..slots).collect(),
            initial_index: slots,
        }
    }

    pub fn is_cloned(&self) -> bool {
        !self.leading.is_empty()
    }

    /// Number of real items.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Size of each clone block (`0` when not looping).
    pub fn block_len(&self) -> usize {
        self.leading.len()
    }

    pub fn displayed_len(&self) -> usize {
        self.count + self.leading.len() + self.trailing.len()
    }

    /// Where a freshly built sequence should start so the first real item leads the window.
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    /// Maps a displayed index back to the caller's sequence.
    pub fn real_index(&self, displayed: usize) -> Option<usize> {
        let lead = self.leading.len();
        if displayed < lead {
            return Some(self.leading[displayed]);
        }
        let inner = displayed - lead;
        if inner < self.count {
            return Some(inner);
        }
        self.trailing.get(inner - self.count).copied()
    }

    pub fn is_clone(&self, displayed: usize) -> bool {
        let lead = self.leading.len();
        displayed < lead || (displayed >= lead + self.count && displayed < self.displayed_len())
    }

    pub fn in_leading_band(&self, displayed: usize) -> bool {
        displayed < self.leading.len()
    }

    pub fn in_trailing_band(&self, displayed: usize) -> bool {
        let start = self.leading.len() + self.count;
        self.is_cloned() && displayed >= start && displayed < self.displayed_len()
    }

    /// The real-region index showing the same window as `displayed`, if `displayed` sits in a
    /// clone band.
    ///
    /// Leading band positions move forward by `count`, trailing band positions move back by
    /// `count`. Both land inside `[block_len, block_len + count)`.
    pub fn equivalent_real_position(&self, displayed: usize) -> Option<usize> {
        if self.in_leading_band(displayed) {
            Some(displayed + self.count)
        } else if self.in_trailing_band(displayed) {
            Some(displayed - self.count)
        } else {
            None
        }
    }

    pub fn item(&self, displayed: usize) -> Option<DisplayedItem> {
        let real_index = self.real_index(displayed)?;
        Some(DisplayedItem {
            displayed_index: displayed,
            real_index,
            is_clone: self.is_clone(displayed),
        })
    }

    /// Visits every displayed slot in order without allocating.
    pub fn for_each_displayed(&self, mut f: impl FnMut(DisplayedItem)) {
        let lead = self.leading.len();
        for (i, &real_index) in self.leading.iter().enumerate() {
            f(DisplayedItem {
                displayed_index: i,
                real_index,
                is_clone: true,
            });
        }
        for real_index in 0..self.count {
            f(DisplayedItem {
                displayed_index: lead + real_index,
                real_index,
                is_clone: false,
            });
        }
        for (i, &real_index) in self.trailing.iter().enumerate() {
            f(DisplayedItem {
                displayed_index: lead + self.count + i,
                real_index,
                is_clone: true,
            });
        }
    }

    /// Pairs every displayed slot with a borrow of the caller's item.
    ///
    /// `items.len()` is expected to equal the configured count; slots whose real index falls
    /// outside `items` are skipped.
    pub fn displayed<'a, T>(
        &'a self,
        items: &'a [T],
    ) -> impl Iterator<Item = (DisplayedItem, &'a T)> + 'a {
        (0..self.displayed_len()).filter_map(move |i| {
            let item = self.item(i)?;
            items.get(item.real_index).map(|t| (item, t))
        })
    }
}
