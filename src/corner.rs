use crate::timing::Timing;
use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

pub const MAX_SPLIT: usize = 2;

/// Early/late characterization variant of the same library.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Split {
    Min = 0,
    Max = 1,
}

impl Split {
    pub const ALL: [Split; MAX_SPLIT] = [Split::Min, Split::Max];
}

impl Display for Split {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Split::Min => write!(f, "min"),
            Split::Max => write!(f, "max"),
        }
    }
}

/// One value per split.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct SplitData<T>(pub [T; MAX_SPLIT]);

impl<T> SplitData<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Split, &T)> {
        Split::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Split> for SplitData<T> {
    type Output = T;

    fn index(&self, split: Split) -> &T {
        &self.0[split as usize]
    }
}

impl<T> IndexMut<Split> for SplitData<T> {
    fn index_mut(&mut self, split: Split) -> &mut T {
        &mut self.0[split as usize]
    }
}

/// The same arc as characterized by each split's library.
pub type TimingView<'a> = SplitData<Option<&'a Timing>>;

impl TimingView<'_> {
    /// Every characterized split describes the same arc structure.
    pub fn is_consistent(&self) -> bool {
        let mut present = self.0.iter().flatten();
        let Some(first) = present.next() else {
            return true;
        };
        present.all(|timing| first.isomorphic(timing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lut::TimingLut;
    use crate::types::TimingType;

    fn arc(pin: &str, delay: f32) -> Timing {
        let mut timing = Timing::new(pin);
        timing.cell_rise = Some(TimingLut::scalar(delay));
        timing
    }

    #[test]
    fn test_split_indexing() {
        let mut data: SplitData<f32> = SplitData::default();
        data[Split::Max] = 2.0;
        assert_eq!(data[Split::Min], 0.0);
        assert_eq!(data.iter().map(|(split, v)| format!("{split}={v}")).collect::<Vec<_>>(), ["min=0", "max=2"]);
    }

    #[test]
    fn test_timing_view_consistency() {
        let min = arc("A", 0.1);
        let max = arc("A", 0.3);
        let other = arc("B", 0.1);
        let mut seq = arc("A", 0.1);
        seq.timing_type = Some(TimingType::RisingEdge);

        assert!(TimingView::default().is_consistent());
        assert!(SplitData([Some(&min), None]).is_consistent());
        assert!(SplitData([Some(&min), Some(&max)]).is_consistent());
        assert!(!SplitData([Some(&min), Some(&other)]).is_consistent());
        assert!(!SplitData([Some(&seq), Some(&max)]).is_consistent());
    }
}
