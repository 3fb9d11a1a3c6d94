use crate::model::ScreenRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Records whose label equals a single atomic cell type.
    Single,
    /// Records whose label equals one composite label, unsplit.
    Composite,
    /// Every record whose label mentions the atomic cell type, alone or inside
    /// a composite label. Keyed with the non-unique marker.
    NonUnique,
}

#[derive(Debug, Clone)]
pub struct CellTypeGroup {
    pub key: String,
    pub kind: GroupKind,
    pub records: Vec<ScreenRecord>,
}

impl CellTypeGroup {
    pub fn n_screens(&self) -> usize {
        self.records.len()
    }

    pub fn screen_ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.screen_id.as_str())
    }
}
