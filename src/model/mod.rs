pub mod groups;
pub mod hits;
pub mod params;
pub mod summary;

pub use groups::{CellTypeGroup, GroupKind};
pub use hits::{Hit, HitRow, HitTable};
pub use summary::{IntersectionRow, SummaryRow};

/// One row of the master screen index.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ScreenRecord {
    #[serde(rename = "#SCREEN_ID")]
    pub screen_id: String,
    #[serde(rename = "EXPERIMENTAL_SETUP")]
    pub experimental_setup: String,
    #[serde(rename = "LIBRARY_METHODOLOGY")]
    pub library_methodology: String,
    #[serde(rename = "CELL_TYPE_BROAD")]
    pub cell_type_broad: String,
}
