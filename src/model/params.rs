#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub top_percent: f64,
    pub experimental_setup: String,
    pub excluded_methodology: String,
    pub separator: char,
    pub non_unique_marker: char,
    pub group_match: GroupMatch,
    pub alias_matching: bool,
}

/// How an atomic cell type is matched against composite labels when building
/// the non-unique groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMatch {
    /// Exact match against the separator-split components of a label.
    Token,
    /// Plain substring containment. Over-matches labels such as "Myeloid" in
    /// "Lymphoid / Myeloid-derived".
    Substring,
}

impl PipelineParams {
    pub fn default_v1() -> Self {
        Self {
            top_percent: 10.0,
            experimental_setup: "Timecourse".to_string(),
            excluded_methodology: "Activation".to_string(),
            separator: '/',
            non_unique_marker: '*',
            group_match: GroupMatch::Token,
            alias_matching: true,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.top_percent > 0.0 && self.top_percent <= 100.0) {
            return Err(format!(
                "top percent must be in (0, 100], got {}",
                self.top_percent
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceFiles {
    pub nonessential: String,
    pub common_essential: String,
    pub inferred_essential: String,
}

impl Default for ReferenceFiles {
    fn default() -> Self {
        Self {
            nonessential: "AchillesNonessentialControls.csv".to_string(),
            common_essential: "AchillesCommonEssentialControls.csv".to_string(),
            inferred_essential: "CRISPRInferredCommonEssentials.csv".to_string(),
        }
    }
}
