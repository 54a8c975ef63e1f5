//! Entity extraction from raw questions.
//!
//! Pulls typed references out of free text: level-prefixed work-item IDs,
//! known titles, and level keywords. Absence of all three is a valid
//! outcome signaling a fully general query.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::WorkItemType;

/// 2-5 letter level prefix, hyphen, digits. Case-insensitive; candidates
/// whose prefix is not a known level are skipped.
static WORK_ITEM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([A-Za-z]{2,5})-(\d+)\b").expect("valid work item id pattern"));

/// Typed references extracted from one question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedEntities {
    /// Work-item ID, normalized to lowercase.
    pub work_item_id: Option<String>,
    /// A known title found in the question.
    pub work_item_title: Option<String>,
    /// Level keyword mentioned in the question.
    pub work_item_type: Option<WorkItemType>,
}

impl ExtractedEntities {
    /// True when nothing identified a specific work item. The level
    /// keyword alone does not constrain the query to one item.
    pub fn is_unconstrained(&self) -> bool {
        self.work_item_id.is_none() && self.work_item_title.is_none()
    }
}

/// Parses raw questions into typed identifiers against a known-titles list.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    known_titles: Vec<String>,
}

impl EntityExtractor {
    pub fn new(known_titles: Vec<String>) -> Self {
        Self { known_titles }
    }

    pub fn extract(&self, question: &str) -> ExtractedEntities {
        let lowered = question.to_lowercase();
        ExtractedEntities {
            work_item_id: extract_work_item_id(question),
            work_item_title: self.match_known_title(question),
            work_item_type: WorkItemType::from_keywords(&lowered),
        }
    }

    /// Case-insensitive substring match against the known-titles list.
    /// Returns the stored title, not the question's spelling of it.
    fn match_known_title(&self, question: &str) -> Option<String> {
        let lowered = question.to_lowercase();
        self.known_titles
            .iter()
            .find(|title| !title.is_empty() && lowered.contains(&title.to_lowercase()))
            .cloned()
    }
}

/// First token matching the ID pattern whose prefix is a known level,
/// lowercased.
pub fn extract_work_item_id(question: &str) -> Option<String> {
    for captures in WORK_ITEM_ID.captures_iter(question) {
        let prefix = &captures[1];
        if WorkItemType::from_id_prefix(prefix).is_some() {
            return Some(captures[0].to_lowercase());
        }
    }
    None
}
