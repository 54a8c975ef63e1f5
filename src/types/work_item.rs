//! Work item model: a closed set of five kinds sharing common base fields.

use serde::{Deserialize, Serialize};

/// The five work-item levels, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkItemType {
    BusinessBrief,
    Initiative,
    Feature,
    Epic,
    Story,
}

impl WorkItemType {
    /// All levels in hierarchy order.
    pub const ALL: [WorkItemType; 5] = [
        WorkItemType::BusinessBrief,
        WorkItemType::Initiative,
        WorkItemType::Feature,
        WorkItemType::Epic,
        WorkItemType::Story,
    ];

    /// Level prefix used in work-item IDs (`bb-001`, `init-001`, ...).
    pub fn id_prefix(self) -> &'static str {
        match self {
            WorkItemType::BusinessBrief => "bb",
            WorkItemType::Initiative => "init",
            WorkItemType::Feature => "fea",
            WorkItemType::Epic => "epic",
            WorkItemType::Story => "story",
        }
    }

    /// Resolve a level from an ID prefix, case-insensitive.
    pub fn from_id_prefix(prefix: &str) -> Option<Self> {
        let prefix = prefix.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.id_prefix() == prefix)
    }

    /// Detect a level keyword in an already-lowercased question.
    pub fn from_keywords(question: &str) -> Option<Self> {
        if question.contains("business brief") || question.contains("businessbrief") {
            Some(WorkItemType::BusinessBrief)
        } else if question.contains("initiative") {
            Some(WorkItemType::Initiative)
        } else if question.contains("feature") {
            Some(WorkItemType::Feature)
        } else if question.contains("epic") {
            Some(WorkItemType::Epic)
        } else if question.contains("story") || question.contains("stories") {
            Some(WorkItemType::Story)
        } else {
            None
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            WorkItemType::BusinessBrief => "Business Brief",
            WorkItemType::Initiative => "Initiative",
            WorkItemType::Feature => "Feature",
            WorkItemType::Epic => "Epic",
            WorkItemType::Story => "Story",
        }
    }

    /// The level directly below, if any.
    pub fn child(self) -> Option<Self> {
        match self {
            WorkItemType::BusinessBrief => Some(WorkItemType::Initiative),
            WorkItemType::Initiative => Some(WorkItemType::Feature),
            WorkItemType::Feature => Some(WorkItemType::Epic),
            WorkItemType::Epic => Some(WorkItemType::Story),
            WorkItemType::Story => None,
        }
    }

    /// The level directly above, if any.
    pub fn parent(self) -> Option<Self> {
        match self {
            WorkItemType::BusinessBrief => None,
            WorkItemType::Initiative => Some(WorkItemType::BusinessBrief),
            WorkItemType::Feature => Some(WorkItemType::Initiative),
            WorkItemType::Epic => Some(WorkItemType::Feature),
            WorkItemType::Story => Some(WorkItemType::Epic),
        }
    }
}

/// Fields shared by every work-item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemCore {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub workflow_stage: String,
    #[serde(default)]
    pub completion_percentage: u8,
    /// Reference to the immediate containing level; absent for business briefs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// A work item, tagged by kind. Level-specific fields (story points) are
/// only reachable after a kind check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkItem {
    BusinessBrief {
        #[serde(flatten)]
        core: WorkItemCore,
    },
    Initiative {
        #[serde(flatten)]
        core: WorkItemCore,
    },
    Feature {
        #[serde(flatten)]
        core: WorkItemCore,
    },
    Epic {
        #[serde(flatten)]
        core: WorkItemCore,
    },
    Story {
        #[serde(flatten)]
        core: WorkItemCore,
        #[serde(
            rename = "storyPoints",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        story_points: Option<u32>,
    },
}

impl WorkItem {
    pub fn kind(&self) -> WorkItemType {
        match self {
            WorkItem::BusinessBrief { .. } => WorkItemType::BusinessBrief,
            WorkItem::Initiative { .. } => WorkItemType::Initiative,
            WorkItem::Feature { .. } => WorkItemType::Feature,
            WorkItem::Epic { .. } => WorkItemType::Epic,
            WorkItem::Story { .. } => WorkItemType::Story,
        }
    }

    pub fn core(&self) -> &WorkItemCore {
        match self {
            WorkItem::BusinessBrief { core }
            | WorkItem::Initiative { core }
            | WorkItem::Feature { core }
            | WorkItem::Epic { core }
            | WorkItem::Story { core, .. } => core,
        }
    }

    pub fn id(&self) -> &str {
        &self.core().id
    }

    pub fn title(&self) -> &str {
        &self.core().title
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.core().parent_id.as_deref()
    }
}
