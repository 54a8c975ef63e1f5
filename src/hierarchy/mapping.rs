//! Workflow-stage mapping tables: SDLC phases and SAFe process names.

use crate::types::WorkItemType;

/// Map a workflow stage onto its SDLC phase. Unknown stages pass through
/// unchanged.
pub fn sdlc_phase(stage: &str) -> String {
    match stage.to_lowercase().as_str() {
        "idea" => "Requirements Gathering".to_string(),
        "discovery" | "planning" => "Analysis & Planning".to_string(),
        "design" => "System Design".to_string(),
        "development" | "execution" => "Implementation".to_string(),
        "testing" | "review" => "Testing & QA".to_string(),
        "deployment" => "Deployment".to_string(),
        "completed" => "Completed".to_string(),
        _ => stage.to_string(),
    }
}

/// Map an item kind and workflow stage onto a named SAFe ceremony or
/// artifact. Unmapped combinations render as `"<type> - <stage>"`.
pub fn safe_process(kind: WorkItemType, stage: &str) -> String {
    let stage_lower = stage.to_lowercase();
    let mapped = match kind {
        WorkItemType::BusinessBrief => match stage_lower.as_str() {
            "idea" => Some("Portfolio Kanban - Funnel"),
            "discovery" => Some("Portfolio Kanban - Analyzing"),
            "planning" => Some("Lean Business Case"),
            "execution" | "development" => Some("Portfolio Kanban - Implementing"),
            "completed" => Some("Portfolio Kanban - Done"),
            _ => None,
        },
        WorkItemType::Initiative => match stage_lower.as_str() {
            "idea" => Some("Epic Hypothesis"),
            "discovery" => Some("Lean Business Case"),
            "planning" => Some("PI Planning"),
            "execution" | "development" => Some("Iteration Planning"),
            "testing" | "review" => Some("System Demo"),
            "completed" => Some("Solution Demo"),
            _ => None,
        },
        WorkItemType::Epic => match stage_lower.as_str() {
            "idea" => Some("Program Backlog"),
            "planning" => Some("PI Planning"),
            "execution" | "development" => Some("Iteration Execution"),
            "testing" | "review" => Some("System Demo"),
            "completed" => Some("Inspect & Adapt"),
            _ => None,
        },
        WorkItemType::Story => match stage_lower.as_str() {
            "idea" => Some("Team Backlog"),
            "planning" => Some("Iteration Planning"),
            "execution" | "development" => Some("Iteration Execution"),
            "testing" | "review" => Some("Iteration Review"),
            "completed" => Some("Iteration Retrospective"),
            _ => None,
        },
        // Features have no dedicated table.
        WorkItemType::Feature => None,
    };

    mapped
        .map(String::from)
        .unwrap_or_else(|| format!("{} - {}", kind.label(), stage))
}
