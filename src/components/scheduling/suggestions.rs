use super::conflicts::detect_conflicts;
use super::models::{AlternativeSlot, CalendarEvent, Category, Suggestion};
use super::store::EventStore;
use crate::error::EngineResult;
use crate::utils::time::time_of_day;
use tracing::debug;

/// Start times offered whenever a conflict is found.
///
/// These are not checked against the store.
pub const ALTERNATIVE_SLOTS: [(u32, u32, &str); 3] = [
    (9, 0, "Morning slot available"),
    (14, 0, "Afternoon slot available"),
    (16, 0, "Late afternoon available"),
];

/// Static advice for a category
#[derive(Debug, Clone, Copy)]
pub struct CategoryAdvice {
    pub category: Category,
    pub message: &'static str,
    pub recommendation: &'static str,
}

/// Categories with optimization advice; others get none
pub const CATEGORY_ADVICE: &[CategoryAdvice] = &[
    CategoryAdvice {
        category: Category::Inspection,
        message: "Property inspections are typically more effective in the morning when lighting is optimal.",
        recommendation: "Schedule between 9:00 AM - 11:00 AM for best results",
    },
    CategoryAdvice {
        category: Category::Meeting,
        message: "Tenant meetings have higher attendance rates on weekdays.",
        recommendation: "Consider Tuesday-Thursday, 2:00 PM - 4:00 PM for optimal scheduling",
    },
];

const EFFICIENCY_MESSAGE: &str = "You have other events scheduled today. Consider grouping similar activities to minimize travel time.";

/// Advice entry for `category`, if any
pub fn advice_for(category: Category) -> Option<&'static CategoryAdvice> {
    CATEGORY_ADVICE.iter().find(|advice| advice.category == category)
}

/// Build the ordered suggestion list for a candidate event.
///
/// Output order is conflict, optimization, efficiency; each appears at most
/// once. The result depends only on the candidate and the store contents.
pub fn generate_suggestions(
    store: &EventStore,
    candidate: &CalendarEvent,
) -> EngineResult<Vec<Suggestion>> {
    let span = candidate.interval()?;
    let mut suggestions = Vec::new();

    if let Some(first) = detect_conflicts(store, &span).into_iter().next() {
        debug!("Candidate {} conflicts with {}", span, first.title);
        suggestions.push(Suggestion::Conflict {
            message: format!(
                "Time conflict detected with \"{}\". Consider scheduling at a different time.",
                first.title
            ),
            conflicting_event_id: first.id.clone(),
            alternatives: alternative_slots()?,
        });
    }

    if let Some(advice) = advice_for(candidate.category) {
        suggestions.push(Suggestion::Optimization {
            message: advice.message.to_string(),
            recommendation: advice.recommendation.to_string(),
        });
    }

    let related_events: Vec<String> = store
        .events_on_day(candidate.day())
        .map(|event| event.title.clone())
        .collect();
    if !related_events.is_empty() {
        suggestions.push(Suggestion::Efficiency {
            message: EFFICIENCY_MESSAGE.to_string(),
            related_events,
        });
    }

    Ok(suggestions)
}

fn alternative_slots() -> EngineResult<Vec<AlternativeSlot>> {
    ALTERNATIVE_SLOTS
        .iter()
        .map(|(hour, minute, reason)| {
            Ok(AlternativeSlot {
                time: time_of_day(*hour, *minute)?,
                reason: reason.to_string(),
            })
        })
        .collect()
}
