use super::models::{CalendarEvent, Category, Priority};
use crate::error::{validation_error, EngineResult};
use crate::utils::time::{hh_mm, time_of_day};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

/// One keyword rule of the category chain
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub keywords: &'static [&'static str],
    pub category: Category,
    pub duration_minutes: i64,
    pub priority: Priority,
    /// Prefix added to the title unless it already names the category
    pub title_prefix: Option<(&'static str, &'static str)>,
}

impl IntentRule {
    fn matches(&self, lower_phrase: &str) -> bool {
        self.keywords.iter().any(|keyword| lower_phrase.contains(keyword))
    }
}

/// Category rules, evaluated in order; the first match wins
pub const CATEGORY_RULES: &[IntentRule] = &[
    IntentRule {
        keywords: &["inspection", "inspect"],
        category: Category::Inspection,
        duration_minutes: 120,
        priority: Priority::Normal,
        title_prefix: Some(("inspection", "Property Inspection - ")),
    },
    IntentRule {
        keywords: &["meeting", "meet"],
        category: Category::Meeting,
        duration_minutes: 60,
        priority: Priority::Normal,
        title_prefix: None,
    },
    IntentRule {
        keywords: &["vendor", "contractor"],
        category: Category::Vendor,
        duration_minutes: 90,
        priority: Priority::Normal,
        title_prefix: None,
    },
    IntentRule {
        keywords: &["deadline", "due"],
        category: Category::Deadline,
        duration_minutes: 30,
        priority: Priority::High,
        title_prefix: None,
    },
];

/// Used when no category rule matches
pub static FALLBACK_RULE: IntentRule = IntentRule {
    keywords: &[],
    category: Category::General,
    duration_minutes: 60,
    priority: Priority::Normal,
    title_prefix: None,
};

/// Time-of-day keywords, evaluated in order
pub const TIME_OF_DAY_RULES: &[(&str, u32, u32)] = &[
    ("morning", 9, 0),
    ("afternoon", 14, 0),
    ("evening", 17, 0),
];

/// Start time when no time-of-day keyword is present
pub const DEFAULT_START: (u32, u32) = (9, 0);

/// What was read out of a scheduling phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftIntent {
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub duration_minutes: i64,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
}

impl DraftIntent {
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }
}

/// First category rule matching the phrase, or the fallback
pub fn match_rule(phrase: &str) -> &'static IntentRule {
    let lower = phrase.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .unwrap_or(&FALLBACK_RULE)
}

/// Read category, duration, priority and time of day from a phrase.
///
/// Matching is case-insensitive substring search. The title keeps the
/// phrase as typed; the inspection prefix check looks at it as typed too.
pub fn extract_intent(phrase: &str) -> EngineResult<DraftIntent> {
    let lower = phrase.to_lowercase();
    let rule = match_rule(phrase);

    let title = match rule.title_prefix {
        Some((marker, prefix)) if !phrase.contains(marker) => format!("{}{}", prefix, phrase),
        _ => phrase.to_string(),
    };

    let (hour, minute) = TIME_OF_DAY_RULES
        .iter()
        .find(|(keyword, _, _)| lower.contains(keyword))
        .map(|(_, hour, minute)| (*hour, *minute))
        .unwrap_or(DEFAULT_START);

    Ok(DraftIntent {
        title,
        category: rule.category,
        priority: rule.priority,
        duration_minutes: rule.duration_minutes,
        start_time: time_of_day(hour, minute)?,
    })
}

/// Turn a phrase into a draft event on `date`
pub fn extract_draft(
    phrase: &str,
    date: NaiveDate,
    created_by: &str,
) -> EngineResult<(CalendarEvent, DraftIntent)> {
    let intent = extract_intent(phrase)?;
    let start = date.and_time(intent.start_time);
    let end = start
        .checked_add_signed(intent.duration())
        .ok_or_else(|| validation_error(&format!("Draft starting {} runs past the calendar", start)))?;

    let draft = CalendarEvent::new(intent.title.clone(), start, end)
        .with_category(intent.category)
        .with_priority(intent.priority)
        .created_by(created_by);

    Ok((draft, intent))
}
