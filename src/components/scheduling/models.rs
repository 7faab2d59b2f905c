use super::interval::Interval;
use crate::error::{validation_error, EngineResult};
use crate::utils::time::{end_of_day, hh_mm, start_of_day};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored event
pub type EventId = String;

/// Minutes before the start at which a reminder is due
pub const DEFAULT_REMINDER_MINUTES: u32 = 15;

/// Closed set of event categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Inspection,
    Meeting,
    Vendor,
    Deadline,
    Maintenance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Inspection => "inspection",
            Category::Meeting => "meeting",
            Category::Vendor => "vendor",
            Category::Deadline => "deadline",
            Category::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Category::General),
            "inspection" => Ok(Category::Inspection),
            "meeting" => Ok(Category::Meeting),
            "vendor" => Ok(Category::Vendor),
            "deadline" => Ok(Category::Deadline),
            "maintenance" => Ok(Category::Maintenance),
            other => Err(validation_error(&format!("Unknown category: {}", other))),
        }
    }
}

/// Event priority
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_reminder_minutes() -> u32 {
    DEFAULT_REMINDER_MINUTES
}

/// A calendar event, either a draft (no id yet) or a stored one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    pub title: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: u32,
    #[serde(default)]
    pub created_by: String,
}

impl CalendarEvent {
    /// Create a draft with default category, priority and no id
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: None,
            title: title.into(),
            category: Category::default(),
            priority: Priority::default(),
            start,
            end,
            is_all_day: false,
            location: None,
            description: None,
            property_id: None,
            attendees: Vec::new(),
            reminder_minutes: DEFAULT_REMINDER_MINUTES,
            created_by: String::new(),
        }
    }

    /// Create an all-day draft covering `date`
    pub fn all_day(title: impl Into<String>, date: NaiveDate) -> EngineResult<Self> {
        let mut event = Self::new(title, start_of_day(date), end_of_day(date)?);
        event.is_all_day = true;
        Ok(event)
    }

    pub fn with_id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, property_id: impl Into<String>) -> Self {
        self.property_id = Some(property_id.into());
        self
    }

    pub fn with_attendees<I, S>(mut self, attendees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendees = attendees.into_iter().map(Into::into).collect();
        self
    }

    pub fn created_by(mut self, actor: impl Into<String>) -> Self {
        self.created_by = actor.into();
        self
    }

    /// Calendar day the event belongs to
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    /// The half-open interval the event occupies.
    ///
    /// All-day events always cover `[day 00:00, next day 00:00)` whatever
    /// their stored end is.
    pub fn interval(&self) -> EngineResult<Interval> {
        if self.is_all_day {
            Interval::all_day(self.day())
        } else {
            Interval::new(self.start, self.end)
        }
    }

    /// Check the invariants required for persistence
    pub fn validate(&self) -> EngineResult<()> {
        if self.title.trim().is_empty() {
            return Err(validation_error("Event title must not be empty"));
        }
        self.interval()?;
        Ok(())
    }

    /// Collapse an all-day event onto its calendar day
    pub fn normalize(&mut self) -> EngineResult<()> {
        if self.is_all_day {
            let day = self.day();
            self.start = start_of_day(day);
            self.end = end_of_day(day)?;
        }
        Ok(())
    }
}

/// Kind of a suggestion, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Conflict,
    Optimization,
    Efficiency,
}

/// A candidate start time offered with a conflict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AlternativeSlot {
    #[serde(with = "hh_mm")]
    #[schemars(with = "String")]
    pub time: NaiveTime,
    pub reason: String,
}

/// Scheduling advice for a proposed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Suggestion {
    #[serde(rename_all = "camelCase")]
    Conflict {
        message: String,
        conflicting_event_id: Option<EventId>,
        alternatives: Vec<AlternativeSlot>,
    },
    Optimization {
        message: String,
        recommendation: String,
    },
    #[serde(rename_all = "camelCase")]
    Efficiency {
        message: String,
        related_events: Vec<String>,
    },
}

impl Suggestion {
    pub fn kind(&self) -> SuggestionKind {
        match self {
            Suggestion::Conflict { .. } => SuggestionKind::Conflict,
            Suggestion::Optimization { .. } => SuggestionKind::Optimization,
            Suggestion::Efficiency { .. } => SuggestionKind::Efficiency,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Suggestion::Conflict { message, .. }
            | Suggestion::Optimization { message, .. }
            | Suggestion::Efficiency { message, .. } => message,
        }
    }
}
