use super::models::{CalendarEvent, Category, Priority};
use crate::error::EngineResult;
use crate::utils::time::parse_datetime;

/// Sample property-management calendar for January 2025
pub fn demo_events(created_by: &str) -> EngineResult<Vec<CalendarEvent>> {
    Ok(vec![
        CalendarEvent::new(
            "Property Inspection - Sunset Apartments",
            parse_datetime("2025-01-15T09:00")?,
            parse_datetime("2025-01-15T11:00")?,
        )
        .with_description("Monthly property inspection with maintenance team")
        .with_category(Category::Inspection)
        .with_priority(Priority::High)
        .with_property("sunset-apartments")
        .with_attendees(["maintenance@property.com", "inspector@company.com"])
        .with_location("Sunset Apartments - Lobby")
        .created_by(created_by),
        CalendarEvent::new(
            "Tenant Meeting - Unit 205",
            parse_datetime("2025-01-16T14:00")?,
            parse_datetime("2025-01-16T15:00")?,
        )
        .with_description("Lease renewal discussion with Sarah Johnson")
        .with_category(Category::Meeting)
        .with_property("sunset-apartments")
        .with_attendees(["sarah.johnson@email.com"])
        .with_location("Property Office")
        .created_by(created_by),
        CalendarEvent::new(
            "Vendor Meeting - HVAC Maintenance",
            parse_datetime("2025-01-17T10:30")?,
            parse_datetime("2025-01-17T11:30")?,
        )
        .with_description("Annual HVAC maintenance contract discussion")
        .with_category(Category::Vendor)
        .with_priority(Priority::Medium)
        .with_attendees(["hvac@solutions.com"])
        .with_location("Main Office")
        .created_by(created_by),
        CalendarEvent::new(
            "Owner Report Due",
            parse_datetime("2025-01-31T17:00")?,
            parse_datetime("2025-01-31T18:00")?,
        )
        .with_description("Monthly financial reports due for all properties")
        .with_category(Category::Deadline)
        .with_priority(Priority::High)
        .created_by(created_by),
    ])
}
