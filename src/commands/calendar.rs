use crate::commands::{CommandContext, CommandResult};
use crate::components::scheduling::{CalendarEvent, EventId, Interval};
use crate::utils::time::today_in;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;

fn render<T: Serialize>(value: &T) -> CommandResult {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Draft an event from a phrase, on `date` or today in the configured timezone
pub async fn draft(ctx: &CommandContext, date: Option<NaiveDate>, phrase: &str) -> CommandResult {
    let (date, actor) = {
        let config = ctx.config.read().await;
        let date = match date {
            Some(date) => date,
            None => today_in(&config.tz()?, Utc::now()),
        };
        (date, config.default_actor.clone())
    };

    let proposal = ctx.handle.create_draft(phrase, date, actor).await?;
    render(&proposal)
}

/// Suggestions for a candidate event
pub async fn propose(ctx: &CommandContext, candidate: CalendarEvent) -> CommandResult {
    let suggestions = ctx.handle.propose(candidate).await?;
    render(&suggestions)
}

/// Insert or update an event
pub async fn save(ctx: &CommandContext, event: CalendarEvent) -> CommandResult {
    let actor = ctx.config.read().await.default_actor.clone();
    let id = ctx.handle.save(event, actor).await?;
    render(&json!({ "saved": id }))
}

pub async fn delete(ctx: &CommandContext, id: EventId) -> CommandResult {
    let actor = ctx.config.read().await.default_actor.clone();
    ctx.handle.delete(id.clone(), actor).await?;
    render(&json!({ "deleted": id }))
}

pub async fn get(ctx: &CommandContext, id: EventId) -> CommandResult {
    render(&ctx.handle.get(id).await?)
}

pub async fn day(ctx: &CommandContext, date: NaiveDate) -> CommandResult {
    render(&ctx.handle.list_for_day(date).await?)
}

pub async fn overlap(ctx: &CommandContext, interval: Interval) -> CommandResult {
    render(&ctx.handle.list_overlapping(interval).await?)
}

pub async fn agenda(ctx: &CommandContext) -> CommandResult {
    render(&ctx.handle.agenda().await?)
}
