//! Turns retrieved products into a stylist prompt and asks the chat model to
//! narrate them.

use domain::message::ChatMessage;
use domain::models::{MatchRecord, Query, StylistResponse};
use domain::ports::ChatModel;
use shared::types::Result;
use tracing::{debug, info};

pub const STYLIST_PERSONA: &str = "You are a fashion stylist.";

/// Returned instead of a model completion when the index found nothing.
pub const NO_MATCHES_RESPONSE: &str = "I couldn't find any products that match your request. \
Try describing it differently, for example by colour, fabric or occasion.";

const TABLE_HEADER: &str = "| **Name** | **Category** | **Price ($)** | **Description** | **URL** |";
const TABLE_SEPARATOR: &str = "|----------|--------------|---------------|-----------------|---------|";

/// Display tuple in table column order.
fn project(record: &MatchRecord) -> (&str, &str, &str, &str, &str) {
    (
        record.name.as_str(),
        record.category.as_str(),
        record.price.as_str(),
        record.description.as_str(),
        record.url.as_str(),
    )
}

/// One Markdown row per record, in list order.
pub fn render_rows(matches: &[MatchRecord]) -> String {
    matches
        .iter()
        .map(|record| {
            let (name, category, price, description, url) = project(record);
            format!("| {name} | {category} | {price} | {description} | [Link]({url}) |")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header, separator and rows.
pub fn render_table(matches: &[MatchRecord]) -> String {
    let mut table = format!("{TABLE_HEADER}\n{TABLE_SEPARATOR}");
    let rows = render_rows(matches);
    if !rows.is_empty() {
        table.push('\n');
        table.push_str(&rows);
    }
    table
}

pub fn build_prompt(query: &Query, matches: &[MatchRecord]) -> String {
    format!(
        "You are a personal stylist. The user is looking for fashion recommendations based on the following query: \"{query}\".\n\
Based on the products retrieved from a database, craft a conversational response as a stylist, explaining why these products are great choices.\n\
Here are the products presented in a tabular format:\n\n\
{table}\n\n\
After presenting the table, provide a friendly and stylish response. Be creative and make it engaging.",
        table = render_table(matches)
    )
}

/// Persona first, then the constructed prompt as the user turn.
pub fn build_messages(query: &Query, matches: &[MatchRecord]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(STYLIST_PERSONA),
        ChatMessage::user(build_prompt(query, matches)),
    ]
}

pub struct ResponseComposer<C> {
    chat: C,
}

impl<C: ChatModel> ResponseComposer<C> {
    pub fn new(chat: C) -> Self {
        Self { chat }
    }

    pub async fn compose(&self, matches: &[MatchRecord], query: &Query) -> Result<StylistResponse> {
        if matches.is_empty() {
            info!("no matches retrieved; skipping chat completion");
            return Ok(StylistResponse::new(NO_MATCHES_RESPONSE));
        }
        let messages = build_messages(query, matches);
        debug!(products = matches.len(), "requesting stylist completion");
        let text = self.chat.complete(&messages).await?;
        Ok(StylistResponse::new(text))
    }
}
