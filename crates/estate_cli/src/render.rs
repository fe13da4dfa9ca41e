//! Text and JSON rendering of action outcomes.

use crate::action::Outcome;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl Format {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

pub fn render(outcome: &Outcome, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_text(outcome)),
        Format::Json => render_json(outcome),
    }
}

fn render_text(outcome: &Outcome) -> String {
    let lines: Vec<String> = match outcome {
        Outcome::Message(message) => vec![message.clone()],
        Outcome::Agents(agents) => agents
            .iter()
            .map(|a| format!("Agent ID: {}, Name: {}, Email: {}", a.id, a.name, a.email))
            .collect(),
        Outcome::Properties(properties) => properties
            .iter()
            .map(|p| {
                format!(
                    "Property ID: {}, Address: {}, Location: {}, Agent ID: {}",
                    p.id, p.address, p.location, p.agent_id
                )
            })
            .collect(),
        Outcome::Rooms(rooms) => rooms
            .iter()
            .map(|r| {
                format!(
                    "Room ID: {}, Type: {}, Size: {}, Property ID: {}",
                    r.id, r.kind, r.size, r.property_id
                )
            })
            .collect(),
        Outcome::Clients(clients) => clients
            .iter()
            .map(|c| format!("Client ID: {}, Name: {}, Email: {}", c.id, c.name, c.email))
            .collect(),
        Outcome::Payments(payments) => payments
            .iter()
            .map(|p| {
                format!(
                    "Payment ID: {}, Amount: {}, Date: {}, Client ID: {}",
                    p.id, p.amount, p.date, p.client_id
                )
            })
            .collect(),
    };

    if lines.is_empty() {
        "No records.".to_string()
    } else {
        lines.join("\n")
    }
}

fn render_json(outcome: &Outcome) -> Result<String> {
    let value = match outcome {
        Outcome::Message(message) => serde_json::json!({ "message": message }),
        Outcome::Agents(items) => serde_json::to_value(items)?,
        Outcome::Properties(items) => serde_json::to_value(items)?,
        Outcome::Rooms(items) => serde_json::to_value(items)?,
        Outcome::Clients(items) => serde_json::to_value(items)?,
        Outcome::Payments(items) => serde_json::to_value(items)?,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::{render, Format};
    use crate::action::Outcome;
    use chrono::NaiveDate;
    use estate_core::{Payment, Room};

    #[test]
    fn rooms_render_one_line_each() {
        let outcome = Outcome::Rooms(vec![Room {
            id: 1,
            kind: "Kitchen".to_string(),
            size: 12.5,
            property_id: 3,
        }]);
        assert_eq!(
            render(&outcome, Format::Text).unwrap(),
            "Room ID: 1, Type: Kitchen, Size: 12.5, Property ID: 3"
        );
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(
            render(&Outcome::Clients(Vec::new()), Format::Text).unwrap(),
            "No records."
        );
    }

    #[test]
    fn json_uses_iso_dates() {
        let outcome = Outcome::Payments(vec![Payment {
            id: 9,
            amount: 100.0,
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            client_id: 2,
        }]);
        let json: serde_json::Value =
            serde_json::from_str(&render(&outcome, Format::Json).unwrap()).unwrap();
        assert_eq!(json[0]["date"], "2024-01-31");
        assert_eq!(json[0]["client_id"], 2);
    }
}
