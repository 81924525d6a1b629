use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::model::form::TaskForm;
use crate::time::parse_due_date;

/// Metadata keys understood on the command line; any unique prefix works
/// (`pri:h`, `du:fri`, `desc:"..."`).
pub const KNOWN_KEYS: [&str; 4] = ["description", "status", "priority", "due"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub metadata: HashMap<String, String>,
}

/// Splits words into the title and `key:value` pairs. Only words whose key
/// is a prefix of a known key count as metadata, so `10:30` stays in the
/// title.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && KNOWN_KEYS.iter().any(|k| k.starts_with(key)) {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: {}", key)),
        _ => Err(anyhow!("Ambiguous key '{}': matches {}", key, matches.join(", "))),
    }
}

/// Applies parsed words to a form. A non-empty title replaces the form's
/// title; each metadata key overrides its field.
pub fn apply_to_form(parsed: &ParsedInput, form: &mut TaskForm) -> Result<()> {
    if !parsed.title.is_empty() {
        form.title = parsed.title.clone();
    }

    for (key, value) in &parsed.metadata {
        match expand_key(key, &KNOWN_KEYS)?.as_str() {
            "description" => form.description = value.clone(),
            "status" => form.status = value.parse().map_err(|e: String| anyhow!(e))?,
            "priority" => form.priority = value.parse().map_err(|e: String| anyhow!(e))?,
            "due" => {
                form.due_date = if value.is_empty() || value == "none" {
                    String::new()
                } else {
                    parse_due_date(value)?.format("%Y-%m-%d").to_string()
                };
            }
            _ => {}
        }
    }
    Ok(())
}
