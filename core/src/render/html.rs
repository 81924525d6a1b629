use std::borrow::Cow;
use std::fmt::Write;

use crate::client::view::{DueLabel, TaskCard, TaskList};

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Markup for the list region.
///
/// Action buttons carry the task id as data attributes instead of inline
/// handlers; the page binds one listener per card.
pub fn render_list(list: &TaskList) -> String {
    match list {
        TaskList::Cards(cards) => cards.iter().map(render_card).collect(),
        other => format!(
            "<p class=\"loading\">{}</p>\n",
            escape_html(other.placeholder().unwrap_or_default())
        ),
    }
}

pub fn render_card(card: &TaskCard) -> String {
    let mut html = String::new();
    let status = card.status.as_str();
    let priority = card.priority.as_str();

    // Writing to a String cannot fail.
    let _ = writeln!(html, "<div class=\"task-card\" data-task-id=\"{}\">", card.id);
    let _ = writeln!(html, "  <div class=\"task-header\">");
    let _ = writeln!(html, "    <h3 class=\"task-title\">{}</h3>", escape_html(&card.title));
    let _ = writeln!(html, "    <div class=\"task-badges\">");
    let _ = writeln!(html, "      <span class=\"badge badge-status {0}\">{0}</span>", status);
    let _ = writeln!(html, "      <span class=\"badge badge-priority {0}\">{0}</span>", priority);
    let _ = writeln!(html, "    </div>");
    let _ = writeln!(html, "  </div>");
    if let Some(description) = &card.description {
        let _ = writeln!(html, "  <p class=\"task-description\">{}</p>", escape_html(description));
    }
    let _ = writeln!(html, "  <div class=\"task-footer\">");
    let due_class = match card.due {
        DueLabel::Date(_) => "task-date",
        DueLabel::NoDeadline => "task-date no-deadline",
    };
    let _ = writeln!(html, "    <span class=\"{}\">{}</span>", due_class, card.due);
    let _ = writeln!(html, "    <div class=\"task-actions\">");
    let _ = writeln!(
        html,
        "      <button class=\"btn btn-edit\" data-action=\"edit\" data-task-id=\"{}\">Edit</button>",
        card.id
    );
    let _ = writeln!(
        html,
        "      <button class=\"btn btn-delete\" data-action=\"delete\" data-task-id=\"{}\">Delete</button>",
        card.id
    );
    let _ = writeln!(html, "    </div>");
    let _ = writeln!(html, "  </div>");
    let _ = writeln!(html, "</div>");
    html
}
