use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{anyhow, Result};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskdesk_core::client::{DeleteOutcome, TaskCard};
use taskdesk_core::render::html::render_list;
use taskdesk_core::render::terminal::{sanitize, sanitize_line};
use taskdesk_core::{apply_to_form, parse_args, SubmitOutcome, TaskApi, TaskClient, TaskList};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl From<&TaskCard> for TaskRow {
    fn from(card: &TaskCard) -> Self {
        Self {
            id: card.id,
            status: card.status.to_string(),
            priority: card.priority.to_string(),
            due: card.due.to_string(),
            title: sanitize_line(&card.title),
        }
    }
}

/// Prints the message the last operation left behind. An error message
/// becomes the command's error so the exit status reflects it.
fn report<A: TaskApi>(client: &TaskClient<A>) -> Result<()> {
    let messages = client.messages();
    if let Some(error) = messages.error() {
        return Err(anyhow!(sanitize(error)));
    }
    if let Some(success) = messages.success() {
        println!("{}", success);
    }
    Ok(())
}

pub async fn list<A: TaskApi>(client: &mut TaskClient<A>) -> Result<()> {
    client.load_tasks().await;
    report(client)?;

    match client.list() {
        TaskList::Cards(cards) => {
            let rows: Vec<TaskRow> = cards.iter().map(TaskRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
        }
        other => println!("{}", other.placeholder().unwrap_or_default()),
    }
    Ok(())
}

pub async fn show<A: TaskApi>(client: &TaskClient<A>, id: u64) -> Result<()> {
    let task = client
        .api()
        .get(id)
        .await
        .map_err(|e| anyhow!("Could not load task: {}", e))?;
    let card = TaskCard::from(&task);

    println!("#{} {}", card.id, sanitize_line(&card.title));
    println!("  Status:   {}", card.status);
    println!("  Priority: {}", card.priority);
    println!("  Due:      {}", card.due);
    if let Some(description) = &card.description {
        println!();
        for line in sanitize(description).lines() {
            println!("  {}", line);
        }
    }
    Ok(())
}

pub async fn add<A: TaskApi>(client: &mut TaskClient<A>, args: &[String]) -> Result<()> {
    let parsed = parse_args(args);
    apply_to_form(&parsed, client.form_mut())?;
    submit(client).await
}

pub async fn edit<A: TaskApi>(client: &mut TaskClient<A>, id: u64, args: &[String]) -> Result<()> {
    if !client.begin_edit(id).await {
        return report(client);
    }
    let parsed = parse_args(args);
    apply_to_form(&parsed, client.form_mut())?;
    submit(client).await
}

async fn submit<A: TaskApi>(client: &mut TaskClient<A>) -> Result<()> {
    match client.submit().await {
        SubmitOutcome::Blocked(err) => Err(err.into()),
        SubmitOutcome::Created(task) => {
            report(client)?;
            println!("  ID: {}", task.id);
            Ok(())
        }
        SubmitOutcome::Updated(_) | SubmitOutcome::Failed => report(client),
    }
}

pub async fn delete<A: TaskApi>(client: &mut TaskClient<A>, id: u64, yes: bool) -> Result<()> {
    let mut confirm = |prompt: &str| yes || ask(prompt);
    match client.delete_task(id, &mut confirm).await {
        DeleteOutcome::Declined => {
            println!("Cancelled.");
            Ok(())
        }
        DeleteOutcome::Deleted | DeleteOutcome::Failed => report(client),
    }
}

fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub async fn render<A: TaskApi>(client: &mut TaskClient<A>, output: Option<&Path>) -> Result<()> {
    client.load_tasks().await;
    let html = render_list(client.list());

    match output {
        Some(path) => std::fs::write(path, &html)?,
        None => print!("{}", html),
    }

    // The failure placeholder is still rendered; the error decides the exit code.
    match client.messages().error() {
        Some(error) => Err(anyhow!(error.to_string())),
        None => Ok(()),
    }
}

pub async fn health<A: TaskApi>(client: &TaskClient<A>) -> Result<()> {
    client
        .api()
        .health()
        .await
        .map_err(|e| anyhow!("API is not healthy: {}", e))?;
    println!("API is healthy");
    Ok(())
}
