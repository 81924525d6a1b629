use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::TableState;
use taskdesk_core::{Field, SubmitOutcome, TaskApi, TaskClient, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Form(Field),
    ConfirmDelete(TaskId),
}

/// Work that needs the API. Everything else is handled synchronously in
/// [`App::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Reload,
    Edit(TaskId),
    Delete { id: TaskId, confirmed: bool },
    Submit,
}

pub struct App<A: TaskApi> {
    pub client: TaskClient<A>,
    pub state: TableState,
    pub focus: Focus,
    /// Cursor position in chars within the focused text field.
    pub cursor_position: usize,
    /// Set while a request is in flight; input is ignored meanwhile.
    pub busy: bool,
}

impl<A: TaskApi> App<A> {
    pub fn new(client: TaskClient<A>) -> Self {
        Self {
            client,
            state: TableState::default(),
            focus: Focus::List,
            cursor_position: 0,
            busy: false,
        }
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        let cards = self.client.list().cards();
        self.state.selected().and_then(|i| cards.get(i)).map(|card| card.id)
    }

    pub fn next(&mut self) {
        let len = self.client.list().cards().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.client.list().cards().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Keeps the selection on a card after the list changed size.
    fn clamp_selection(&mut self) {
        let len = self.client.list().cards().len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::Form(field) => self.handle_form_key(field, key),
            Focus::ConfirmDelete(id) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.focus = Focus::List;
                    Some(Action::Delete { id, confirmed: true })
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.focus = Focus::List;
                    Some(Action::Delete { id, confirmed: false })
                }
                _ => None,
            },
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => self.selected_id().map(Action::Edit),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.focus = Focus::ConfirmDelete(id);
                }
                None
            }
            KeyCode::Char('a') => {
                self.client.cancel_edit();
                self.focus_field(Field::Title);
                None
            }
            KeyCode::Tab => {
                self.focus_field(Field::Title);
                None
            }
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('x') => {
                self.client.messages_mut().dismiss();
                None
            }
            _ => None,
        }
    }

    fn handle_form_key(&mut self, field: Field, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => return Some(Action::Submit),
            KeyCode::Esc => {
                // Esc while creating just leaves the form; the typed text stays.
                if self.client.mode().is_editing() {
                    self.client.cancel_edit();
                }
                self.focus = Focus::List;
            }
            KeyCode::Tab => self.focus_field(field.next()),
            KeyCode::BackTab => self.focus_field(field.previous()),
            KeyCode::Left => self.move_left(field),
            KeyCode::Right => self.move_right(field),
            KeyCode::Backspace => self.delete_char(field),
            KeyCode::Char(c) => self.input_char(field, c),
            _ => {}
        }
        None
    }

    pub fn focus_field(&mut self, field: Field) {
        self.focus = Focus::Form(field);
        self.cursor_position = self
            .client
            .form()
            .text(field)
            .map_or(0, |text| text.chars().count());
    }

    fn input_char(&mut self, field: Field, c: char) {
        let cursor = self.cursor_position;
        if let Some(text) = self.client.form_mut().text_mut(field) {
            let byte_index = byte_index(text, cursor);
            text.insert(byte_index, c);
            self.cursor_position += 1;
        }
    }

    fn delete_char(&mut self, field: Field) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor = self.cursor_position;
        if let Some(text) = self.client.form_mut().text_mut(field) {
            let byte_index = byte_index(text, cursor - 1);
            text.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    fn move_left(&mut self, field: Field) {
        let form = self.client.form_mut();
        match field {
            Field::Status => form.status = form.status.previous(),
            Field::Priority => form.priority = form.priority.previous(),
            _ => self.cursor_position = self.cursor_position.saturating_sub(1),
        }
    }

    fn move_right(&mut self, field: Field) {
        let form = self.client.form_mut();
        match field {
            Field::Status => form.status = form.status.next(),
            Field::Priority => form.priority = form.priority.next(),
            _ => {
                let len = form.text(field).map_or(0, |text| text.chars().count());
                if self.cursor_position < len {
                    self.cursor_position += 1;
                }
            }
        }
    }

    pub async fn perform(&mut self, action: Action) {
        match action {
            Action::Quit => {}
            Action::Reload => {
                self.client.load_tasks().await;
                self.clamp_selection();
            }
            Action::Edit(id) => {
                if self.client.begin_edit(id).await {
                    self.focus_field(Field::Title);
                }
            }
            Action::Delete { id, confirmed } => {
                self.client.delete_task(id, &mut |_: &str| confirmed).await;
                self.clamp_selection();
            }
            Action::Submit => {
                let was_creating = !self.client.mode().is_editing();
                match self.client.submit().await {
                    SubmitOutcome::Blocked(_) => self.focus_field(Field::Title),
                    SubmitOutcome::Failed => {}
                    _ => {
                        self.clamp_selection();
                        self.focus = if was_creating {
                            Focus::Form(Field::Title)
                        } else {
                            Focus::List
                        };
                        self.cursor_position = 0;
                    }
                }
            }
        }
    }
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.chars().take(char_index).map(|c| c.len_utf8()).sum()
}
