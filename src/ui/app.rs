use std::cmp::min;
use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{ItemKind, ReadingItem};
use crate::shelf::{LoadReport, RemoveOutcome, Shelf};

use super::forms::{ItemForm, KindChooser, RemoveForm};
use super::helpers::{centered_rect, filter_label, kind_badge, surface_error};
use super::screens::ShelfScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per item card in the list.
const ITEM_CARD_HEIGHT: u16 = 5;

/// Fine-grained modes layered over the shelf list.
enum Mode {
    Normal,
    ChoosingKind(KindChooser),
    AddingItem(ItemForm),
    RemovingItem(RemoveForm),
    ViewingDetails(ReadingItem),
    Searching(SearchState),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    shelf: Shelf,
    screen: ShelfScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(shelf: Shelf, report: LoadReport) -> Self {
        let screen = ShelfScreen::new(&shelf);
        let mut app = Self {
            shelf,
            screen,
            mode: Mode::Normal,
            status: None,
        };
        app.report_load(report);
        app
    }

    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::ChoosingKind(chooser) => self.handle_choose_kind(code, chooser),
            Mode::AddingItem(form) => self.handle_add_item(code, form),
            Mode::RemovingItem(form) => self.handle_remove_item(code, form),
            Mode::ViewingDetails(item) => match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Mode::Normal,
                _ => Mode::ViewingDetails(item),
            },
            Mode::Searching(state) => self.handle_search(code, state),
        };

        self.mode = mode;
        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-5),
            KeyCode::PageDown => self.screen.move_selection(5),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Tab | KeyCode::BackTab => {
                let forward = code == KeyCode::Tab;
                let kind = self.screen.cycle_kind_filter(&self.shelf, forward);
                self.set_status(
                    format!("Showing {}.", filter_label(kind).to_lowercase()),
                    StatusKind::Info,
                );
            }
            KeyCode::Enter => {
                if let Some(item) = self.screen.current_item().cloned() {
                    self.clear_status();
                    return Mode::ViewingDetails(item);
                }
                self.set_status("No item selected.", StatusKind::Error);
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                let query = self.screen.query.clone().unwrap_or_default();
                return Mode::Searching(SearchState { query });
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Mode::ChoosingKind(KindChooser::default());
            }
            KeyCode::Char('-') | KeyCode::Char('d') => {
                self.clear_status();
                return Mode::RemovingItem(RemoveForm::for_item(self.screen.current_item()));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_choose_kind(&mut self, code: KeyCode, mut chooser: KindChooser) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add item cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Up | KeyCode::BackTab => {
                chooser.move_selection(-1);
                Mode::ChoosingKind(chooser)
            }
            KeyCode::Down | KeyCode::Tab => {
                chooser.move_selection(1);
                Mode::ChoosingKind(chooser)
            }
            KeyCode::Enter => Mode::AddingItem(ItemForm::new(chooser.current())),
            KeyCode::Char(ch) => match KindChooser::kind_for_key(ch) {
                Some(kind) => Mode::AddingItem(ItemForm::new(kind)),
                None => Mode::ChoosingKind(chooser),
            },
            _ => Mode::ChoosingKind(chooser),
        }
    }

    fn handle_add_item(&mut self, code: KeyCode, mut form: ItemForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add item cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_item(&form) {
                Ok(()) => keep_open = false,
                Err(message) => {
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::AddingItem(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_remove_item(&mut self, code: KeyCode, mut form: RemoveForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::RemovingItem(form)
            }
            KeyCode::Enter => match self.shelf.remove(&form.prefix) {
                Ok(RemoveOutcome::Removed(count)) => {
                    self.screen.refresh(&self.shelf);
                    let message = if count == 1 {
                        format!("Removed item '{}'.", form.prefix.trim())
                    } else {
                        format!("Removed {count} items matching '{}'.", form.prefix.trim())
                    };
                    self.set_status(message, StatusKind::Info);
                    Mode::Normal
                }
                Ok(RemoveOutcome::NotFound) => {
                    let message = format!("No item found with ID '{}'.", form.prefix.trim());
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                    Mode::RemovingItem(form)
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                    Mode::RemovingItem(form)
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
                Mode::RemovingItem(form)
            }
            _ => Mode::RemovingItem(form),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        match code {
            KeyCode::Esc => {
                self.screen.set_query(&self.shelf, None);
                return Mode::Normal;
            }
            KeyCode::Enter => {
                if let Some(item) = self.screen.current_item().cloned() {
                    return Mode::ViewingDetails(item);
                }
                return Mode::Searching(state);
            }
            KeyCode::Up => {
                self.screen.move_selection(-1);
                return Mode::Searching(state);
            }
            KeyCode::Down => {
                self.screen.move_selection(1);
                return Mode::Searching(state);
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                }
            }
            _ => {}
        }

        if state.query.trim().is_empty() {
            self.screen.set_query(&self.shelf, None);
        } else {
            self.screen.set_query(&self.shelf, Some(state.query.clone()));
        }
        Mode::Searching(state)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_shelf(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::ChoosingKind(chooser) => self.draw_kind_chooser(frame, area, chooser),
            Mode::AddingItem(form) => self.draw_item_form(frame, area, form),
            Mode::RemovingItem(form) => self.draw_remove_form(frame, area, form),
            Mode::ViewingDetails(item) => self.draw_details(frame, area, item),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_shelf(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        let mut filter_spans = vec![Span::styled(
            filter_label(self.screen.kind_filter),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(query) = self.screen.query.as_ref().filter(|q| !q.trim().is_empty()) {
            filter_spans.push(Span::raw(format!("  •  title contains \"{query}\"")));
        }

        let header = Paragraph::new(vec![
            Line::from(Span::raw(format!(
                "{} of {} items shown",
                self.screen.visible.len(),
                self.shelf.len()
            ))),
            Line::from(filter_spans),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Reading Shelf"));
        frame.render_widget(header, chunks[0]);

        let list_area = chunks[1];
        if list_area.height == 0 {
            return;
        }

        if self.screen.visible.is_empty() {
            let message_text = if self.shelf.is_empty() {
                "The shelf is empty. Press '+' to add an item."
            } else if self.screen.has_filters() {
                "No items match the current filters."
            } else {
                "No items to display."
            };
            let message = Paragraph::new(message_text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, list_area);
            return;
        }

        self.render_item_cards(frame, list_area, &self.screen.visible, self.screen.selected);
    }

    fn render_item_cards(
        &self,
        frame: &mut Frame,
        area: Rect,
        items: &[ReadingItem],
        selected: usize,
    ) {
        let card_height = ITEM_CARD_HEIGHT as usize;
        let capacity = ((area.height as usize) / card_height).max(1);
        let len = items.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = min(start + capacity, len);
        let visible_len = end.saturating_sub(start);
        if visible_len == 0 {
            return;
        }

        let constraints: Vec<Constraint> = (0..visible_len)
            .map(|_| Constraint::Length(ITEM_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, chunk) in rows.iter().enumerate() {
            if chunk.height == 0 {
                continue;
            }

            let item_index = start + idx;
            if item_index >= len {
                break;
            }

            let item = &items[item_index];
            let mut block = Block::default().borders(Borders::ALL);
            let mut paragraph_style = Style::default();
            if item_index == selected {
                block = block.style(Style::default().fg(Color::Yellow));
                paragraph_style = Style::default().fg(Color::Yellow);
            }

            let title = if item_index == selected {
                format!("▶ {}", item.title)
            } else {
                item.title.clone()
            };
            let author = if item.author.trim().is_empty() {
                "Unknown author".to_string()
            } else {
                item.author.trim().to_string()
            };

            let lines = vec![
                Line::from(vec![
                    kind_badge(item.kind()),
                    Span::raw(" "),
                    Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(author, Style::default().fg(Color::Gray))),
                Line::from(Span::styled(
                    format!("ID: {}...", item.short_id()),
                    Style::default().fg(Color::DarkGray),
                )),
            ];

            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Left)
                .style(paragraph_style);

            frame.render_widget(paragraph, *chunk);
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::Searching(_) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Details   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Clear Search"),
            ]),
            Mode::ViewingDetails(_) => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ]),
            _ => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Details   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Filter Kind   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[-]", key_style),
                Span::raw(" Remove   "),
                Span::styled("[r]", key_style),
                Span::raw(" Reload   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search by title");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_kind_chooser(&self, frame: &mut Frame, area: Rect, chooser: &KindChooser) {
        let popup_area = centered_rect(40, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Item").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let items: Vec<ListItem> = ItemKind::ALL
            .iter()
            .map(|kind| {
                let shortcut = kind.as_tag().chars().next().unwrap_or(' ').to_ascii_lowercase();
                ListItem::new(format!("({shortcut}) {kind}"))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        state.select(Some(chooser.selected));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn draw_item_form(&self, frame: &mut Frame, area: Rect, form: &ItemForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!("Add {}", form.kind))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = form
            .fields()
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let field = form.active_field();
        let prefix = field.label().len() as u16 + 2;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(field) as u16,
            inner.y + form.active as u16,
        ));
    }

    fn draw_remove_form(&self, frame: &mut Frame, area: Rect, form: &RemoveForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Remove Item").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            Line::from(vec![
                Span::raw("ID or prefix: "),
                Span::styled(form.prefix.clone(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(Span::styled(
                "Every item whose ID starts with this text is removed.",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to remove • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "ID or prefix: ".len() as u16 + form.prefix.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_details(&self, frame: &mut Frame, area: Rect, item: &ReadingItem) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(item.title.clone()).borders(Borders::ALL);
        let lines: Vec<Line> = item
            .details()
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn report_load(&mut self, report: LoadReport) {
        if report.skipped > 0 {
            self.set_status(
                format!(
                    "Loaded {} items; skipped {} unreadable records.",
                    report.loaded, report.skipped
                ),
                StatusKind::Error,
            );
        } else {
            self.set_status(format!("Loaded {} items.", report.loaded), StatusKind::Info);
        }
    }

    fn reload(&mut self) {
        match self.shelf.load() {
            Ok(report) => {
                self.screen.refresh(&self.shelf);
                self.report_load(report);
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn save_new_item(&mut self, form: &ItemForm) -> Result<(), String> {
        let (title, author, details) = form.parse_inputs().map_err(|err| err.to_string())?;
        let item = self.shelf.new_item(title, author, details);
        let id = item.id().to_string();
        let message = format!("'{}' added and saved.", item.title);
        self.shelf.add(item).map_err(|err| surface_error(&err))?;

        self.screen.refresh(&self.shelf);
        self.screen.focus(&id);
        self.set_status(message, StatusKind::Info);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::models::SequentialIds;

    fn app_in(dir: &tempfile::TempDir) -> App {
        let store = Store::open(dir.path().join("shelf.sqlite")).unwrap();
        let (shelf, report) =
            Shelf::with_id_generator(store, Box::new(SequentialIds::new("item"))).unwrap();
        App::new(shelf, report)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    #[test]
    fn adding_a_book_through_the_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        app.handle_key(KeyCode::Char('+'));
        app.handle_key(KeyCode::Char('b'));
        type_text(&mut app, "Dune");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Frank Herbert");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "412");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.shelf.len(), 1);
        assert_eq!(app.screen.visible[0].title, "Dune");
    }

    #[test]
    fn saved_item_is_focused_and_announced() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        for title in ["Emma", "Watchmen"] {
            app.handle_key(KeyCode::Char('+'));
            app.handle_key(KeyCode::Char('c'));
            type_text(&mut app, title);
            app.handle_key(KeyCode::Enter);
        }

        assert_eq!(app.shelf.len(), 2);
        let focused = app.screen.current_item().map(|item| item.id().to_string());
        assert_eq!(focused.as_deref(), Some("item-000002"));
        let status = app.status.as_ref().map(|status| status.text.as_str());
        assert_eq!(status, Some("'Watchmen' added and saved."));
    }

    #[test]
    fn zero_pages_keeps_form_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        app.handle_key(KeyCode::Char('+'));
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "Dune");
        app.handle_key(KeyCode::BackTab);
        type_text(&mut app, "0");
        app.handle_key(KeyCode::Enter);

        match &app.mode {
            Mode::AddingItem(form) => assert!(form.error.is_some()),
            _ => panic!("form should stay open"),
        }
        assert!(app.shelf.is_empty());
    }

    #[test]
    fn removing_unknown_prefix_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        app.handle_key(KeyCode::Char('-'));
        type_text(&mut app, "nothing");
        app.handle_key(KeyCode::Enter);

        match &app.mode {
            Mode::RemovingItem(form) => {
                assert_eq!(form.error.as_deref(), Some("No item found with ID 'nothing'."))
            }
            _ => panic!("remove prompt should stay open"),
        }
    }

    #[test]
    fn quit_key_exits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
