//! # Search Screen
//!
//! One parameterized component behind both the "By City" and "By Artist"
//! tabs — the two screens differ only in title and placeholder, so they
//! share state handling and rendering. Search itself is not wired up;
//! submitting just surfaces a status note.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

pub enum SearchEvent {
    Submitted(String),
}

pub struct SearchScreen {
    title: &'static str,
    placeholder: &'static str,
    input: String,
    pub theme: Theme,
}

impl SearchScreen {
    pub fn by_city(theme: Theme) -> Self {
        Self {
            title: "Find Events By City",
            placeholder: "Enter city name",
            input: String::new(),
            theme,
        }
    }

    pub fn by_artist(theme: Theme) -> Self {
        Self {
            title: "Search By Artist",
            placeholder: "Enter artist name",
            input: String::new(),
            theme,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl EventHandler for SearchScreen {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.input.push(*c);
                None
            }
            TuiEvent::Backspace => {
                self.input.pop();
                None
            }
            TuiEvent::Submit if !self.input.is_empty() => {
                Some(SearchEvent::Submitted(self.input.clone()))
            }
            _ => None,
        }
    }
}

impl Component for SearchScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, input_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Length(3)]).areas(area);

        let title = Paragraph::new(self.title).style(
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(title, title_area);

        let (text, style) = if self.input.is_empty() {
            (
                self.placeholder,
                Style::default()
                    .fg(self.theme.secondary)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            (self.input.as_str(), Style::default().fg(self.theme.primary))
        };
        let input = Paragraph::new(text).style(style).block(
            Block::bordered().border_style(Style::default().fg(self.theme.primary)),
        );
        frame.render_widget(input, input_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn test_theme() -> Theme {
        Theme::from_config(&crate::core::config::resolve(&Default::default()))
    }

    #[test]
    fn test_typing_and_backspace_edit_the_input() {
        let mut screen = SearchScreen::by_city(test_theme());
        screen.handle_event(&TuiEvent::InputChar('N'));
        screen.handle_event(&TuiEvent::InputChar('Y'));
        screen.handle_event(&TuiEvent::InputChar('X'));
        screen.handle_event(&TuiEvent::Backspace);
        assert_eq!(screen.input(), "NY");
    }

    #[test]
    fn test_submit_requires_non_empty_input() {
        let mut screen = SearchScreen::by_artist(test_theme());
        assert!(screen.handle_event(&TuiEvent::Submit).is_none());

        screen.handle_event(&TuiEvent::InputChar('x'));
        assert!(matches!(
            screen.handle_event(&TuiEvent::Submit),
            Some(SearchEvent::Submitted(s)) if s == "x"
        ));
    }

    #[test]
    fn test_renders_placeholder_when_empty() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut screen = SearchScreen::by_city(test_theme());
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
    }
}
