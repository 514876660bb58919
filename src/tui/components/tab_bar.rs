//! Bottom tab bar: one tab per [`Screen`], active tab highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::tui::Screen;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct TabBar {
    pub active: Screen,
    pub theme: Theme,
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Screen::all().iter().map(|s| Line::from(s.label())).collect();
        let selected = Screen::all()
            .iter()
            .position(|s| *s == self.active)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(self.theme.primary))
            .highlight_style(
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(self.theme.primary)),
            );

        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_tab_bar_renders_all_labels() {
        let backend = TestBackend::new(60, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        let config = crate::core::config::resolve(&Default::default());
        let mut tab_bar = TabBar {
            active: Screen::ByCity,
            theme: Theme::from_config(&config),
        };
        terminal
            .draw(|f| tab_bar.render(f, f.area()))
            .unwrap();
    }
}
