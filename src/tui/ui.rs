use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::location::LocationResult;
use crate::tui::component::Component;
use crate::tui::components::{CurrentLocationScreen, TabBar};
use crate::tui::{Screen, TuiState};

/// Frame layout: app header, the active screen, a status line, and the
/// tab bar. Screen dispatch is an explicit match over the closed set of
/// screens.
pub fn draw_ui(
    frame: &mut Frame,
    tui: &mut TuiState,
    result: &LocationResult,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};
    let [header_area, main_area, status_area, tab_area] =
        Layout::vertical([Length(1), Min(0), Length(1), Length(2)]).areas(frame.area());

    let header = Paragraph::new("Dancefloor")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(tui.theme.text_light)
                .bg(tui.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(header, header_area);

    match tui.active {
        Screen::CurrentLocation => {
            let mut screen = CurrentLocationScreen {
                result: result.clone(),
                event_radius_miles: tui.event_radius_miles,
                spinner_frame,
                theme: tui.theme,
            };
            screen.render(frame, main_area);
        }
        Screen::ByCity => tui.city_search.render(frame, main_area),
        Screen::ByArtist => tui.artist_search.render(frame, main_area),
    }

    if let Some(message) = &tui.status_message {
        let status = Paragraph::new(message.as_str())
            .style(Style::default().fg(tui.theme.secondary));
        frame.render_widget(status, status_area);
    }

    let mut tab_bar = TabBar {
        active: tui.active,
        theme: tui.theme,
    };
    tab_bar.render(frame, tab_area);
}
