//! # Current Location Screen
//!
//! The presentation binding over the resolver's published result. Purely
//! props-based: the event loop hands it the current [`LocationResult`]
//! each frame and it renders whichever variant is active. Retry and
//! refresh are keybindings handled by the event loop, shown here as
//! hints.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::location::{AddressInfo, Coordinates, LocationResult};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct CurrentLocationScreen {
    pub result: LocationResult,
    pub event_radius_miles: u16,
    pub spinner_frame: usize,
    pub theme: Theme,
}

impl Component for CurrentLocationScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, status_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        let title = Paragraph::new("Events Near You").style(
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(title, title_area);

        match &self.result {
            LocationResult::Pending => self.render_status(frame, status_area, vec![Line::from(
                "Checking location access...",
            )]),
            LocationResult::Loading => {
                let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
                self.render_status(
                    frame,
                    status_area,
                    vec![Line::from(format!("{spinner} Finding your location..."))],
                )
            }
            LocationResult::Success(coordinates, address) => {
                self.render_success(frame, status_area, *coordinates, address.as_ref())
            }
            LocationResult::Denied => self.render_error(
                frame,
                status_area,
                "Location access is required to find events near you",
                "[e] Enable Location",
            ),
            LocationResult::Error(message) => {
                self.render_error(frame, status_area, message, "[r] Retry")
            }
        }
    }
}

impl CurrentLocationScreen {
    fn render_status(&self, frame: &mut Frame, area: Rect, lines: Vec<Line>) {
        let status = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.theme.primary))
            .block(
                Block::bordered().border_style(Style::default().fg(self.theme.secondary)),
            );
        frame.render_widget(status, area);
    }

    fn render_success(
        &self,
        frame: &mut Frame,
        area: Rect,
        coordinates: Coordinates,
        address: Option<&AddressInfo>,
    ) {
        let primary = Style::default().fg(self.theme.primary);
        let mut lines = vec![Line::from(Span::styled(
            "Your Location",
            primary.add_modifier(Modifier::BOLD),
        ))];

        // Address is best-effort: when geocoding failed we still have a
        // fix, so fall back to raw coordinates.
        match address {
            Some(info) => {
                if let Some(city) = &info.city {
                    let place = match &info.state {
                        Some(state) => format!("{city}, {state}"),
                        None => city.clone(),
                    };
                    lines.push(Line::from(Span::styled(place, primary)));
                }
                lines.push(Line::from(Span::styled(
                    info.display_name.clone(),
                    Style::default().fg(self.theme.secondary),
                )));
            }
            None => lines.push(Line::from(Span::styled(
                format!("({:.4}, {:.4})", coordinates.latitude, coordinates.longitude),
                primary,
            ))),
        }

        lines.push(Line::from(Span::styled(
            format!(
                "Looking for events within {} miles",
                self.event_radius_miles
            ),
            Style::default().fg(self.theme.secondary),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Upcoming Events",
            primary.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "Finding events in your area...",
            Style::default()
                .fg(self.theme.secondary)
                .add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[r] Refresh Location",
            Style::default().fg(self.theme.text_light).bg(self.theme.primary),
        )));

        let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::bordered().border_style(Style::default().fg(self.theme.secondary)),
        );
        frame.render_widget(body, area);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, message: &str, action_hint: &str) {
        let lines = vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(self.theme.error),
            )),
            Line::from(""),
            Line::from(Span::styled(
                action_hint.to_string(),
                Style::default().fg(self.theme.text_light).bg(self.theme.primary),
            )),
        ];
        let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::bordered().border_style(Style::default().fg(self.theme.error)),
        );
        frame.render_widget(body, area);
    }
}
