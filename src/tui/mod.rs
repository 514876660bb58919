//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the three
//! screens, and translates keyboard events into resolver operations.
//! This is the only module that knows about ratatui and crossterm; the
//! location resolver publishes the same result type to any binding.
//!
//! ## Redraw Strategy
//!
//! Conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (location pipeline in progress): draws every ~80ms so
//!   the spinner stays smooth.
//! - **Idle**: sleeps up to 250ms in the event poll and only redraws on
//!   input, resize, or a published state change.

pub mod component;
pub mod components;
pub mod event;
pub mod theme;
mod ui;

use std::sync::Arc;

use clap::ValueEnum;
use log::info;

use crate::core::config::ResolvedConfig;
use crate::geocode::NominatimClient;
use crate::location::LocationResolver;
use crate::location::providers::{ConfiguredPositionProvider, DesktopCapabilityProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{SearchEvent, SearchScreen};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Theme;

/// The closed set of screens. Dispatch is always an explicit match on
/// this enum; there is no name-keyed registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Screen {
    #[default]
    CurrentLocation,
    ByCity,
    ByArtist,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[Screen::CurrentLocation, Screen::ByCity, Screen::ByArtist]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::CurrentLocation => "Current Location",
            Screen::ByCity => "By City",
            Screen::ByArtist => "By Artist",
        }
    }

    pub fn next(&self) -> Screen {
        match self {
            Screen::CurrentLocation => Screen::ByCity,
            Screen::ByCity => Screen::ByArtist,
            Screen::ByArtist => Screen::CurrentLocation,
        }
    }

    pub fn prev(&self) -> Screen {
        match self {
            Screen::CurrentLocation => Screen::ByArtist,
            Screen::ByCity => Screen::CurrentLocation,
            Screen::ByArtist => Screen::ByCity,
        }
    }
}

/// TUI-specific presentation state (not part of the resolver's state).
pub struct TuiState {
    pub active: Screen,
    pub theme: Theme,
    pub event_radius_miles: u16,
    pub city_search: SearchScreen,
    pub artist_search: SearchScreen,
    pub status_message: Option<String>,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig, start: Screen) -> Self {
        let theme = Theme::from_config(config);
        Self {
            active: start,
            theme,
            event_radius_miles: config.event_radius_miles,
            city_search: SearchScreen::by_city(theme),
            artist_search: SearchScreen::by_artist(theme),
            status_message: None,
        }
    }
}

/// Build the resolver from the resolved config's provider settings.
pub fn build_resolver(config: &ResolvedConfig) -> Arc<LocationResolver> {
    Arc::new(LocationResolver::new(
        Arc::new(DesktopCapabilityProvider::new(config.grant_policy)),
        Arc::new(ConfiguredPositionProvider::new(config.coordinates)),
        Arc::new(NominatimClient::new(
            Some(config.geocode_base_url.clone()),
            config.geocode_timeout,
        )),
        config.position_options,
    ))
}

pub fn run(config: ResolvedConfig, start: Screen) -> std::io::Result<()> {
    let resolver = build_resolver(&config);
    let mut tui = TuiState::new(&config, start);

    let mut terminal = ratatui::init();
    let mut result_rx = resolver.subscribe();

    // The location screen activates on mount, like the original shell.
    if tui.active == Screen::CurrentLocation {
        spawn_op(&resolver, ResolverOp::Activate);
    }

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let result = resolver.current();
        let animating = tui.active == Screen::CurrentLocation && result.is_in_progress();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &mut tui, &result, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(250)
        };

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(timeout);
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit | TuiEvent::ForceQuit => should_quit = true,
                TuiEvent::NextTab => {
                    let to = tui.active.next();
                    switch_screen(&mut tui, &resolver, to);
                }
                TuiEvent::PrevTab => {
                    let to = tui.active.prev();
                    switch_screen(&mut tui, &resolver, to);
                }
                other => handle_screen_event(&mut tui, &resolver, other),
            }
        }

        if should_quit {
            break;
        }

        // A published state change also warrants a redraw.
        if matches!(result_rx.has_changed(), Ok(true)) {
            result_rx.mark_unchanged();
            needs_redraw = true;
        }
    }

    resolver.deactivate();
    ratatui::restore();
    Ok(())
}

/// Tab switch. Leaving the location screen deactivates the resolver
/// (unmount semantics: in-flight work is abandoned); entering it mounts
/// a fresh activation.
fn switch_screen(tui: &mut TuiState, resolver: &Arc<LocationResolver>, to: Screen) {
    if tui.active == to {
        return;
    }
    if tui.active == Screen::CurrentLocation {
        resolver.deactivate();
    }
    tui.active = to;
    tui.status_message = None;
    info!("Switched to screen: {:?}", to);
    if to == Screen::CurrentLocation {
        spawn_op(resolver, ResolverOp::Activate);
    }
}

fn handle_screen_event(tui: &mut TuiState, resolver: &Arc<LocationResolver>, event: TuiEvent) {
    match tui.active {
        Screen::CurrentLocation => match event {
            TuiEvent::InputChar('r') => spawn_op(resolver, ResolverOp::Refresh),
            TuiEvent::InputChar('e') => spawn_op(resolver, ResolverOp::RetryPermission),
            _ => {}
        },
        Screen::ByCity => {
            if let Some(SearchEvent::Submitted(query)) = tui.city_search.handle_event(&event) {
                info!("City search submitted: {}", query);
                tui.status_message = Some(format!("Event search for '{query}' is coming soon"));
            }
        }
        Screen::ByArtist => {
            if let Some(SearchEvent::Submitted(query)) = tui.artist_search.handle_event(&event) {
                info!("Artist search submitted: {}", query);
                tui.status_message = Some(format!("Event search for '{query}' is coming soon"));
            }
        }
    }
}

enum ResolverOp {
    Activate,
    Refresh,
    RetryPermission,
}

/// Resolver operations are async (permission, fix, and geocode all
/// suspend); the event loop stays sync and fires them on the runtime.
fn spawn_op(resolver: &Arc<LocationResolver>, op: ResolverOp) {
    let resolver = resolver.clone();
    tokio::spawn(async move {
        match op {
            ResolverOp::Activate => resolver.activate().await,
            ResolverOp::Refresh => resolver.refresh().await,
            ResolverOp::RetryPermission => resolver.retry_permission().await,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_cycle_is_closed() {
        let mut screen = Screen::CurrentLocation;
        for _ in 0..Screen::all().len() {
            screen = screen.next();
        }
        assert_eq!(screen, Screen::CurrentLocation);
    }

    #[test]
    fn test_prev_inverts_next() {
        for screen in Screen::all() {
            assert_eq!(screen.next().prev(), *screen);
        }
    }

    #[tokio::test]
    async fn test_tab_navigation_cycles_through_screens() {
        let config = crate::core::config::resolve(&Default::default());
        let resolver = build_resolver(&config);
        let mut tui = TuiState::new(&config, Screen::CurrentLocation);

        for expected in [Screen::ByCity, Screen::ByArtist, Screen::CurrentLocation] {
            let to = tui.active.next();
            switch_screen(&mut tui, &resolver, to);
            assert_eq!(tui.active, expected);
        }

        let to = tui.active.prev();
        switch_screen(&mut tui, &resolver, to);
        assert_eq!(tui.active, Screen::ByArtist);
    }

    #[test]
    fn test_labels_are_unique() {
        let labels: std::collections::HashSet<_> =
            Screen::all().iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), Screen::all().len());
    }
}
