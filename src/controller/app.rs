use gilrs::Button;
use std::{sync::Arc, time::Duration};

use super::{
    focus::{FocusGrid, NavigationDirective, NavigationResult},
    navigation::{Epoch, Navigator, Route, Tab},
    screens::{Command, DetailsEvent, DetailsScreen, HomeEvent, HomeScreen, ImageKey, SectionKind},
};
use crate::config::AppConfig;
use crate::models::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which mounted screen an image load was started for.
pub enum ScreenTag {
    /// Home is the root and is never unmounted.
    Home,
    Details(Epoch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTicket {
    pub screen: ScreenTag,
    pub key: ImageKey,
    pub url: String,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Home(HomeEvent),
    Details(DetailsEvent),
    SwitchTab(Tab),
    Gamepad(Button),
    ImageFailed(ImageTicket),
    Tick(Duration),
    ViewportResized(f32),
}

#[derive(Debug)]
struct MountedDetails {
    epoch: Epoch,
    screen: DetailsScreen,
    focused_section: usize,
}

/// Owns the loaded catalog and every screen, routes events to the screen
/// that is on top and turns screen commands into navigation and image loads.
#[derive(Debug)]
pub struct App {
    catalog: Arc<Catalog>,
    transition: Duration,
    navigator: Navigator,
    home: HomeScreen,
    details: Vec<MountedDetails>,
    focus: FocusGrid,
}

impl App {
    /// Mount home over an already loaded catalog. Returns the first image loads.
    pub fn new(catalog: Arc<Catalog>, config: &AppConfig) -> (Self, Vec<ImageTicket>) {
        let mut app = Self {
            catalog: catalog.clone(),
            transition: config.transition(),
            navigator: Navigator::new(),
            home: HomeScreen::new(config.rows.clone(), config.viewport.width),
            details: vec![],
            focus: FocusGrid::default(),
        };
        let commands = app.home.handle(HomeEvent::Mounted(catalog));
        app.focus = FocusGrid::new(app.home.focus_rows());
        let tickets = app.run(ScreenTag::Home, commands);
        (app, tickets)
    }

    pub fn route(&self) -> &Route {
        self.navigator.current()
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    /// The details screen on top, if one is showing.
    pub fn details(&self) -> Option<&DetailsScreen> {
        match self.navigator.current() {
            Route::Details(_) => self.details.last().map(|d| &d.screen),
            Route::Tab(_) => None,
        }
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.focused_id()
    }

    pub fn focused_section(&self) -> Option<usize> {
        self.details().and(self.details.last()).map(|d| d.focused_section)
    }

    pub fn is_animating(&self) -> bool {
        self.details().map_or(false, |d| d.is_animating())
    }

    pub fn is_mounted(&self, screen: ScreenTag) -> bool {
        match screen {
            ScreenTag::Home => true,
            ScreenTag::Details(epoch) => self.details.iter().any(|d| d.epoch == epoch),
        }
    }

    /// The tag of the details screen on top, if one is showing.
    pub fn details_tag(&self) -> Option<ScreenTag> {
        self.details()
            .and(self.details.last())
            .map(|d| ScreenTag::Details(d.epoch))
    }

    /// Late results for a screen that is gone must be dropped.
    pub fn accepts(&self, ticket: &ImageTicket) -> bool {
        self.is_mounted(ticket.screen)
    }

    pub fn dispatch(&mut self, event: AppEvent) -> Vec<ImageTicket> {
        match event {
            AppEvent::Home(e) => {
                let commands = self.home.handle(e);
                self.run(ScreenTag::Home, commands)
            }
            AppEvent::Details(e) => self.to_details(e),
            AppEvent::SwitchTab(tab) => {
                self.navigator.switch_tab(tab);
                self.details.clear();
                vec![]
            }
            AppEvent::Gamepad(b) => self.gamepad(b),
            AppEvent::ImageFailed(ticket) => {
                if !self.accepts(&ticket) {
                    log::debug!("dropping stale image failure {:?}", ticket.key);
                    return vec![];
                }
                match ticket.screen {
                    ScreenTag::Home => {
                        let commands = self.home.handle(HomeEvent::ImageFailed(ticket.key));
                        self.run(ScreenTag::Home, commands)
                    }
                    ScreenTag::Details(epoch) => {
                        let Some(d) = self.details.iter_mut().find(|d| d.epoch == epoch) else {
                            return vec![];
                        };
                        let commands = d.screen.handle(DetailsEvent::ImageFailed(ticket.key));
                        self.run(ScreenTag::Details(epoch), commands)
                    }
                }
            }
            AppEvent::Tick(dt) => self.to_details(DetailsEvent::Tick(dt)),
            AppEvent::ViewportResized(width) => {
                let commands = self.home.handle(HomeEvent::ViewportResized(width));
                self.run(ScreenTag::Home, commands)
            }
        }
    }

    fn to_details(&mut self, event: DetailsEvent) -> Vec<ImageTicket> {
        if self.details().is_none() {
            return vec![];
        }
        let Some(d) = self.details.last_mut() else {
            return vec![];
        };
        let tag = ScreenTag::Details(d.epoch);
        let commands = d.screen.handle(event);
        self.run(tag, commands)
    }

    fn gamepad(&mut self, b: Button) -> Vec<ImageTicket> {
        log::debug!("gamepad {:?}", b);
        if self.details().is_some() {
            let count = SectionKind::ALL.len();
            let Some(d) = self.details.last_mut() else {
                return vec![];
            };
            return match b {
                Button::DPadUp => {
                    d.focused_section = d.focused_section.saturating_sub(1);
                    vec![]
                }
                Button::DPadDown => {
                    d.focused_section = (d.focused_section + 1).min(count - 1);
                    vec![]
                }
                Button::South => {
                    let kind = SectionKind::ALL[d.focused_section];
                    self.to_details(DetailsEvent::ToggleSection(kind))
                }
                Button::East => self.to_details(DetailsEvent::Back),
                _ => vec![],
            };
        }

        if !matches!(self.route(), Route::Tab(Tab::Home)) {
            return vec![];
        }
        match b {
            Button::South => {
                let Some(cell) = self.focus.focused().cloned() else {
                    return vec![];
                };
                let event = match cell.row {
                    Some(row) => HomeEvent::CardSelected {
                        row,
                        movie: cell.movie_id,
                    },
                    None => HomeEvent::MoreInfo,
                };
                self.dispatch(AppEvent::Home(event))
            }
            other => {
                if let NavigationResult::NoNextItem =
                    self.focus.navigate(NavigationDirective::from_button(other))
                {
                    log::debug!("no focus target for {:?}", other);
                }
                vec![]
            }
        }
    }

    fn run(&mut self, screen: ScreenTag, commands: Vec<Command>) -> Vec<ImageTicket> {
        let mut tickets = Vec::new();
        for c in commands {
            match c {
                Command::FetchImage { key, url } => tickets.push(ImageTicket { screen, key, url }),
                Command::OpenDetails(movie) => match self.navigator.select_movie(&movie) {
                    Ok(decoded) => {
                        let details = DetailsScreen::new(decoded, &self.catalog, self.transition);
                        let epoch = self.navigator.epoch();
                        let loads = details.initial_commands();
                        self.details.push(MountedDetails {
                            epoch,
                            screen: details,
                            focused_section: 0,
                        });
                        tickets.extend(self.run(ScreenTag::Details(epoch), loads));
                    }
                    Err(e) => log::warn!("could not open details for {}: {:#}", movie.id, e),
                },
                Command::GoBack => {
                    if self.navigator.back() {
                        self.details.pop();
                    }
                }
            }
        }
        tickets
    }
}
