use anyhow::anyhow;
use gilrs::Button;
use slint::{ComponentHandle, Image, ModelRc, SharedString, Timer, TimerMode, VecModel};
use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
    sync::{mpsc, Arc},
    time::{Duration, Instant},
};

use crate::config::AppConfig;
use crate::controller::{
    focus::FocusCell,
    navigation::{Route, Tab},
    screens::{DetailsEvent, HomeEvent, HomeState, ImageKey, SectionKind},
    App, AppEvent, ImageTicket, ScreenTag,
};
use crate::fetch::{FetchResult, ImageFetcher};
use crate::models::Catalog;
use crate::{AppState, AppWindow, CardData, DetailsData, HeroData, LineData, RowData, SectionData, SimilarData};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Default)]
/// Decoded images per mounted screen. Turns finished downloads into app events.
struct ImageStore {
    images: HashMap<(ScreenTag, ImageKey), Image>,
}

impl ImageStore {
    /// A download that fails, or a file Slint can't decode, moves that image
    /// instance to its next fallback. Returns the loads that follow.
    fn arrived(&mut self, app: &mut App, (ticket, result): FetchResult) -> Vec<ImageTicket> {
        if !app.accepts(&ticket) {
            log::debug!("dropping late image {:?} for {:?}", ticket.key, ticket.screen);
            return vec![];
        }
        let loaded = result.and_then(|path| {
            Image::load_from_path(&path)
                .map_err(|e| anyhow!("decoding {}: {:?}", path.display(), e))
        });
        match loaded {
            Ok(image) => {
                self.images.insert((ticket.screen, ticket.key), image);
                vec![]
            }
            Err(e) => {
                log::debug!("image {} unusable: {:#}", ticket.url, e);
                self.images.remove(&(ticket.screen, ticket.key.clone()));
                app.dispatch(AppEvent::ImageFailed(ticket))
            }
        }
    }

    fn get(&self, screen: ScreenTag, key: ImageKey) -> Image {
        self.images.get(&(screen, key)).cloned().unwrap_or_default()
    }

    /// Forget images of screens that are gone.
    fn prune(&mut self, app: &App) {
        self.images.retain(|(tag, _), _| app.is_mounted(*tag));
    }
}

/// UI thread side of the app. Pushes controller state into the Slint
/// globals and feeds input, image results and frame ticks back in.
pub struct Shell {
    app: App,
    fetcher: ImageFetcher,
    images: ImageStore,
    viewport_width: f32,
}

impl Shell {
    pub fn new(catalog: Arc<Catalog>, config: &AppConfig, fetcher: ImageFetcher) -> Self {
        let (app, tickets) = App::new(catalog, config);
        let shell = Self {
            app,
            fetcher,
            images: ImageStore::default(),
            viewport_width: config.viewport.width,
        };
        shell.request(tickets);
        shell
    }

    pub fn dispatch(&mut self, event: AppEvent) {
        let tickets = self.app.dispatch(event);
        self.request(tickets);
    }

    fn request(&self, tickets: Vec<ImageTicket>) {
        for t in tickets {
            self.fetcher.request(t);
        }
    }

    fn image_arrived(&mut self, fetched: FetchResult) {
        let next = self.images.arrived(&mut self.app, fetched);
        self.request(next);
    }

    fn image(&self, screen: ScreenTag, key: ImageKey) -> Image {
        self.images.get(screen, key)
    }

    pub fn sync(&mut self, ui: &AppWindow) {
        self.images.prune(&self.app);

        let state = ui.global::<AppState>();
        state.set_screen(match self.app.route() {
            Route::Tab(Tab::Home) => 0,
            Route::Details(_) => 1,
            Route::Tab(Tab::Explore) => 2,
        });
        state.set_focused_id(self.app.focused_id().unwrap_or_default().into());
        self.sync_home(&state);
        self.sync_details(&state);
    }

    fn sync_home(&self, state: &AppState<'_>) {
        let view = match self.app.home().state() {
            HomeState::Loading => {
                state.set_loading(true);
                return;
            }
            HomeState::Ready(view) => view,
        };
        state.set_loading(false);

        let hero = &view.hero;
        state.set_hero(HeroData {
            key: FocusCell::hero(&hero.movie.id).id.into(),
            title: hero.movie.title.as_str().into(),
            meta: hero.meta_line.as_str().into(),
            description: hero.movie.description.as_str().into(),
            image: self.image(ScreenTag::Home, ImageKey::Hero),
            show_caption: hero.image.shows_caption(),
        });

        let rows: Vec<RowData> = view
            .rows
            .iter()
            .map(|row| {
                let cards: Vec<CardData> = row
                    .cards
                    .iter()
                    .map(|card| CardData {
                        key: FocusCell::card(&row.container_id, &card.movie.id).id.into(),
                        row: row.container_id.as_str().into(),
                        movie_id: card.movie.id.as_str().into(),
                        title: card.movie.title.as_str().into(),
                        year: card.movie.year.to_string().into(),
                        image: self.image(
                            ScreenTag::Home,
                            ImageKey::Card {
                                row: row.container_id.clone(),
                                movie: card.movie.id.clone(),
                            },
                        ),
                        show_caption: card.image.shows_caption(),
                        featured: card.featured_badge,
                    })
                    .collect();
                RowData {
                    id: row.container_id.as_str().into(),
                    title: row.title.as_str().into(),
                    card_width: row.metrics.width,
                    card_height: row.metrics.height,
                    cards: ModelRc::new(VecModel::from(cards)),
                }
            })
            .collect();
        state.set_rows(ModelRc::new(VecModel::from(rows)));
    }

    fn sync_details(&self, state: &AppState<'_>) {
        let (Some(details), Some(tag)) = (self.app.details(), self.app.details_tag()) else {
            return;
        };
        let movie = details.movie();
        state.set_details(DetailsData {
            title: movie.title.as_str().into(),
            meta: details.meta_line().into(),
            description: movie.description.as_str().into(),
            image: self.image(tag, ImageKey::Header),
            show_caption: details.header().shows_caption(),
        });

        let similar: Vec<SimilarData> = details
            .similar()
            .iter()
            .map(|card| SimilarData {
                movie_id: card.movie.id.as_str().into(),
                title: card.movie.title.as_str().into(),
                image: self.image(
                    tag,
                    ImageKey::Similar {
                        movie: card.movie.id.clone(),
                    },
                ),
                show_caption: card.image.shows_caption(),
            })
            .collect();
        state.set_similar(ModelRc::new(VecModel::from(similar)));
        self.sync_sections(state);
    }

    fn sync_sections(&self, state: &AppState<'_>) {
        let Some(details) = self.app.details() else {
            return;
        };
        let focused = self.app.focused_section();
        let sections: Vec<SectionData> = details
            .sections()
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let lines: Vec<LineData> = section
                    .lines
                    .iter()
                    .map(|l| LineData {
                        label: l.label.as_str().into(),
                        value: l.value.as_str().into(),
                    })
                    .collect();
                SectionData {
                    title: section.kind.title().into(),
                    progress: section.disclosure.value(),
                    indicator: section.disclosure.indicator_rotation(),
                    focused: focused == Some(i),
                    lines: ModelRc::new(VecModel::from(lines)),
                }
            })
            .collect();
        state.set_sections(ModelRc::new(VecModel::from(sections)));
    }

    /// Runs once per frame on the UI thread.
    fn frame(&mut self, ui: &AppWindow, dt: Duration, gamepad: &mpsc::Receiver<Button>, fetched: &mpsc::Receiver<FetchResult>) {
        let mut dirty = false;
        while let Ok(b) = gamepad.try_recv() {
            self.dispatch(AppEvent::Gamepad(b));
            dirty = true;
        }
        while let Ok(result) = fetched.try_recv() {
            self.image_arrived(result);
            dirty = true;
        }

        let window = ui.window();
        let width = window.size().to_logical(window.scale_factor()).width;
        if width > 0.0 && (width - self.viewport_width).abs() >= 1.0 {
            log::debug!("viewport width {} -> {}", self.viewport_width, width);
            self.viewport_width = width;
            self.dispatch(AppEvent::ViewportResized(width));
            dirty = true;
        }

        if self.app.is_animating() {
            self.dispatch(AppEvent::Tick(dt));
            if !dirty {
                self.sync_sections(&ui.global::<AppState>());
            }
        }
        if dirty {
            self.sync(ui);
        }
    }
}

/// Dispatch whatever `event` builds from the current app state, then
/// re-render.
fn forward(
    shell: &RefCell<Shell>,
    ui: &slint::Weak<AppWindow>,
    event: impl FnOnce(&App) -> Option<AppEvent>,
) {
    let Some(ui) = ui.upgrade() else {
        return;
    };
    let mut shell = shell.borrow_mut();
    let Some(event) = event(&shell.app) else {
        return;
    };
    shell.dispatch(event);
    shell.sync(&ui);
}

fn on_details(app: &App, details: DetailsEvent, home: Option<HomeEvent>) -> Option<AppEvent> {
    match app.details() {
        Some(_) => Some(AppEvent::Details(details)),
        None => home.map(AppEvent::Home),
    }
}

fn owned(s: SharedString) -> String {
    s.as_str().to_owned()
}

/// Wire every UI callback to the shell and start the frame timer. The
/// returned timer must be kept alive for as long as the window runs.
pub fn attach(
    shell: Rc<RefCell<Shell>>,
    ui: &AppWindow,
    gamepad: mpsc::Receiver<Button>,
    fetched: mpsc::Receiver<FetchResult>,
) -> Timer {
    let state = ui.global::<AppState>();

    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_select_card(move |row, movie| {
        forward(&s, &w, |_| {
            Some(AppEvent::Home(HomeEvent::CardSelected {
                row: owned(row),
                movie: owned(movie),
            }))
        })
    });
    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_more_info(move || forward(&s, &w, |_| Some(AppEvent::Home(HomeEvent::MoreInfo))));
    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_play(move || forward(&s, &w, |app| on_details(app, DetailsEvent::Play, Some(HomeEvent::Play))));
    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_add_to_list(move || forward(&s, &w, |app| on_details(app, DetailsEvent::AddToList, None)));
    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_download(move || forward(&s, &w, |app| on_details(app, DetailsEvent::Download, None)));
    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_toggle_section(move |index| {
        forward(&s, &w, |app| {
            let kind = usize::try_from(index)
                .ok()
                .and_then(|i| SectionKind::ALL.get(i).copied())?;
            on_details(app, DetailsEvent::ToggleSection(kind), None)
        })
    });
    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_select_similar(move |movie| {
        forward(&s, &w, |app| on_details(app, DetailsEvent::SimilarSelected(owned(movie)), None))
    });
    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_back(move || forward(&s, &w, |app| on_details(app, DetailsEvent::Back, None)));
    let (s, w) = (shell.clone(), ui.as_weak());
    state.on_switch_tab(move |tab| {
        forward(&s, &w, |_| match tab {
            0 => Some(AppEvent::SwitchTab(Tab::Home)),
            2 => Some(AppEvent::SwitchTab(Tab::Explore)),
            other => {
                log::warn!("unknown tab index {}", other);
                None
            }
        })
    });

    shell.borrow_mut().sync(ui);

    let weak = ui.as_weak();
    let mut last = Instant::now();
    let timer = Timer::default();
    timer.start(TimerMode::Repeated, FRAME, move || {
        let Some(ui) = weak.upgrade() else {
            return;
        };
        let now = Instant::now();
        let dt = now - last;
        last = now;
        shell.borrow_mut().frame(&ui, dt, &gamepad, &fetched);
    });
    timer
}
