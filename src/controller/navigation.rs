use anyhow::{Context, Result};
use std::sync::Arc;

use crate::models::Movie;

/// Encode a movie for the details route. The route parameter is flat text
/// so it survives hosts that carry it through a url or a message channel.
pub fn encode_movie_param(movie: &Movie) -> Result<String> {
    serde_json::to_string(movie).context("encoding movie route parameter")
}

pub fn decode_movie_param(param: &str) -> Result<Movie> {
    serde_json::from_str(param).context("decoding movie route parameter")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Explore,
}

#[derive(Debug, Clone)]
pub enum Route {
    Tab(Tab),
    Details(Arc<Movie>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Identifies one mounted screen. Work started for an older epoch is stale.
pub struct Epoch(u64);

#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
    epoch: u64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Tab(Tab::Home)],
            epoch: 0,
        }
    }

    pub fn current(&self) -> &Route {
        // The root tab is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn epoch(&self) -> Epoch {
        Epoch(self.epoch)
    }

    fn changed(&mut self) {
        self.epoch += 1;
    }

    /// Replace the whole stack with a tab root.
    pub fn switch_tab(&mut self, tab: Tab) {
        if matches!(self.stack.as_slice(), [Route::Tab(t)] if *t == tab) {
            return;
        }
        self.stack.clear();
        self.stack.push(Route::Tab(tab));
        self.changed();
    }

    /// Enter the details route from an encoded parameter. A parameter that
    /// does not decode leaves the navigator on the screen it was on.
    pub fn open_details(&mut self, param: &str) -> Result<Arc<Movie>> {
        let movie = match decode_movie_param(param) {
            Ok(m) => Arc::new(m),
            Err(e) => {
                log::warn!("aborting details navigation: {:#}", e);
                return Err(e);
            }
        };
        self.stack.push(Route::Details(movie.clone()));
        self.changed();
        Ok(movie)
    }

    /// The "select movie" action: encode, then enter details.
    pub fn select_movie(&mut self, movie: &Movie) -> Result<Arc<Movie>> {
        let param = encode_movie_param(movie)?;
        self.open_details(&param)
    }

    /// Pop one route. Returns false at a tab root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        self.changed();
        true
    }
}
