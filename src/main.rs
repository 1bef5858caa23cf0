slint::include_modules!();

use anyhow::{Context, Result};
use gilrs::{Button, Event, EventType, Gilrs};
use slint::ComponentHandle;
use std::{cell::RefCell, rc::Rc, sync::mpsc, sync::Arc, thread};

mod config;
mod controller;
mod fetch;
mod models;
mod shell;

use crate::config::AppConfig;
use crate::fetch::ImageFetcher;
use crate::models::Catalog;
use crate::shell::Shell;

fn controller_loop(tx: mpsc::Sender<Button>) {
    let mut gilrs = match Gilrs::new() {
        Ok(g) => g,
        Err(e) => {
            log::warn!("gamepad input unavailable: {}", e);
            return;
        }
    };
    for (_id, gamepad) in gilrs.gamepads() {
        log::info!("{} is {:?}", gamepad.name(), gamepad.power_info());
    }

    loop {
        while let Some(Event { id, event, time }) = gilrs.next_event_blocking(None) {
            log::trace!("{:?} event from {}: {:?}", time, id, event);
            if let EventType::ButtonPressed(b, _) = event {
                if tx.send(b).is_err() {
                    // Window closed.
                    return;
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    let catalog = Arc::new(Catalog::load(&config.catalog_path)?);

    let ui = AppWindow::new().context("creating window")?;
    ui.window().set_size(slint::LogicalSize::new(
        config.viewport.width,
        config.viewport.height,
    ));

    let (gamepad_tx, gamepad_rx) = mpsc::channel();
    thread::spawn(move || controller_loop(gamepad_tx));

    let (fetched_tx, fetched_rx) = mpsc::channel();
    let fetcher = ImageFetcher::spawn(
        config.image_staging_dir.clone(),
        fetched_tx,
    )?;

    let shell = Rc::new(RefCell::new(Shell::new(catalog, &config, fetcher)));
    let _frames = shell::attach(shell, &ui, gamepad_rx, fetched_rx);

    ui.run().context("running window")?;
    Ok(())
}
