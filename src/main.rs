#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod actor;
mod clock;
mod config;
mod countdown;
mod feeding_state;
mod images;
mod schedule;
#[cfg(test)]
mod testhelper;
mod ticker;
mod view;

use std::sync::mpsc;

use log::{error, info, warn};

use crate::{
    actor::control_actor::{ControlActor, DisplayMessage},
    clock::LocalClock,
    config::Config,
    images::{asset_dir, Images},
    schedule::ResetSchedule,
    view::{FeedTimerApp, TextStyle},
};

fn main() -> eframe::Result<()> {
    env_logger::init();
    info!("Initialising");

    let config = Config::load();
    let schedule = config.schedule().unwrap_or_else(|err| {
        warn!("Invalid schedule {:?}, using default", err);
        ResetSchedule::default()
    });
    let text_color = config.text_color().unwrap_or_else(|err| {
        warn!("Invalid text colour {:?}, using black", err);
        egui::Color32::BLACK
    });
    info!(
        "Resetting at {} and {}",
        schedule.morning(),
        schedule.evening()
    );

    let images = Images::load(&asset_dir(config.asset_dir.as_deref()));

    let (tx_display, rx_display) = mpsc::channel::<DisplayMessage>();
    let control = ControlActor::new(tx_display, schedule, config.pet_name.clone(), LocalClock {});

    let canvas_size = egui::vec2(config.canvas_width, config.canvas_height);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(canvas_size)
            .with_title(config.window_title.clone()),
        ..Default::default()
    };

    info!("Running UI");
    let update_interval = config.update_interval();
    let font_size = config.font_size;
    let result = eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |cc| {
            Box::new(FeedTimerApp::new(
                &cc.egui_ctx,
                images,
                control,
                rx_display,
                update_interval,
                TextStyle {
                    font_size,
                    color: text_color,
                },
                canvas_size,
            ))
        }),
    );

    if let Err(err) = &result {
        error!("Abnormal shutdown: {}", err);
    }
    result
}
