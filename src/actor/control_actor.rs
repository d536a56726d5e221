use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use log::{debug, info};

use crate::{
    clock::Clock,
    countdown::{format_countdown, remaining},
    feeding_state::FeedingState,
    schedule::ResetSchedule,
};

use super::actor::Actor;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum ControlMessage {
    BowlClicked,
    FullscreenClicked,
    Tick,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum DisplayMessage {
    Status(String),
    Timer(String),
    BowlVisible(bool),
    FullscreenButtonVisible(bool),
    TickerRunning(bool),
    ToggleFullscreen,
}

pub(crate) struct ControlActor<TClock>
where
    TClock: Clock,
{
    tx_display: Sender<DisplayMessage>,
    schedule: ResetSchedule,
    pet_name: String,
    clock: TClock,
    feeding_state: FeedingState,
}

impl<TClock> ControlActor<TClock>
where
    TClock: Clock,
{
    pub(crate) fn new(
        tx_display: Sender<DisplayMessage>,
        schedule: ResetSchedule,
        pet_name: String,
        clock: TClock,
    ) -> Self {
        Self {
            tx_display,
            schedule,
            pet_name,
            clock,
            feeding_state: FeedingState::Unfed,
        }
    }

    pub(crate) fn feeding_state(&self) -> FeedingState {
        self.feeding_state
    }

    fn unfed_status(&self) -> String {
        format!("{} has not eaten. 😢", self.pet_name)
    }

    fn fed_status(&self) -> String {
        format!("{} has been fed! 😀", self.pet_name)
    }

    fn handle_bowl_click(&mut self) -> Result<()> {
        if self.feeding_state.is_fed() {
            // The bowl is hidden while fed, a stray click shouldn't move the target
            debug!("Ignoring bowl click, already fed");
            return Ok(());
        }

        let now = self.clock.now();
        let until = self.schedule.calculate_next_reset(now);
        info!("{} fed at {}, next reset at {}", self.pet_name, now, until);
        self.feeding_state = FeedingState::Fed { until };

        // Hide the bowl first so a double click can't land on it
        self.send(DisplayMessage::BowlVisible(false))?;
        self.send(DisplayMessage::Status(self.fed_status()))?;
        self.send(DisplayMessage::FullscreenButtonVisible(true))?;
        self.send(DisplayMessage::TickerRunning(true))?;

        self.update_countdown(until, now)
    }

    fn handle_tick(&mut self) -> Result<()> {
        match self.feeding_state {
            FeedingState::Fed { until } => {
                let now = self.clock.now();
                self.update_countdown(until, now)
            }
            FeedingState::Unfed => Ok(()),
        }
    }

    fn update_countdown(&mut self, until: NaiveDateTime, now: NaiveDateTime) -> Result<()> {
        let remaining = remaining(until, now);
        if remaining == Duration::zero() {
            return self.reset();
        }

        self.send(DisplayMessage::Timer(format_countdown(remaining)))
    }

    fn reset(&mut self) -> Result<()> {
        info!("Reset time reached, {} is hungry again", self.pet_name);
        self.feeding_state = FeedingState::Unfed;

        self.send(DisplayMessage::TickerRunning(false))?;
        self.send(DisplayMessage::Timer(String::new()))?;
        self.send(DisplayMessage::Status(self.unfed_status()))?;
        self.send(DisplayMessage::BowlVisible(true))?;
        self.send(DisplayMessage::FullscreenButtonVisible(false))?;

        Ok(())
    }

    fn send(&self, msg: DisplayMessage) -> Result<()> {
        self.tx_display
            .send(msg)
            .context("Failed to send DisplayMessage to tx_display")?;

        Ok(())
    }
}

impl<TClock> Actor<ControlMessage> for ControlActor<TClock>
where
    TClock: Clock,
{
    fn startup(&mut self) -> Result<()> {
        self.send(DisplayMessage::Status(self.unfed_status()))?;
        self.send(DisplayMessage::BowlVisible(true))?;
        // Shown at launch, only hidden again by a reset
        self.send(DisplayMessage::FullscreenButtonVisible(true))?;

        Ok(())
    }

    fn handle_message(&mut self, msg: ControlMessage) -> Result<()> {
        debug!("Handling {:?}", msg);
        match msg {
            ControlMessage::BowlClicked => self.handle_bowl_click(),
            ControlMessage::FullscreenClicked => self.send(DisplayMessage::ToggleFullscreen),
            ControlMessage::Tick => self.handle_tick(),
        }
    }
}
