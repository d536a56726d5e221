use std::{
    sync::mpsc::Receiver,
    time::{Duration, Instant},
};

use egui::{
    pos2, Align2, Color32, ColorImage, Context, FontId, Id, Pos2, Rect, Sense, TextureHandle,
    TextureOptions, Ui, Vec2, ViewportCommand,
};
use log::{debug, error, info};

use crate::{
    actor::{
        actor::Actor,
        control_actor::{ControlActor, ControlMessage, DisplayMessage},
    },
    clock::Clock,
    images::Images,
    ticker::Ticker,
};

// Canvas coordinates, top-left origin
const STATUS_POS: Vec2 = Vec2::new(200.0, 50.0);
const TIMER_POS: Vec2 = Vec2::new(175.0, 100.0);
const BOWL_POS: Vec2 = Vec2::new(100.0, 75.0);
const FULLSCREEN_POS: Vec2 = Vec2::new(768.0, 0.0);

// Click regions used when an image failed to load
const BOWL_FALLBACK_SIZE: Vec2 = Vec2::new(150.0, 150.0);
const FULLSCREEN_FALLBACK_SIZE: Vec2 = Vec2::new(32.0, 32.0);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum FullscreenIcon {
    Open,
    Close,
}

/// Everything the canvas shows. Changed by applying display messages, except
/// `fullscreen` which follows the real window.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub(crate) struct DisplayState {
    pub(crate) status: String,
    pub(crate) timer: String,
    pub(crate) bowl_visible: bool,
    pub(crate) fullscreen_button_visible: bool,
    pub(crate) fullscreen: bool,
}

impl DisplayState {
    pub(crate) fn apply(&mut self, msg: DisplayMessage) {
        match msg {
            DisplayMessage::Status(status) => self.status = status,
            DisplayMessage::Timer(timer) => self.timer = timer,
            DisplayMessage::BowlVisible(visible) => self.bowl_visible = visible,
            DisplayMessage::FullscreenButtonVisible(visible) => {
                self.fullscreen_button_visible = visible;
            }
            DisplayMessage::ToggleFullscreen => self.fullscreen = !self.fullscreen,
            // Owned by the app, not part of what's drawn
            DisplayMessage::TickerRunning(_) => {}
        }
    }

    /// The window can leave fullscreen without us (Esc, window manager), so
    /// whatever the viewport reports wins.
    pub(crate) fn sync_fullscreen(&mut self, reported: Option<bool>) {
        if let Some(fullscreen) = reported {
            if fullscreen != self.fullscreen {
                debug!("Window reports fullscreen {}", fullscreen);
            }
            self.fullscreen = fullscreen;
        }
    }

    pub(crate) fn fullscreen_icon(&self) -> FullscreenIcon {
        if self.fullscreen {
            FullscreenIcon::Close
        } else {
            FullscreenIcon::Open
        }
    }
}

struct Textures {
    background: Option<TextureHandle>,
    bowl: Option<TextureHandle>,
    fullscreen_open: Option<TextureHandle>,
    fullscreen_close: Option<TextureHandle>,
}

impl Textures {
    fn upload(ctx: &Context, images: Images) -> Self {
        let upload = |name: &str, image: Option<ColorImage>| {
            image.map(|image| ctx.load_texture(name, image, TextureOptions::default()))
        };
        Self {
            background: upload("background", images.background),
            bowl: upload("bowl", images.bowl),
            fullscreen_open: upload("fullscreen_open", images.fullscreen_open),
            fullscreen_close: upload("fullscreen_close", images.fullscreen_close),
        }
    }
}

pub(crate) struct TextStyle {
    pub(crate) font_size: f32,
    pub(crate) color: Color32,
}

pub(crate) struct FeedTimerApp<TClock>
where
    TClock: Clock,
{
    control: ControlActor<TClock>,
    rx_display: Receiver<DisplayMessage>,
    ticker: Ticker<ControlMessage>,
    display: DisplayState,
    textures: Textures,
    text_style: TextStyle,
    canvas_size: Vec2,
}

impl<TClock> FeedTimerApp<TClock>
where
    TClock: Clock,
{
    pub(crate) fn new(
        ctx: &Context,
        images: Images,
        mut control: ControlActor<TClock>,
        rx_display: Receiver<DisplayMessage>,
        update_interval: Duration,
        text_style: TextStyle,
        canvas_size: Vec2,
    ) -> Self {
        if let Err(err) = control.startup() {
            error!("Error in control startup: {:?}", err);
        }

        let mut app = Self {
            control,
            rx_display,
            ticker: Ticker::new(update_interval, |_| ControlMessage::Tick),
            display: DisplayState::default(),
            textures: Textures::upload(ctx, images),
            text_style,
            canvas_size,
        };
        app.apply_display_messages(ctx, Instant::now());
        app
    }

    fn dispatch(&mut self, msg: ControlMessage) {
        if let Err(err) = self.control.handle_message(msg) {
            error!("Error handling {:?}: {:?}", msg, err);
        }
        debug!("{:?} -> {:?}", msg, self.control.feeding_state());
    }

    fn apply_display_messages(&mut self, ctx: &Context, now: Instant) {
        while let Ok(msg) = self.rx_display.try_recv() {
            debug!("Display {:?}", msg);
            match msg {
                DisplayMessage::TickerRunning(true) => self.ticker.start(now),
                DisplayMessage::TickerRunning(false) => self.ticker.stop(),
                DisplayMessage::ToggleFullscreen => {
                    self.display.apply(msg);
                    info!("Fullscreen: {}", self.display.fullscreen);
                    ctx.send_viewport_cmd(ViewportCommand::Fullscreen(self.display.fullscreen));
                }
                msg => self.display.apply(msg),
            }
        }
    }

    fn draw(&self, ui: &mut Ui) -> Vec<ControlMessage> {
        let mut clicks = Vec::new();
        let origin = canvas_origin(ui.max_rect(), self.canvas_size);
        let painter = ui.painter();

        if let Some(background) = &self.textures.background {
            paint_texture(ui, background, Rect::from_min_size(origin, background.size_vec2()));
        }

        let font = FontId::proportional(self.text_style.font_size);
        painter.text(
            origin + STATUS_POS,
            Align2::CENTER_CENTER,
            &self.display.status,
            font.clone(),
            self.text_style.color,
        );
        painter.text(
            origin + TIMER_POS,
            Align2::CENTER_CENTER,
            &self.display.timer,
            font,
            self.text_style.color,
        );

        if self.display.bowl_visible
            && image_button(
                ui,
                "bowl",
                self.textures.bowl.as_ref(),
                origin + BOWL_POS,
                BOWL_FALLBACK_SIZE,
            )
        {
            clicks.push(ControlMessage::BowlClicked);
        }

        if self.display.fullscreen_button_visible {
            let icon = match self.display.fullscreen_icon() {
                FullscreenIcon::Open => self.textures.fullscreen_open.as_ref(),
                FullscreenIcon::Close => self.textures.fullscreen_close.as_ref(),
            };
            if image_button(
                ui,
                "fullscreen",
                icon,
                origin + FULLSCREEN_POS,
                FULLSCREEN_FALLBACK_SIZE,
            ) {
                clicks.push(ControlMessage::FullscreenClicked);
            }
        }

        clicks
    }
}

impl<TClock> eframe::App for FeedTimerApp<TClock>
where
    TClock: Clock,
{
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.display
            .sync_fullscreen(ctx.input(|i| i.viewport().fullscreen));
        if let Some(tick) = self.ticker.poll(now) {
            self.dispatch(tick);
        }
        self.apply_display_messages(ctx, now);

        let clicks = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE))
            .show(ctx, |ui| self.draw(ui))
            .inner;

        if !clicks.is_empty() {
            for click in clicks {
                self.dispatch(click);
            }
            self.apply_display_messages(ctx, now);
            ctx.request_repaint();
        }

        if let Some(wait) = self.ticker.time_until_next(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

/// Top-left of the fixed-size canvas, centred in whatever the window gives us.
pub(crate) fn canvas_origin(available: Rect, canvas_size: Vec2) -> Pos2 {
    let offset = ((available.size() - canvas_size) / 2.0).max(Vec2::ZERO);
    available.min + offset
}

fn paint_texture(ui: &Ui, texture: &TextureHandle, rect: Rect) {
    ui.painter().image(
        texture.id(),
        rect,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        Color32::WHITE,
    );
}

/// Draws `texture` at `pos` and reports a click on it. Without a texture the
/// region stays blank but clickable.
fn image_button(
    ui: &mut Ui,
    id: &str,
    texture: Option<&TextureHandle>,
    pos: Pos2,
    fallback_size: Vec2,
) -> bool {
    let size = texture.map_or(fallback_size, TextureHandle::size_vec2);
    let rect = Rect::from_min_size(pos, size);
    let response = ui.interact(rect, Id::new(id), Sense::click());
    if let Some(texture) = texture {
        paint_texture(ui, texture, rect);
    }
    response.clicked()
}
