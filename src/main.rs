//! Autotris runner (default binary).
//!
//! Frame-capped loop: render a snapshot, drain pending key events until the
//! frame deadline, then advance the session by the measured wall-clock delta.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::{info, warn};

use autotris::engine::{Control, Session};
use autotris::input::handle_key_event;
use autotris::term::{restore_terminal, FrameBuffer, GameView, TerminalRenderer, Viewport};
use autotris::{log_panic, AppConfig, FileLogger};

/// Everything the binary owns for one run.
struct AppContext {
    config: AppConfig,
    session: Session,
    view: GameView,
    fb: FrameBuffer,
    renderer: TerminalRenderer,
}

impl AppContext {
    fn new(config: AppConfig) -> Self {
        let session = Session::new(config.seed, config.autoplay, config.ai_interval_ms);
        Self {
            config,
            session,
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            renderer: TerminalRenderer::new(),
        }
    }

    fn run(&mut self) -> Result<()> {
        self.renderer.enter()?;
        let frame = Duration::from_millis(self.config.frame_ms());
        let mut last = Instant::now();

        loop {
            let frame_start = Instant::now();
            self.draw()?;

            if self.drain_events(frame_start + frame)? == Control::Quit {
                return Ok(());
            }

            let now = Instant::now();
            let elapsed = now.duration_since(last).as_millis().min(u32::MAX as u128) as u32;
            last = now;
            if let Some(lock) = self.session.update(elapsed) {
                if lock.game_over {
                    info!(
                        "final score {} after {} lines",
                        self.session.state().score(),
                        self.session.state().lines()
                    );
                }
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snapshot = self.session.snapshot();
        self.view
            .render_into(&snapshot, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn drain_events(&mut self, deadline: Instant) -> Result<Control> {
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = handle_key_event(key) {
                        if self.session.handle_action(action) == Control::Quit {
                            return Ok(Control::Quit);
                        }
                    }
                }
                Event::Resize(..) => self.renderer.invalidate(),
                _ => {}
            }
        }
        Ok(Control::Continue)
    }
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        log_panic(panic_info);
        default_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        FileLogger::open(path, config.log_level)?.install()?;
    }
    info!(
        "starting: seed {} autoplay {} fps {} ai interval {}ms",
        config.seed, config.autoplay, config.fps, config.ai_interval_ms
    );

    install_panic_hook();
    let mut app = AppContext::new(config);
    let result = app.run();

    if let Err(err) = restore_terminal() {
        warn!("terminal restore failed: {err}");
    }
    info!("exit: score {}", app.session.state().score());
    log::logger().flush();
    result
}
