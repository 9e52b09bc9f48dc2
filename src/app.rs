use std::io;
use std::time::Instant;

use chrono::Local;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, Terminal};
use tracing::{debug, info};

use crate::animation::{AnimationLoop, Fireworks};
use crate::config::AppConfig;
use crate::error::Result;
use crate::input::{InputEvent, InputHandler};
use crate::positioning::PointerPoint;
use crate::render::{ButtonId, RenderState, SceneLayout, SceneRenderer};
use crate::state::{Proposal, Step};

type Backend = CrosstermBackend<io::Stdout>;

/// Main application state
pub struct App {
    config: AppConfig,
    proposal: Proposal,
    fireworks: Option<Fireworks>,
    animation_loop: AnimationLoop,
    input_handler: InputHandler,

    // Layout of the last drawn frame, for hit detection
    last_layout: Option<SceneLayout>,

    // Button under the mouse
    hovered: Option<ButtonId>,

    // Running state
    running: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let proposal = Proposal::new(&config, StdRng::seed_from_u64(rng.gen()), Instant::now());
        let fireworks = config
            .fireworks
            .enabled
            .then(|| Fireworks::new(&config.fireworks, StdRng::seed_from_u64(rng.gen())));

        Self {
            config,
            proposal,
            fireworks,
            animation_loop: AnimationLoop::new(),
            input_handler: InputHandler::new(),
            last_layout: None,
            hovered: None,
            running: true,
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        info!("terminal ready");

        let result = self.main_loop(&mut terminal).await;

        // Cleanup terminal, even if the loop failed
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!(
            step = ?self.proposal.step(),
            phase = ?self.proposal.phase(),
            frames = self.animation_loop.frames(),
            bursts = self.fireworks.as_ref().map_or(0, |f| f.bursts()),
            "terminal restored"
        );

        result
    }

    async fn main_loop(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        while self.running {
            // Handle input
            self.handle_input();

            // Advance timed steps
            self.proposal.tick(Instant::now());

            // Update animations
            if self.animation_loop.should_render() {
                let dt = self.animation_loop.delta_time();
                if let Some(fireworks) = self.fireworks.as_mut() {
                    fireworks.update(dt);
                }

                let now = Instant::now();
                let mut drawn = None;
                terminal.draw(|frame| {
                    let area = frame.area();
                    let layout = self.layout_for(area, now);
                    self.render(&layout, frame.buffer_mut(), now);
                    drawn = Some(layout);
                })?;
                self.last_layout = drawn;

                self.animation_loop.frame_rendered();
            }

            // Small sleep to prevent busy loop
            tokio::time::sleep(self.animation_loop.time_until_next_frame()).await;
        }

        Ok(())
    }

    /// Handle user input
    fn handle_input(&mut self) {
        let timeout = std::time::Duration::from_millis(1);

        if let Some(event) = self.input_handler.poll(timeout) {
            self.dispatch(event, Instant::now());
        }
    }

    fn dispatch(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Quit => self.running = false,

            InputEvent::PointerMove { x, y } => {
                let Some(layout) = self.last_layout.as_ref() else {
                    return;
                };
                self.hovered = layout.button_at(x, y);

                let cell = self.config.evasion.cell_size;
                let bounds = layout.decline_bounds(cell);
                let point = PointerPoint::from_cell(x, y, cell);
                self.proposal.pointer_moved(point, bounds, now);
            }

            InputEvent::Press { x, y } => {
                let hit = self.last_layout.as_ref().and_then(|l| l.button_at(x, y));
                match hit {
                    Some(ButtonId::Accept) => self.accept(now),
                    Some(ButtonId::Decline) => {
                        self.proposal.press_evasive(now);
                    }
                    None => {}
                }
            }

            InputEvent::Accept => self.accept(now),

            InputEvent::Decline => {
                self.proposal.press_evasive(now);
            }

            InputEvent::Skip => {
                self.proposal.skip(now);
            }

            InputEvent::Resize { width, height } => {
                debug!(width, height, "terminal resized");
                // Stale until the next frame is laid out
                self.last_layout = None;
                self.hovered = None;
            }

            InputEvent::None => {}
        }
    }

    fn accept(&mut self, now: Instant) {
        if self.proposal.accept(now, Local::now()) {
            self.hovered = None;
            if let Some(fireworks) = self.fireworks.as_mut() {
                fireworks.start();
            }
        }
    }

    fn layout_for(&self, area: Rect, now: Instant) -> SceneLayout {
        SceneLayout::compute(
            area,
            self.proposal.step(),
            &self.config.messages,
            self.proposal.evasive_position(now),
            &self.config.evasion.zone,
        )
    }

    /// Render one frame
    fn render(&self, layout: &SceneLayout, buf: &mut Buffer, now: Instant) {
        let step = self.proposal.step();

        let photos = self
            .config
            .photos
            .enabled
            .then(|| (self.config.photos.paths.as_slice(), self.config.photos.columns));

        let fireworks = match (&self.fireworks, step) {
            (Some(fw), Step::Celebration) => Some(fw.particles()),
            _ => None,
        };

        let accepted_at = self
            .proposal
            .accepted_at()
            .map(|at| at.format("Said yes on %A, %B %-d at %H:%M").to_string());

        let state = RenderState {
            step,
            step_elapsed: self.proposal.step_elapsed(now),
            time_left: self.proposal.time_until_next_step(now),
            messages: &self.config.messages,
            photos,
            fireworks,
            hovered: self.hovered,
            dodges: self.proposal.evasion().map(|s| s.relocations()),
            accepted_at,
            clock: self.animation_loop.clock(),
        };

        SceneRenderer::new(layout).render_all(buf, &state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> App {
        let config = AppConfig {
            seed: Some(99),
            ..AppConfig::default()
        };
        App::new(config)
    }

    fn lay_out(app: &mut App, now: Instant) {
        app.last_layout = Some(app.layout_for(Rect::new(0, 0, 100, 30), now));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.dispatch(InputEvent::Quit, Instant::now());
        assert!(!app.running);
    }

    #[test]
    fn test_skip_then_accept_starts_fireworks() {
        let mut app = app();
        let now = Instant::now();
        app.dispatch(InputEvent::Skip, now);
        app.dispatch(InputEvent::Skip, now);
        assert_eq!(app.proposal.step(), Step::Question);

        app.dispatch(InputEvent::Accept, now);
        assert_eq!(app.proposal.step(), Step::Celebration);
        assert!(app.fireworks.as_ref().is_some_and(|f| f.is_active()));
    }

    #[test]
    fn test_clicking_decline_never_accepts() {
        let mut app = app();
        let now = Instant::now();
        app.dispatch(InputEvent::Skip, now);
        app.dispatch(InputEvent::Skip, now);

        for i in 0..20u64 {
            let t = now + Duration::from_millis(i * 10);
            lay_out(&mut app, t + Duration::from_secs(1));
            let decline = app.last_layout.as_ref().and_then(|l| l.decline).unwrap();
            app.dispatch(InputEvent::Press { x: decline.x, y: decline.y }, t);
            app.dispatch(InputEvent::Decline, t);
        }
        assert_eq!(app.proposal.step(), Step::Question);
        assert_eq!(app.proposal.evasion().map(|s| s.relocations()), Some(40));
    }

    #[test]
    fn test_clicking_accept_button_accepts() {
        let mut app = app();
        let now = Instant::now();
        app.dispatch(InputEvent::Skip, now);
        app.dispatch(InputEvent::Skip, now);
        lay_out(&mut app, now);

        let accept = app.last_layout.as_ref().and_then(|l| l.accept).unwrap();
        app.dispatch(InputEvent::Press { x: accept.x + 1, y: accept.y + 1 }, now);
        assert_eq!(app.proposal.step(), Step::Celebration);
        assert!(app.proposal.accepted_at().is_some());
    }

    #[test]
    fn test_hovering_decline_makes_it_flee() {
        let mut app = app();
        let now = Instant::now();
        app.dispatch(InputEvent::Skip, now);
        app.dispatch(InputEvent::Skip, now);
        lay_out(&mut app, now);

        let decline = app.last_layout.as_ref().and_then(|l| l.decline).unwrap();
        app.dispatch(
            InputEvent::PointerMove {
                x: decline.x + decline.width / 2,
                y: decline.y + 1,
            },
            now,
        );
        assert_eq!(app.hovered, Some(ButtonId::Decline));
        assert!(app.proposal.evasive_position(now).is_some());
    }

    #[test]
    fn test_pointer_before_first_frame_is_ignored() {
        let mut app = app();
        app.dispatch(InputEvent::PointerMove { x: 1, y: 1 }, Instant::now());
        assert!(app.hovered.is_none());
    }

    #[test]
    fn test_resize_drops_stale_layout() {
        let mut app = app();
        let now = Instant::now();
        lay_out(&mut app, now);
        app.dispatch(InputEvent::Resize { width: 40, height: 12 }, now);
        assert!(app.last_layout.is_none());
    }
}
