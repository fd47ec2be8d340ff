//! Terminal model editor with undo
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use edit3d_core::{Camera, MeshModel};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::info;

pub mod config;
pub mod input;
pub mod renderer;
pub mod session;

pub use config::EditorConfig;
pub use input::{map_key, Input};
pub use renderer::AsciiRenderer;
pub use session::{EditorAction, EditorSession};

/// Rows reserved for the title and status bars
const CHROME_ROWS: u16 = 2;

/// Main application struct for the terminal editor
pub struct TerminalApp {
    session: EditorSession,
    camera: Camera,
    renderer: AsciiRenderer,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(model: MeshModel, config: EditorConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let rows = height.saturating_sub(CHROME_ROWS);
        let frame_time = Duration::from_millis(1000 / u64::from(config.target_fps.max(1)));

        Ok(Self {
            session: EditorSession::new(model, config),
            camera: Camera::new(width as u32, rows as u32),
            renderer: AsciiRenderer::new(width as usize, rows as usize),
            frame_time,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!(undo_depth = self.session.history_len(), "editor closed");
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => match map_key(key) {
                Some(Input::Quit) => self.running = false,
                Some(Input::Edit(action)) => self.session.perform(action),
                Some(Input::Orbit { dx, dy, dz }) => self.camera.orbit.rotate(dx, dy, dz),
                Some(Input::ToggleProjection) => self.camera.toggle_projection(),
                None => {}
            },
            Event::Resize(width, height) => {
                let rows = height.saturating_sub(CHROME_ROWS);
                self.renderer.resize(width as usize, rows as usize);
                self.camera.aspect = width as f32 / rows.max(1) as f32;
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer
            .render_model(&self.session.model().borrow(), &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        let (_, height) = terminal::size()?;
        let status = match self.session.status() {
            Some(message) => format!("{} | {}", self.session.summary(), message),
            None => self.session.summary(),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!("edit3d | FPS: {:.1} | {}", self.fps, input::HELP)),
            cursor::MoveTo(0, height.saturating_sub(1)),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Green),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
