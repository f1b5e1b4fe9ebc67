use std::fs::File;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::sync::Once;

use color_eyre::eyre::{OptionExt, Result, eyre};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{self, cursor};
use ratatui::layout::Rect;
use ratatui::prelude::Backend;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;
use ratatui::{TerminalOptions, Viewport};

use super::Geometry;
use super::util::wrap_line;

const TTY_PATH: &str = "/dev/tty";
static PANIC_HOOK_SET: Once = Once::new();

/// Terminal driver for the picker
///
/// The production driver owns `/dev/tty`, so the picker keeps working while standard input and
/// output are pipes. Raw mode and the alternate screen are released by [`Tui::exit`], which also
/// runs on drop.
pub struct Tui<B: Backend = ratatui::backend::CrosstermBackend<File>> {
    /// The ratatui terminal instance
    pub terminal: ratatui::Terminal<B>,
    geometry: Geometry,
    tty: Option<File>,
    entered: bool,
}

impl Tui {
    /// Opens the controlling terminal
    pub fn new() -> Result<Self> {
        let tty = File::options()
            .read(true)
            .write(true)
            .open(TTY_PATH)
            .map_err(|e| eyre!("opening {TTY_PATH}: {e}"))?;
        let backend = ratatui::backend::CrosstermBackend::new(tty.try_clone()?);
        let tui = Self::with_backend(backend, Some(tty))?;
        set_panic_hook();
        Ok(tui)
    }

    /// A second handle on the terminal to read key presses from
    pub fn input(&self) -> Result<File> {
        Ok(self.tty.as_ref().ok_or_eyre("no terminal attached")?.try_clone()?)
    }
}

impl<B: Backend> Tui<B> {
    /// Enables raw mode, switches to the alternate screen and hides the cursor
    pub fn enter(&mut self) -> Result<()> {
        let Some(mut tty) = self.tty.as_ref().map(File::try_clone).transpose()? else {
            self.entered = true;
            return Ok(());
        };
        crossterm::terminal::enable_raw_mode()?;
        self.enter_screen(&mut tty)
    }

    fn enter_screen<W: Write>(&mut self, out: &mut W) -> Result<()> {
        // raw mode is on from here, so exit() must run even if the writes below fail
        self.entered = true;
        crossterm::execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    /// Undoes [`Tui::enter`]. Safe to call more than once.
    ///
    /// Raw mode is disabled even when restoring the screen fails.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        if let Some(tty) = self.tty.as_mut() {
            let screen = crossterm::execute!(tty, cursor::Show, LeaveAlternateScreen);
            if crossterm::terminal::is_raw_mode_enabled()? {
                crossterm::terminal::disable_raw_mode()?;
            }
            screen?;
        }
        Ok(())
    }

    /// Size of the terminal captured when the driver was built, or 80x24 when it was unknown
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }
}

impl<B: Backend> Tui<B>
where
    B::Error: Send + Sync + 'static,
{
    /// Driver drawing into an arbitrary backend without touching the real terminal
    pub fn new_for_test(backend: B) -> Result<Self> {
        Self::with_backend(backend, None)
    }

    fn with_backend(backend: B, tty: Option<File>) -> Result<Self> {
        let (viewport, geometry) = viewport_for(&backend);
        let terminal = ratatui::Terminal::with_options(backend, TerminalOptions { viewport })?;
        Ok(Self {
            terminal,
            geometry,
            tty,
            entered: false,
        })
    }

    /// Paints a frame, wrapping each line at the terminal width
    pub fn draw(&mut self, lines: Vec<Line<'static>>) -> Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            let rows: Vec<Line> = lines
                .into_iter()
                .flat_map(|line| wrap_line(line, area.width.into()))
                .collect();
            frame.render_widget(Paragraph::new(Text::from(rows)), area);
        })?;
        Ok(())
    }
}

/// Full screen when the backend knows its size, otherwise a fixed 80x24 area at the origin
fn viewport_for<B: Backend>(backend: &B) -> (Viewport, Geometry) {
    match backend.size() {
        Ok(size) if size.width > 0 && size.height > 0 => {
            (Viewport::Fullscreen, Geometry::new(size.width, size.height))
        }
        Ok(size) => {
            warn!("terminal reported {}x{}, using defaults", size.width, size.height);
            fallback_viewport()
        }
        Err(e) => {
            warn!("could not get terminal size, using defaults: {e}");
            fallback_viewport()
        }
    }
}

fn fallback_viewport() -> (Viewport, Geometry) {
    let geometry = Geometry::default();
    let area = Rect::new(0, 0, geometry.width, geometry.height);
    (Viewport::Fixed(area), geometry)
}

impl<B: Backend> Deref for Tui<B> {
    type Target = ratatui::Terminal<B>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl<B: Backend> DerefMut for Tui<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl<B: Backend> Drop for Tui<B> {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            warn!("failed to restore terminal: {e}");
        }
    }
}

fn set_panic_hook() {
    PANIC_HOOK_SET.call_once(|| {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // ignore any errors as we are already failing
            let _ = crossterm::terminal::disable_raw_mode();
            if let Ok(mut tty) = File::options().write(true).open(TTY_PATH) {
                let _ = crossterm::execute!(tty, cursor::Show, LeaveAlternateScreen);
            }
            hook(panic_info);
        }));
    });
}
