//! Module containing qjp's entry point
use std::io::Read;

use color_eyre::eyre::{Result, bail};
use ratatui::prelude::Backend;

use crate::display::DisplayPool;
use crate::options::QjpOptions;
use crate::output::QjpOutput;
use crate::record::Record;
use crate::theme::ColorTheme;
use crate::tui::event::{MAX_SEQUENCE_LEN, decode};
use crate::tui::{App, Step, Tui};

/// Main entry point for running qjp
pub struct Qjp {}

impl Qjp {
    /// Runs an interactive session over `records` on the controlling terminal.
    ///
    /// # Returns
    ///
    /// The selected record positions, or an aborted `QjpOutput` when the operator cancelled.
    /// Reading from the terminal failing ends the session with an error; the terminal is restored
    /// either way.
    pub fn run_with(options: &QjpOptions, records: &[Record]) -> Result<QjpOutput> {
        let spec = options.display_spec(records);
        debug!("display spec: {spec:?}");
        let pool = DisplayPool::new(records, &spec);

        let mut tui = Tui::new()?;
        let geometry = tui.geometry();
        debug!("terminal geometry: {geometry:?}");
        let mut input = tui.input()?;
        let app = App::new(pool, geometry, ColorTheme::from_env());

        tui.enter()?;
        let output = Self::run_on(&mut tui, &mut input, app);
        tui.exit()?;
        output
    }

    /// Runs the event loop on an already entered driver, reading key presses from `input`.
    ///
    /// Each read gets a buffer of [`MAX_SEQUENCE_LEN`] bytes and is decoded as a whole; reads
    /// that decode to nothing are ignored without redrawing.
    pub fn run_on<B, R>(tui: &mut Tui<B>, input: &mut R, mut app: App) -> Result<QjpOutput>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
        R: Read,
    {
        tui.draw(app.render_lines())?;
        let mut buf = [0u8; MAX_SEQUENCE_LEN];
        loop {
            let n = input.read(&mut buf)?;
            if n == 0 {
                bail!("terminal input closed");
            }
            let Some(action) = decode(&buf[..n]) else {
                trace!("ignoring input {:?}", &buf[..n]);
                continue;
            };
            app = match app.handle(action) {
                Step::Continue(next) => next,
                Step::Accept(last) => {
                    let output = QjpOutput {
                        selected: last.current_selection(),
                        query: last.query().to_string(),
                        is_abort: false,
                    };
                    debug!("accepted: {output:?}");
                    return Ok(output);
                }
                Step::Abort(last) => {
                    debug!("aborted");
                    return Ok(QjpOutput {
                        selected: Vec::new(),
                        query: last.query().to_string(),
                        is_abort: true,
                    });
                }
            };
            tui.draw(app.render_lines())?;
        }
    }
}
