#[macro_use]
extern crate log;

use std::env;
use std::fs::File;
use std::io::{self, Write};

use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;
use qjp::prelude::*;

const EXIT_OK: i32 = 0;
const EXIT_ERROR: i32 = 1;

//------------------------------------------------------------------------------
fn main() {
    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if err
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
            {
                std::process::exit(EXIT_OK)
            }
            eprintln!("Error: {err}");
            if matches!(err.downcast_ref::<ReadError>(), Some(ReadError::NoInput)) {
                eprint!("\n{}", QjpOptions::command().render_help());
            }
            std::process::exit(EXIT_ERROR)
        }
    }
}

fn parse_args() -> QjpOptions {
    let mut args = Vec::new();

    args.extend(env::args().next());
    args.extend(
        env::var("QJP_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    QjpOptions::parse_from(args)
}

fn init_logger(opts: &QjpOptions) -> Result<()> {
    let mut builder = env_logger::builder();
    builder.format_timestamp_nanos();
    if let Some(path) = &opts.log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.try_init()?;
    Ok(())
}

fn real_main() -> Result<i32> {
    color_eyre::install()?;
    let opts = parse_args();
    init_logger(&opts)?;
    opts.validate()?;
    debug!("options: {opts:?}");

    //------------------------------------------------------------------------------
    // input
    let source = RecordSource::detect(opts.file.as_deref())?;
    let records = read_records(&source, opts.lines)?;

    //------------------------------------------------------------------------------
    let output = Qjp::run_with(&opts, &records)?;
    // cancel prints nothing and still exits 0
    if output.is_abort {
        debug!("cancelled with query {:?}", output.query);
        return Ok(EXIT_OK);
    }

    //------------------------------------------------------------------------------
    // output
    let lines = format_selection(&records, &output.selected, opts.output_field())?;
    let mut stdout = io::stdout().lock();
    for line in &lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;

    Ok(EXIT_OK)
}
