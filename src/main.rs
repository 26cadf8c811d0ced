//! NodeScript CLI - compile `.ns` sources to JavaScript
//!
//! Usage: nodescript [options] [input] [output]
//!
//! One-shot mode compiles the input and exits; `--watch --output` keeps the
//! output tree live-updated until the process is stopped.

mod cli;
mod ui;

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use nodescript::watcher::{watch, WatchOptions};
use nodescript::{resolve, CompileEvent, Compiler, FailurePolicy, NsFrontend};

use crate::cli::Cli;
use crate::ui::UiContext;

fn main() {
    let cli = Cli::parse();
    let context = UiContext::detect();

    if let Err(error) = run(&cli, &context) {
        eprintln!("{}", ui::render_error(&format!("{error:#}"), &context));
        process::exit(1);
    }
}

fn run(cli: &Cli, context: &UiContext) -> Result<()> {
    let request = resolve(&cli.to_options())?;

    // The containment policy follows the watch flag, not the phase: even the
    // initial compile of a watch run reports failures instead of aborting.
    let policy = if cli.watch {
        FailurePolicy::Report
    } else {
        FailurePolicy::Propagate
    };

    let frontend = NsFrontend::default();
    let compiler = Compiler::new(&frontend, policy);

    let mut observer = |event: CompileEvent| match event {
        CompileEvent::Compiled { input, output } => {
            println!("{}", ui::render_compiled(&input, &output, context));
        }
        CompileEvent::Failed { message } => {
            eprintln!("{}", ui::render_error(&message, context));
        }
    };

    compiler.compile(&request.input, &request.output, &mut observer)?;

    if cli.watch {
        let running = Arc::new(AtomicBool::new(true));
        let stopper = running.clone();
        ctrlc::set_handler(move || stopper.store(false, Ordering::SeqCst))
            .context("failed to install Ctrl+C handler")?;

        println!(
            "{}",
            ui::render_watch_header(&request.input, &request.output, context)
        );

        watch(
            &compiler,
            &request,
            WatchOptions::default(),
            running,
            &mut observer,
        )?;
    }

    Ok(())
}
