//! padcalc: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! padcalc                          # Interactive calculator
//! padcalc eval "12+8"              # Print 20
//! padcalc press 1 2 + 8 = --json   # Replay button presses
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use padcalc::{
    cli::{Cli, Commands, EvalArgs, PressArgs},
    core::{evaluator, format_number, format_outcome},
    error::CliResult,
    logging,
    session::{ButtonEvent, CalculatorSession},
    tui::{keypad_area, render, CalculatorApp, InputHandler, TerminalGuard},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use serde_json::json;
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = cli.config();
    let command = cli.resolved_command();

    logging::init(&config, command == Commands::Tui)?;

    match command {
        Commands::Tui => run_tui(),
        Commands::Eval(args) => run_eval(&args),
        Commands::Press(args) => run_press(&args),
    }
}

fn run_eval(args: &EvalArgs) -> CliResult<()> {
    let outcome = evaluator::evaluate(&args.expression);
    let display = format_outcome(&outcome);

    if args.json {
        let value = json!({
            "input": args.expression,
            "result": display,
            "ok": outcome.is_ok(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{display}");
    }

    let value = outcome?;
    info!(result = %format_number(value), "evaluated");
    Ok(())
}

fn run_press(args: &PressArgs) -> CliResult<()> {
    let events = args
        .labels
        .iter()
        .map(|label| label.parse::<ButtonEvent>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = CalculatorSession::new();
    session.handle_all(events);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    } else {
        println!("input:  {}", session.current_input());
        println!("result: {}", session.current_result());
        if !session.history().is_empty() {
            println!("{}", session.history().export_formatted());
        }
    }

    Ok(())
}

fn run_tui() -> CliResult<()> {
    let _guard = TerminalGuard::enter(io::stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    info!("starting interactive calculator");
    run_app(&mut terminal)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> CliResult<()> {
    let mut app = CalculatorApp::new();
    let input_handler = InputHandler::new();

    while !app.should_quit() {
        terminal.draw(|f| render(&app, f))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.apply(input_handler.handle_key(key));
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = terminal.size()?;
                let area = keypad_area(Rect::new(0, 0, size.width, size.height));
                app.click(area, mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    info!(entries = app.session().history().len(), "calculator closed");
    Ok(())
}
