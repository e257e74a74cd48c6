// BrainTTY: Time-Travel Brainfuck Interpreter with Tape Visualization

mod compiler;
mod interpreter;
mod memory;
mod parser;
mod trace;
mod ui;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use compiler::Compiler;
use interpreter::engine::{DEFAULT_LOOP_LIMIT, Interpreter};
use ui::App;

/// What to do with the program once it is built
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tui,
    Run,
    Compiled,
    Log,
    Step,
    Structure,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args
        .first()
        .map(|s| s.as_str())
        .unwrap_or("braintty")
        .to_string();

    let mut file: Option<String> = None;
    let mut input = String::new();
    let mut limit: Option<usize> = None;
    let mut feedback = false;
    let mut mode = Mode::Tui;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-i" | "--input" => {
                i += 1;
                match args.get(i) {
                    Some(value) => input = value.clone(),
                    None => {
                        eprintln!("Error: --input requires a value");
                        std::process::exit(1);
                    }
                }
            }
            "--limit" => {
                i += 1;
                match args.get(i).and_then(|value| value.parse::<usize>().ok()) {
                    Some(value) => limit = Some(value),
                    None => {
                        eprintln!("Error: --limit requires an integer value");
                        std::process::exit(1);
                    }
                }
            }
            "--run" => mode = Mode::Run,
            "--compiled" => mode = Mode::Compiled,
            "--log" => mode = Mode::Log,
            "--step" => mode = Mode::Step,
            "--structure" => mode = Mode::Structure,
            "--feedback" => feedback = true,
            "-h" | "--help" => {
                print_usage(&program_name);
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", other);
                eprintln!();
                print_usage(&program_name);
                std::process::exit(1);
            }
            other => {
                if file.is_some() {
                    eprintln!("Error: More than one program file provided");
                    std::process::exit(1);
                }
                file = Some(other.to_string());
            }
        }
        i += 1;
    }

    let source_file = match file {
        Some(file) => file,
        None => {
            eprintln!("Error: No program file provided");
            eprintln!();
            print_usage(&program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(&source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        std::process::exit(1);
    }

    // Read source code
    let source = fs::read_to_string(&source_file)?;

    // Build the program
    let mut interpreter = Interpreter::new();
    if let Err(e) = interpreter.build(&source) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    if let Some(limit) = limit {
        if let Err(e) = interpreter.set_loop_limit(limit) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    match mode {
        Mode::Structure => {
            print!("{}", interpreter.structure()?);
            Ok(())
        }
        Mode::Run => run_plain(&interpreter, &input, feedback),
        Mode::Compiled => run_compiled(&source, &input, limit),
        Mode::Log => dump_log(&interpreter, &input, feedback, false),
        Mode::Step => dump_log(&interpreter, &input, feedback, true),
        Mode::Tui => run_tui(interpreter, input, feedback),
    }
}

/// Execute the program and print its output, without the TUI
fn run_plain(
    interpreter: &Interpreter,
    input: &str,
    feedback: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let execution = interpreter.execute_detailed(input, feedback)?;
    print!("{}", execution.result);
    io::stdout().flush()?;
    if execution.error {
        eprintln!(
            "warning: loop iteration limit {} exceeded; output may be incomplete",
            interpreter.loop_limit()
        );
    }
    Ok(())
}

/// Execute the pre-assembled program and print its output
fn run_compiled(
    source: &str,
    input: &str,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut compiler = Compiler::new();
    if let Err(e) = compiler.build(source) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    if let Some(limit) = limit {
        if let Err(e) = compiler.set_loop_limit(limit) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    match compiler.run(input) {
        Ok(output) => {
            print!("{}", output);
            io::stdout().flush()?;
            Ok(())
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the recorded execution log, optionally pausing for <Enter> between steps
fn dump_log(
    interpreter: &Interpreter,
    input: &str,
    feedback: bool,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (execution, log) = interpreter.execute_traced(input, feedback)?;
    let source = interpreter.source();

    if interactive {
        eprintln!("Press <Enter> to advance, 'q' + <Enter> to stop.");
    }

    let stdin = io::stdin();
    let mut line = String::new();
    let mut output_so_far = String::new();

    for entry in &log {
        if let Some(value) = entry.emitted {
            output_so_far.push(value.to_char());
        }
        print!("{}", entry.render(source, input, &output_so_far));
        if interactive {
            io::stdout().flush()?;
            line.clear();
            stdin.read_line(&mut line)?;
            if line.trim() == "q" {
                break;
            }
        }
    }

    println!("------------------------------------------------");
    println!(
        "{} steps, {} output values{}",
        log.len(),
        execution.responses.len(),
        if execution.error {
            " (aborted at the loop ceiling)"
        } else {
            ""
        }
    );
    Ok(())
}

/// Record the execution and replay it in the TUI
fn run_tui(
    interpreter: Interpreter,
    input: String,
    feedback: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Run execution to record the trace
    eprintln!("Executing program...");
    let source = interpreter.source().to_string();
    let (execution, log) = interpreter.execute_traced(&input, feedback)?;
    eprintln!("Execution recorded {} steps.", log.len());
    if execution.error {
        eprintln!("Loop iteration limit reached; the trace ends at the abandoned loop.");
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(log, execution, source, input);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file.bf> [options]", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i, --input <text>   Input the program reads with ','");
    eprintln!(
        "      --limit <n>      Loop iteration ceiling (default {})",
        DEFAULT_LOOP_LIMIT
    );
    eprintln!("      --feedback       Warn about skipped characters and exhausted input");
    eprintln!("      --run            Execute and print the output, no TUI");
    eprintln!("      --compiled       Execute the pre-assembled program, no tracing");
    eprintln!("      --log            Print the step-by-step execution log");
    eprintln!("      --step           Walk the execution log one step per <Enter>");
    eprintln!("      --structure      Print the parsed loop structure");
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} hello.bf                   # Replay the execution in the TUI",
        program_name
    );
    eprintln!(
        "  {} echo.bf -i \"hi!\" --run     # Run and print the output",
        program_name
    );
}
