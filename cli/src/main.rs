mod command;
mod highlighter;
mod lexer;

use clap::Parser;
use command::Command;
use miette::{IntoDiagnostic, Result};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, default_emacs_keybindings,
};
use remexpr::{Engine, EngineOptions, EvaluatorOptions, Settings, render_error};
use remexpr_core::env::{
    DATE_SEPARATORS, DATETIME_SEPARATORS, SYSTEM_VARIABLES, TIME_SEPARATORS, parse_separator,
};
use remexpr_core::registry::builtins;
use std::io::BufRead;
use std::io::BufReader;

/// remexpr - evaluate reminder-file expressions
#[derive(Parser, Debug)]
#[command(name = "remexpr")]
#[command(about = "Evaluate remexpr expressions", long_about = None)]
struct Args {
    /// Echo every operator and function application to stderr
    #[arg(short = 'x', long)]
    trace: bool,

    /// Define a variable or function first: NAME=EXPR, $SYSVAR=EXPR or
    /// name(a,b)=EXPR (repeatable)
    #[arg(short = 'i', long = "define", value_name = "DEFINITION")]
    defines: Vec<String>,

    /// Separator used when printing dates
    #[arg(long, default_value_t = Settings::DEFAULT.date_sep, value_parser = separator(DATE_SEPARATORS))]
    date_sep: char,

    /// Separator used when printing times
    #[arg(long, default_value_t = Settings::DEFAULT.time_sep, value_parser = separator(TIME_SEPARATORS))]
    time_sep: char,

    /// Separator between the date and time of a printed datetime
    #[arg(
        long,
        default_value_t = Settings::DEFAULT.datetime_sep,
        value_parser = separator(DATETIME_SEPARATORS)
    )]
    datetime_sep: char,

    /// Longest string concatenation may build, in bytes (0 = unlimited)
    #[arg(long, default_value_t = Settings::DEFAULT.max_string_len)]
    max_string_len: usize,

    /// Deepest nesting of parentheses and function calls
    #[arg(long)]
    max_depth: Option<usize>,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

/// Parse a separator flag with the rules of the matching system variable.
fn separator(allowed: &'static [char]) -> impl Fn(&str) -> Result<char, String> + Clone + Send + Sync + 'static {
    move |arg| {
        parse_separator(arg, allowed).map_err(|_| {
            let choices: Vec<String> = allowed.iter().map(|c| format!("'{c}'")).collect();
            format!("expected one of {}", choices.join(", "))
        })
    }
}

impl Args {
    fn engine_options(&self) -> EngineOptions {
        let defaults = EvaluatorOptions::default();
        EngineOptions {
            settings: Settings {
                date_sep: self.date_sep,
                time_sep: self.time_sep,
                datetime_sep: self.datetime_sep,
                max_string_len: self.max_string_len,
            },
            evaluator: EvaluatorOptions {
                max_depth: self.max_depth.unwrap_or(defaults.max_depth),
                debug_trace: self.trace,
                ..defaults
            },
        }
    }
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn completion_words() -> Vec<String> {
    let commands = ["set", "fset", "unset", "funset"].map(String::from);
    let functions = builtins().iter().map(|f| f.name.to_string());
    let sys_vars = SYSTEM_VARIABLES.iter().map(|v| format!("${}", v.name));
    commands.into_iter().chain(functions).chain(sys_vars).collect()
}

fn setup_reedline(time_sep: char) -> (Reedline, DefaultPrompt) {
    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['$', '_']);
        completions.insert(completion_words());
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(highlighter::Highlighter::new(time_sep)))
        .with_validator(Box::new(lexer::ExprValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Empty,
        DefaultPromptSegment::CurrentDateTime,
    );

    (line_editor, prompt)
}

/// Run one line of input. Returns false if it failed.
fn interpret_input(engine: &mut Engine, input: &str) -> bool {
    match command::parse(input) {
        Command::Eval("") => true,
        Command::Eval(expr) => match engine.eval(expr) {
            Ok(value) => {
                println!("{}", value);
                true
            }
            Err(e) => {
                render_error(&e);
                false
            }
        },
        Command::Define(definition) => match engine.define(&definition) {
            Ok(()) => true,
            Err(e) => {
                render_error(&e);
                false
            }
        },
        Command::Unset(name) => {
            if engine.symbols_mut().remove_var(name).is_none() {
                eprintln!("Undefined variable: {}", name);
            }
            true
        }
        Command::FunUnset(name) => {
            if !engine.symbols_mut().remove_function(name) {
                eprintln!("Undefined function: {}", name);
            }
            true
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use REMEXPR_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("REMEXPR_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut engine = Engine::new(args.engine_options());

    for definition in &args.defines {
        if let Err(e) = engine.define(definition) {
            render_error(&e);
            std::process::exit(1);
        }
    }

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        if !interpret_input(&mut engine, expr) {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        // Interactive REPL mode
        let (mut line_editor, prompt) = setup_reedline(args.time_sep);

        println!("remexpr REPL - Type expressions to evaluate (Ctrl+D or Ctrl+C to exit)");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => {
                    interpret_input(&mut engine, buffer.as_ref());
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());
        let mut failed = false;

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading line from stdin: {}", e);
                    return Ok(());
                }
            };

            failed |= !interpret_input(&mut engine, &line);
        }

        if failed {
            std::process::exit(1);
        }
    }

    Ok(())
}
