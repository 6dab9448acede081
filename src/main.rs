// Arbor CLI

use arbor::compiler_canopy::generate_to_string;
use arbor::diagnostic::Diagnostic;
use arbor::{CompilationContext, CompileError, GeneratorOptions};
use clap::{Parser as ClapParser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const PIPELINE: &[&str] = &["Lexer + Parser + Semantic", "Java Codegen", "Write"];

#[derive(ClapParser, Debug)]
#[command(name = "arbor", version, about = "Compiles arbor tree scripts to java")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence progress output and logs
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a source file into a java class
    Build {
        input: PathBuf,

        /// Output file, `-` writes to stdout. Defaults to `<class-name>.java`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the generated public class
        #[arg(long, default_value = "Main")]
        class_name: String,
    },
    /// Run all checks without generating code
    Check { input: PathBuf },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let level_filter = match (quiet, verbose) {
        (true, _) => Some(LevelFilter::OFF),
        (false, 0) => None,
        (false, 1) => Some(LevelFilter::INFO),
        (false, 2) => Some(LevelFilter::DEBUG),
        (false, _) => Some(LevelFilter::TRACE),
    };

    let builder = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false);

    if let Some(level_filter) = level_filter {
        builder.with_max_level(level_filter).init();
    } else {
        builder.init();
    }
}

fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn progress_bar(quiet: bool, stages: usize) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(stages as u64);
    if let Ok(bar_style) = ProgressStyle::with_template("PIPELINE [{bar:40.green}] {msg}") {
        bar.set_style(bar_style.progress_chars("━━-"));
    }
    bar
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Build {
            input,
            output,
            class_name,
        } => build(&input, output, class_name, cli.quiet),
        Command::Check { input } => check(&input, cli.quiet),
    }
}

fn read_source(input: &Path) -> Option<String> {
    match fs::read_to_string(input) {
        Ok(src) => Some(src),
        Err(e) => {
            print_failure("Setup", &format!("cannot read '{}': {}", input.display(), e));
            None
        }
    }
}

fn check(input: &Path, quiet: bool) -> ExitCode {
    let Some(src) = read_source(input) else {
        return ExitCode::FAILURE;
    };
    let bar = progress_bar(quiet, 1);
    bar.set_message(PIPELINE[0]);

    let mut ctx = CompilationContext::new();
    match arbor::parse(&src, &mut ctx) {
        Ok(_) => {
            bar.inc(1);
            bar.finish_with_message("Done");
            println!("{} Check passed: {}", style("✔").green().bold(), input.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            bar.abandon();
            print_error(input, &src, &error, &ctx);
            ExitCode::FAILURE
        }
    }
}

fn build(input: &Path, output: Option<PathBuf>, class_name: String, quiet: bool) -> ExitCode {
    if !is_java_identifier(&class_name) {
        print_failure(
            "Setup",
            &format!("'{}' is not a valid java class name", class_name),
        );
        return ExitCode::FAILURE;
    }
    let Some(src) = read_source(input) else {
        return ExitCode::FAILURE;
    };

    let bar = progress_bar(quiet, PIPELINE.len());
    bar.set_message(PIPELINE[0]);
    let mut ctx = CompilationContext::new();
    let program = match arbor::parse(&src, &mut ctx) {
        Ok(program) => program,
        Err(error) => {
            bar.abandon();
            print_error(input, &src, &error, &ctx);
            return ExitCode::FAILURE;
        }
    };
    bar.inc(1);

    bar.set_message(PIPELINE[1]);
    let options = GeneratorOptions { class_name };
    let java = generate_to_string(&program, &options);
    bar.inc(1);

    bar.set_message(PIPELINE[2]);
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.java", options.class_name)));
    if output.as_os_str() == "-" {
        bar.finish_and_clear();
        print!("{}", java);
        return ExitCode::SUCCESS;
    }
    if let Err(e) = fs::write(&output, java) {
        bar.abandon();
        print_failure("Write", &format!("cannot write '{}': {}", output.display(), e));
        return ExitCode::FAILURE;
    }
    bar.inc(1);
    bar.finish_with_message("Done");
    println!(
        "{} Build finished successfully! Java source at: {}",
        style("✔").green().bold(),
        style(output.display()).yellow()
    );
    ExitCode::SUCCESS
}

fn print_failure(phase: &str, message: &str) {
    eprintln!(
        "{} Stage: {}\n{}",
        style("✘").red().bold(),
        style(phase).red().bold(),
        message
    );
}

fn print_error(input: &Path, src: &str, error: &CompileError, ctx: &CompilationContext) {
    let diagnostic = Diagnostic::new(error, src);
    let (line, column) = diagnostic.location();
    eprintln!(
        "\n{} Stage: {} ({}:{}:{})",
        style("✘").red().bold(),
        style(error.stage()).red().bold(),
        input.display(),
        line,
        column
    );
    eprint!("{}", diagnostic);

    // the deferred pass reports every bad use, the first one is shown above
    for other in ctx.diagnostics().iter().skip(1) {
        let other = CompileError::from(other.clone());
        eprint!("{}", style(Diagnostic::new(&other, src)).dim());
    }
}
