//! stylex - atomic CSS compiler

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use stylex_compiler::bundle::output_path;
use stylex_compiler::{Bundle, LintOptions, TransformOptions, lint_source};

#[derive(Parser)]
#[command(name = "stylex")]
#[command(version, about = "Atomic CSS-in-JS compiler", long_about = None)]
#[command(after_help = "EXAMPLES:
    stylex lint src/Button.js            Report invalid style definitions
    stylex compile src/*.js --css out.css
                                         Rewrite modules, write one stylesheet
    stylex compile --dev src/App.js      Development output with runtime injection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check style definitions without compiling
    Lint {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Print messages as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile modules
    Compile {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Development output: runtime registrations and debug keys
        #[arg(long)]
        dev: bool,

        /// Directory for rewritten modules (default: print to stdout)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Write the stylesheet to this file (default: print to stdout)
        #[arg(long, value_name = "FILE")]
        css: Option<PathBuf>,

        /// JSON options file (camelCase keys)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Class name prefix
        #[arg(long)]
        prefix: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Lint { files, json } => lint(&files, json),
        Command::Compile {
            files,
            dev,
            out_dir,
            css,
            config,
            prefix,
        } => compile(&files, dev, out_dir.as_deref(), css.as_deref(), config.as_deref(), prefix),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn lint(files: &[PathBuf], json: bool) -> Result<ExitCode, String> {
    let options = LintOptions::default();
    let mut total = 0;
    let mut report = Vec::new();
    for path in files {
        let source = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
        let messages = lint_source(&source, &options).map_err(|e| format!("{}: {e}", path.display()))?;
        total += messages.len();
        if json {
            report.push(serde_json::json!({
                "file": path.display().to_string(),
                "messages": messages,
            }));
        } else {
            for m in &messages {
                println!(
                    "{}:{}:{}: {} [{}]",
                    path.display(),
                    m.line,
                    m.column,
                    m.message,
                    m.kind.code()
                );
            }
        }
    }
    if json {
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{text}");
    } else if total > 0 {
        eprintln!("{total} problem(s)");
    }
    Ok(if total > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn compile(
    files: &[PathBuf],
    dev: bool,
    out_dir: Option<&Path>,
    css: Option<&Path>,
    config: Option<&Path>,
    prefix: Option<String>,
) -> Result<ExitCode, String> {
    let mut options = match config {
        Some(path) => TransformOptions::from_json_file(path).map_err(|e| e.to_string())?,
        None => TransformOptions::default(),
    };
    if dev {
        options.dev = true;
    }
    if let Some(prefix) = prefix {
        options.class_name_prefix = prefix;
    }
    options.validate().map_err(|e| e.to_string())?;

    let bundle = Bundle::new(options);
    let output = bundle.compile_paths(files).map_err(|e| e.to_string())?;

    for module in &output.modules {
        match out_dir {
            Some(dir) => {
                let target = output_path(dir, &module.id);
                if overwrites_input(&target, &module.id) {
                    return Err(format!("{}: refusing to overwrite the input module", target.display()));
                }
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
                }
                std::fs::write(&target, &module.output.code)
                    .map_err(|e| format!("{}: {e}", target.display()))?;
            }
            None => {
                println!("// {}", module.id);
                println!("{}", module.output.code);
            }
        }
    }

    if let Some(stylesheet) = &output.stylesheet {
        match css {
            Some(path) => std::fs::write(path, format!("{stylesheet}\n"))
                .map_err(|e| format!("{}: {e}", path.display()))?,
            None => println!("{stylesheet}"),
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn overwrites_input(target: &Path, module_id: &str) -> bool {
    match (std::fs::canonicalize(target), std::fs::canonicalize(module_id)) {
        (Ok(target), Ok(input)) => target == input,
        _ => false,
    }
}
