//! `maxflow` command-line front end
//!
//! Reads `n m`, `m` edge triples and `s t` from standard input or from the
//! given files, and prints `Maximum Flow: <value>` for each problem.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

mod cli;

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{debug, info};
use maxflow_core::{
    render_json, render_text, solve_batch, Algorithm, CapacityGraph, FlowError, FlowResult,
    MaxFlowResult, MaxFlowSolver, ProblemInstance, SolverConfig,
};

use crate::cli::{Cli, OutputFormat};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> FlowResult<()> {
    run_with(cli, io::stdin().lock(), &mut io::stdout().lock(), &mut io::stderr().lock())
}

fn run_with<R: Read>(cli: &Cli, stdin: R, out: &mut impl Write, err: &mut impl Write) -> FlowResult<()> {
    let config = load_config(cli)?;

    match cli.inputs.as_slice() {
        [] => {
            let result = ProblemInstance::from_reader(stdin)?.solve(&config)?;
            writeln!(out, "{}", render(&result, cli)?)?;
            Ok(())
        }
        [path] => {
            let result = read_instance(path)?.solve(&config)?;
            writeln!(out, "{}", render(&result, cli)?)?;
            Ok(())
        }
        paths => run_batch(paths, &config, cli, out, err),
    }
}

/// Config file first, then `--param` overrides validated through the solver's parameter interface
fn load_config(cli: &Cli) -> FlowResult<SolverConfig> {
    let config = match &cli.config {
        Some(path) => {
            debug!("Loading solver configuration from {}", path.display());
            SolverConfig::from_path(path)?
        }
        None => SolverConfig::default(),
    };

    if cli.params.is_empty() {
        return Ok(config);
    }

    let mut solver = MaxFlowSolver::with_config(CapacityGraph::empty(0)?, config);
    for (name, value) in &cli.params {
        solver.set_parameter(name, value)?;
    }
    info!("{} parameters: {:?}", solver.name(), solver.parameters());

    Ok(solver.config().clone())
}

fn read_instance(path: &Path) -> FlowResult<ProblemInstance> {
    let file = File::open(path)?;
    ProblemInstance::from_reader(BufReader::new(file))
}

fn render(result: &MaxFlowResult, cli: &Cli) -> FlowResult<String> {
    match cli.format {
        OutputFormat::Text => Ok(render_text(result, cli.min_cut)),
        OutputFormat::Json => render_json(result),
    }
}

/// Solve several files in parallel; each line is prefixed with its path.
///
/// Results are written in input order. Failures go to `err` and the first
/// one is returned once every file has been reported.
fn run_batch(
    paths: &[PathBuf],
    config: &SolverConfig,
    cli: &Cli,
    out: &mut impl Write,
    err: &mut impl Write,
) -> FlowResult<()> {
    let parsed: Vec<FlowResult<ProblemInstance>> = paths.iter().map(|path| read_instance(path)).collect();
    let valid: Vec<ProblemInstance> = parsed.iter().filter_map(|instance| instance.as_ref().ok()).cloned().collect();
    let mut solved = solve_batch(&valid, config).into_iter();

    let mut first_error: Option<FlowError> = None;
    for (path, instance) in paths.iter().zip(parsed) {
        let outcome = match instance {
            Err(error) => Err(error),
            Ok(_) => match solved.next() {
                Some(result) => result,
                None => break,
            },
        };

        match outcome.and_then(|result| render(&result, cli)) {
            Ok(rendered) => writeln!(out, "{}: {}", path.display(), rendered)?,
            Err(error) => {
                writeln!(err, "{}: error: {}", path.display(), error)?;
                first_error.get_or_insert(error);
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maxflow_core::SearchStrategy;
    use std::fs;
    use tempfile::tempdir;

    const DIAMOND: &str = "4 4\n0 1 3\n0 2 2\n1 3 2\n2 3 3\n0 3\n";

    fn parse_args(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("maxflow").chain(args.iter().copied())).unwrap()
    }

    /// Run against in-memory streams, returning the result with captured stdout and stderr
    fn capture(cli: &Cli, stdin: &str) -> (FlowResult<()>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run_with(cli, stdin.as_bytes(), &mut out, &mut err);
        (result, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_stdin_is_the_default_input() {
        let (result, out, err) = capture(&parse_args(&[]), DIAMOND);

        assert!(result.is_ok());
        assert_eq!(out, "Maximum Flow: 4\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_malformed_stdin_reports_exit_code() {
        let (result, out, _) = capture(&parse_args(&[]), "4 1\n0 1");

        assert_eq!(result.unwrap_err().exit_code(), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_file_with_json_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diamond.txt");
        fs::write(&path, DIAMOND).unwrap();

        let cli = parse_args(&[path.to_str().unwrap(), "--format", "json"]);
        let (result, out, _) = capture(&cli, "");

        assert!(result.is_ok());
        assert!(out.contains("\"max_flow\": 4"));
        assert!(!out.contains(&path.display().to_string()));
    }

    #[test]
    fn test_batch_keeps_order_and_returns_first_error() {
        let dir = tempdir().unwrap();
        let files = [
            ("a.txt", DIAMOND),
            ("b.txt", "3 1\n0 3 1\n0 2\n"),
            ("c.txt", "2 1 0 1 5 0 1"),
            ("d.txt", "2 1 0 1 x 0 1"),
        ];
        let paths: Vec<PathBuf> = files
            .iter()
            .map(|(name, contents)| {
                let path = dir.path().join(name);
                fs::write(&path, contents).unwrap();
                path
            })
            .collect();

        let args: Vec<&str> = paths.iter().map(|path| path.to_str().unwrap()).collect();
        let (result, out, err) = capture(&parse_args(&args), "");

        assert_eq!(
            out,
            format!(
                "{}: Maximum Flow: 4\n{}: Maximum Flow: 5\n",
                paths[0].display(),
                paths[2].display()
            )
        );

        let errors: Vec<&str> = err.lines().collect();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with(&format!("{}: error: invalid vertex index 3", paths[1].display())));
        assert!(errors[1].starts_with(&format!("{}: error: malformed input", paths[3].display())));

        let first = result.unwrap_err();
        assert!(matches!(first, FlowError::InvalidVertexIndex { vertex: 3, .. }));
        assert_eq!(first.exit_code(), 3);
    }

    #[test]
    fn test_batch_reports_missing_files_without_stopping() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present.txt");
        let missing = dir.path().join("missing.txt");
        fs::write(&present, DIAMOND).unwrap();

        let cli = parse_args(&[missing.to_str().unwrap(), present.to_str().unwrap()]);
        let (result, out, err) = capture(&cli, "");

        assert_eq!(out, format!("{}: Maximum Flow: 4\n", present.display()));
        assert!(err.starts_with(&format!("{}: error: I/O error", missing.display())));
        assert!(matches!(result, Err(FlowError::Io(_))));
    }

    #[test]
    fn test_params_override_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("solver.json");
        fs::write(&config_path, r#"{"strategy": "recursive", "record_paths": false}"#).unwrap();
        let config_arg = config_path.to_str().unwrap();

        let config = load_config(&parse_args(&["--config", config_arg])).unwrap();
        assert_eq!(config.strategy, SearchStrategy::Recursive);
        assert!(!config.record_paths);

        let config = load_config(&parse_args(&["--config", config_arg, "--param", "record_paths=true"])).unwrap();
        assert_eq!(config.strategy, SearchStrategy::Recursive);
        assert!(config.record_paths);

        let config = load_config(&parse_args(&["--config", config_arg, "--param", "strategy=iterative"])).unwrap();
        assert_eq!(config.strategy, SearchStrategy::Iterative);

        let cli = parse_args(&["--config", config_arg, "--param", "record_paths=true", "--format", "json"]);
        let (result, out, _) = capture(&cli, DIAMOND);
        assert!(result.is_ok());
        assert!(out.contains("\"strategy\": \"recursive\""));
        assert!(out.contains("\"bottleneck\""));
    }

    #[test]
    fn test_config_errors_surface_before_solving() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("solver.json");
        fs::write(&config_path, r#"{"strategy": "breadth"}"#).unwrap();

        let (result, out, _) = capture(&parse_args(&["--config", config_path.to_str().unwrap()]), DIAMOND);
        assert!(matches!(result, Err(FlowError::Config(_))));
        assert!(out.is_empty());

        let unknown = load_config(&parse_args(&["--param", "depth=3"])).unwrap_err();
        assert!(matches!(unknown, FlowError::InvalidParameter { .. }));
        assert_eq!(unknown.exit_code(), 1);
    }
}
