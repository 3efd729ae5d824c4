use std::path::{Path, PathBuf};
use std::process::ExitCode;

use parsley::css::sort_by_specificity;
use parsley::{parse_css_selectors, parse_html, DOMNode, ParseError, SpecificityOrder};
use thiserror::Error;
use tracing::{info, span, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  parsley [--trace] html <file>
  parsley [--trace] [--lexicographic] selectors <selector-list>
  parsley [--trace] [--lexicographic] match <file> <selector-list>";

enum Command {
    Html { path: PathBuf },
    Selectors { source: String },
    Match { path: PathBuf, source: String },
}

struct Args {
    pub command: Command,
    pub trace: bool,
    pub order: SpecificityOrder,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn main() -> ExitCode {
    let args = match parse_args(pico_args::Arguments::from_env()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };
    if args.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::DEBUG)
            .with_env_filter(EnvFilter::from_default_env())
            .finish()
            .init();
        info!("Logger initialized");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(mut pargs: pico_args::Arguments) -> Result<Args, pico_args::Error> {
    let trace = pargs.contains(["-t", "--trace"]);
    let order = if pargs.contains(["-l", "--lexicographic"]) {
        SpecificityOrder::Lexicographic
    } else {
        SpecificityOrder::Sum
    };
    let command = match pargs.subcommand()?.as_deref() {
        Some("html") => Command::Html {
            path: pargs.free_from_str()?,
        },
        Some("selectors") => Command::Selectors {
            source: pargs.free_from_str()?,
        },
        Some("match") => Command::Match {
            path: pargs.free_from_str()?,
            source: pargs.free_from_str()?,
        },
        Some(other) => {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown command `{}`", other),
            })
        }
        None => return Err(pico_args::Error::MissingArgument),
    };
    let remaining = pargs.finish();
    if !remaining.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments {:?}", remaining),
        });
    }
    Ok(Args {
        command,
        trace,
        order,
    })
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Html { path } => {
            let document = parse_html(&read_source(&path)?)?;
            print_tree(&document, 0);
        }
        Command::Selectors { source } => {
            let mut selectors = parse_css_selectors(&source)?;
            sort_by_specificity(&mut selectors, args.order);
            for selector in selectors {
                let spec = selector.specificity();
                println!(
                    "{}\t({}, {}, {})\t{}",
                    selector,
                    spec.0,
                    spec.1,
                    spec.2,
                    spec.sum()
                );
            }
        }
        Command::Match { path, source } => {
            let document = parse_html(&read_source(&path)?)?;
            let mut selectors = parse_css_selectors(&source)?;
            sort_by_specificity(&mut selectors, args.order);
            let elements = document.elements();
            for selector in selectors {
                let matched: Vec<String> = elements
                    .iter()
                    .filter(|el| selector.matches(el))
                    .map(|el| el.tag_name.clone())
                    .collect();
                println!("{}\t{}", selector, matched.join(" "));
            }
        }
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String, CliError> {
    let span = span!(Level::DEBUG, "Reading source", path = %path.display());
    let _enter = span.enter();
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Print an indented outline of the tree, one node per line
fn print_tree(node: &DOMNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        DOMNode::Text(text) => println!("{}{:?}", indent, text),
        DOMNode::Element(el) => {
            let mut attrs: Vec<_> = el.attributes.0.iter().collect();
            attrs.sort();
            let attrs: String = attrs
                .into_iter()
                .map(|(k, v)| format!(" {}={:?}", k, v))
                .collect();
            println!("{}<{}{}>", indent, el.tag_name, attrs);
            for child in &el.children {
                print_tree(child, depth + 1);
            }
        }
    }
}

#[cfg(test)]
fn args_from(args: &[&str]) -> pico_args::Arguments {
    pico_args::Arguments::from_vec(args.iter().map(|a| std::ffi::OsString::from(*a)).collect())
}

#[cfg(test)]
#[test]
fn test_parse_args() {
    let args = parse_args(args_from(&["--lexicographic", "selectors", "a, b"])).unwrap();
    assert!(!args.trace);
    assert_eq!(args.order, SpecificityOrder::Lexicographic);
    assert!(matches!(args.command, Command::Selectors { source } if source == "a, b"));

    let args = parse_args(args_from(&["-t", "match", "page.html", "#x"])).unwrap();
    assert!(args.trace);
    assert!(matches!(args.command, Command::Match { source, .. } if source == "#x"));
}

#[cfg(test)]
#[test]
fn test_parse_args_rejects_leftovers() {
    assert!(matches!(
        parse_args(args_from(&["selectors", "a", "b"])),
        Err(pico_args::Error::ArgumentParsingFailed { .. })
    ));
    assert!(matches!(
        parse_args(args_from(&["html", "page.html", "--verbose"])),
        Err(pico_args::Error::ArgumentParsingFailed { .. })
    ));
    assert!(parse_args(args_from(&["render", "x"])).is_err());
    assert!(parse_args(args_from(&[])).is_err());
}
