//! Command-line definition and typed parsing

use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use signup_schema::Candidate;
use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address for `serve`
pub const DEFAULT_ADDR: &str = "127.0.0.1:5555";

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run the reference `/customers` server
    Serve {
        /// Listen address
        addr: SocketAddr,
        /// Number of fake records to seed
        seed: usize,
        /// RNG seed for the fake records
        rng_seed: u64,
    },
    /// Print the current listing
    List {
        /// Store URL override
        url: Option<String>,
    },
    /// Drive a form session through one submission
    Submit {
        /// Raw field values
        candidate: Candidate,
        /// Store URL override
        url: Option<String>,
    },
    /// Evaluate values without submitting
    Validate {
        /// Raw field values
        candidate: Candidate,
        /// Emit the error map as JSON
        json: bool,
    },
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Optional TOML config file
    pub config: Option<PathBuf>,
    /// Number of `-v` flags
    pub verbosity: u8,
    /// Selected subcommand
    pub invocation: Invocation,
}

impl Cli {
    /// Parse from an argument iterator (first item is the binary name)
    ///
    /// # Errors
    /// `clap::Error` for unknown flags, missing arguments or `--help`.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    /// Parse the process arguments
    ///
    /// # Errors
    /// As [`try_parse_from`](Self::try_parse_from).
    pub fn try_parse() -> Result<Self, clap::Error> {
        Self::try_parse_from(std::env::args_os())
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let config = matches.get_one::<PathBuf>("config").cloned();
        let verbosity = matches.get_count("verbose");

        let invocation = match matches.subcommand() {
            Some(("serve", args)) => Invocation::Serve {
                addr: required::<SocketAddr>(args, "addr")?,
                seed: required::<usize>(args, "seed")?,
                rng_seed: required::<u64>(args, "rng-seed")?,
            },
            Some(("list", args)) => Invocation::List {
                url: args.get_one::<String>("url").cloned(),
            },
            Some(("submit", args)) => Invocation::Submit {
                candidate: candidate(args)?,
                url: args.get_one::<String>("url").cloned(),
            },
            Some(("validate", args)) => Invocation::Validate {
                candidate: candidate(args)?,
                json: args.get_flag("json"),
            },
            _ => {
                return Err(command().error(ErrorKind::MissingSubcommand, "a subcommand is required"))
            }
        };

        Ok(Self {
            config,
            verbosity,
            invocation,
        })
    }
}

fn required<T: Clone + Send + Sync + 'static>(
    args: &ArgMatches,
    name: &str,
) -> Result<T, clap::Error> {
    args.get_one::<T>(name).cloned().ok_or_else(|| {
        command().error(
            ErrorKind::MissingRequiredArgument,
            format!("missing --{name}"),
        )
    })
}

fn candidate(args: &ArgMatches) -> Result<Candidate, clap::Error> {
    Ok(Candidate::new(
        required::<String>(args, "name")?,
        required::<String>(args, "email")?,
        required::<String>(args, "age")?,
    ))
}

fn url_arg() -> Arg {
    Arg::new("url")
        .long("url")
        .help("Record store base URL (overrides config)")
}

// Values are taken verbatim; empty strings are legal and go to the evaluator.
fn field_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("name")
                .long("name")
                .default_value("")
                .help("Customer name"),
        )
        .arg(
            Arg::new("email")
                .long("email")
                .default_value("")
                .help("Customer email"),
        )
        .arg(
            Arg::new("age")
                .long("age")
                .default_value("")
                .allow_hyphen_values(true)
                .help("Customer age, as typed"),
        )
}

/// Build the `signup` command
#[must_use]
pub fn command() -> Command {
    Command::new("signup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Customer sign-up form and record store")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log level (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the /customers server over an in-memory store")
                .arg(
                    Arg::new("addr")
                        .long("addr")
                        .default_value(DEFAULT_ADDR)
                        .value_parser(value_parser!(SocketAddr))
                        .help("Listen address"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("0")
                        .value_parser(value_parser!(usize))
                        .help("Number of fake records to seed"),
                )
                .arg(
                    Arg::new("rng-seed")
                        .long("rng-seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducible fake records"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Fetch and print stored records")
                .arg(url_arg()),
        )
        .subcommand(field_args(
            Command::new("submit")
                .about("Fill the form, submit it and print the outcome")
                .arg(url_arg()),
        ))
        .subcommand(field_args(
            Command::new("validate")
                .about("Evaluate field values without submitting")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output errors as JSON"),
                ),
        ))
}
