//! crates/cli/src/arguments.rs
//! Command definition and parsing for `dirls`.

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command as ClapCommand, builder::OsStringValueParser};

/// Program name used in diagnostics and help output.
pub const PROGRAM_NAME: &str = "dirls";

/// Options recognised on the command line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) verbosity: u8,
    pub(crate) long: bool,
    pub(crate) sort: bool,
    pub(crate) directories: Vec<OsString>,
}

pub(crate) fn clap_command() -> ClapCommand {
    ClapCommand::new(PROGRAM_NAME)
        .about("List directory entries through the portable find-first/find-next cursor.")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output; repeat for more detail.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("long")
                .long("long")
                .short('l')
                .help("Prefix each name with its entry kind.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .help("Sort names within each directory instead of native order.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("directories")
                .value_name("DIR")
                .help("Directories to list (default: the current directory).")
                .action(ArgAction::Append)
                .num_args(0..)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let mut directories: Vec<OsString> = matches
        .remove_many::<OsString>("directories")
        .map(Iterator::collect)
        .unwrap_or_default();
    if directories.is_empty() {
        directories.push(OsString::from("."));
    }

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        verbosity: matches.get_count("verbose"),
        long: matches.get_flag("long"),
        sort: matches.get_flag("sort"),
        directories,
    })
}

/// Renders the help text from the command definition.
pub(crate) fn help_text() -> String {
    clap_command().render_help().to_string()
}
