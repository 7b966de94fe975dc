use crate::CLAP_STYLING;
use clap::arg;
use std::path::PathBuf;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("subsweep")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("subsweep")
        .styles(CLAP_STYLING)
        .about("Dictionary-based subdomain discovery over HTTP")
        .arg(
            arg!(-d --"domain" <DOMAIN> "The target apex domain, e.g. example.com")
                .required(true),
        )
        .arg(
            arg!(-w --"wordlist" <PATH> "Path to a newline-delimited label wordlist")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-o --"output" [BASENAME] "Persist results; the basename defaults to the target domain")
                .required(false)
                .num_args(0..=1)
                .default_missing_value(""),
        )
        .arg(
            arg!(-u --"extract-urls" "Collect outbound links from live pages")
                .required(false),
        )
        .arg(
            arg!(--"external-only" "With --extract-urls, keep only links pointing at other domains")
                .required(false)
                .requires("extract-urls"),
        )
        .arg(
            arg!(-b --"batch-size" <N> "Number of candidates probed concurrently per batch")
                .required(false)
                .value_parser(clap::value_parser!(usize))
                .default_value("1000"),
        )
        .arg(
            arg!(-t --"timeout" <SECS> "Per-request timeout in seconds")
                .required(false)
                .value_parser(clap::value_parser!(u64))
                .default_value("5"),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
}
