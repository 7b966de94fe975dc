use colored::Colorize;
use commands::command_argument_builder;
use subsweep::handlers;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    // Show banner unless --quiet flag is set
    if !matches.get_flag("quiet") {
        print_banner();
    }

    handlers::handle_scan(&matches).await;
}

fn print_banner() {
    let banner = r#"
               __
   _______  __/ /_  ______      _____  ___  ____
  / ___/ / / / __ \/ ___/ | /| / / _ \/ _ \/ __ \
 (__  ) /_/ / /_/ (__  )| |/ |/ /  __/  __/ /_/ /
/____/\__,_/_.___/____/ |__/|__/\___/\___/ .___/
                                        /_/
"#;
    println!("{}", banner.bright_cyan());
    println!(
        "  {} v{} - dictionary-based subdomain discovery\n",
        "subsweep".bright_white().bold(),
        env!("CARGO_PKG_VERSION")
    );
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
