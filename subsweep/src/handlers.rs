use chrono::Local;
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use subsweep_scanner::{Enumerator, ScanReport, load_wordlist};

fn info_tag() -> String {
    "[ info ]".blue().to_string()
}

/// Local wall-clock time for the start/end report lines.
pub fn local_timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Maps the tri-state `--output` argument: absent means no
/// persistence, present without a value means "use the target domain
/// as basename".
pub fn resolve_output_basename(output: Option<&String>, domain: &str) -> Option<String> {
    match output {
        Some(basename) if !basename.is_empty() => Some(basename.clone()),
        Some(_) => Some(domain.to_string()),
        None => None,
    }
}

pub fn write_lines(path: &str, lines: &[String]) -> std::io::Result<()> {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(path, content)
}

/// Writes `{basename}_subdomains.txt` and, when extraction ran,
/// `{basename}_urls.txt`. Called for interrupted runs too, so partial
/// discoveries survive a Ctrl-C.
pub fn persist_report(
    report: &ScanReport,
    basename: &str,
    extract_urls: bool,
) -> std::io::Result<()> {
    let subdomains_path = format!("{}_subdomains.txt", basename);
    write_lines(&subdomains_path, &report.subdomains)?;
    println!(
        "{} Subdomains saved to {}",
        info_tag(),
        subdomains_path.bright_white()
    );

    if extract_urls {
        let urls_path = format!("{}_urls.txt", basename);
        write_lines(&urls_path, &report.urls)?;
        println!("{} URLs saved to {}", info_tag(), urls_path.bright_white());
    }
    Ok(())
}

pub async fn handle_scan(args: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let domain = args.get_one::<String>("domain").unwrap();
    let wordlist_path = args.get_one::<PathBuf>("wordlist").unwrap();
    let extract_urls = args.get_flag("extract-urls");
    let external_only = args.get_flag("external-only");
    let batch_size = *args.get_one::<usize>("batch-size").unwrap();
    let timeout = *args.get_one::<u64>("timeout").unwrap();
    let output_basename = resolve_output_basename(args.get_one::<String>("output"), domain);

    println!("{} Loading wordlist at {}", info_tag(), local_timestamp());
    let candidates = match load_wordlist(wordlist_path).await {
        Ok(candidates) => candidates,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };
    println!(
        "{} {} candidate labels loaded",
        info_tag(),
        candidates.len().to_string().cyan()
    );
    println!(
        "{} Started subdomain enumeration against {} at {}\n",
        info_tag(),
        domain.bright_white(),
        local_timestamp()
    );

    let progress = ProgressBar::new(candidates.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} probes")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut enumerator = Enumerator::with_timeout(domain, timeout).with_batch_size(batch_size);
    if extract_urls {
        enumerator = enumerator.with_url_extraction(external_only);
    }

    let live_bar = progress.clone();
    enumerator = enumerator.with_subdomain_callback(Arc::new(move |url: &str| {
        live_bar.println(format!("{} {}", "[ live ]".green().bold(), url.green()));
    }));
    if extract_urls {
        let url_bar = progress.clone();
        enumerator = enumerator.with_url_callback(Arc::new(move |url: &str| {
            url_bar.println(format!("\t{}", url));
        }));
    }
    let tick_bar = progress.clone();
    enumerator = enumerator.with_progress_callback(Arc::new(move |_label: &str| {
        tick_bar.inc(1);
    }));

    // Ctrl-C stops dispatching further batches; the batch in flight
    // drains and partial results still get reported and saved.
    let cancel = enumerator.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!(
                "\n{} Interrupt received, finishing current batch",
                "[ info ]".yellow()
            );
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let report = enumerator.run(&candidates).await;
    progress.finish_and_clear();

    if report.interrupted {
        println!(
            "\n{} Scan interrupted; partial results follow",
            "[ info ]".yellow()
        );
    }
    println!(
        "\n{} Scan took {:.2}s, found {} subdomains",
        info_tag(),
        report.elapsed.as_secs_f64(),
        report.subdomains.len().to_string().green().bold()
    );
    if extract_urls {
        println!(
            "{} Collected {} outbound URLs",
            info_tag(),
            report.urls.len().to_string().green()
        );
    }

    if let Some(basename) = output_basename
        && let Err(e) = persist_report(&report, &basename, extract_urls)
    {
        eprintln!("{} Failed to save results: {}", "✗".red().bold(), e);
    }

    println!("{} Enumeration completed at {}", info_tag(), local_timestamp());
}
