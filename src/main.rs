use clap::Parser;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use env_logger::Env;
use log::error;
use rust_waf_hunter::cli::Args;
use rust_waf_hunter::http::Fetcher;
use rust_waf_hunter::matcher::Matcher;
use rust_waf_hunter::ranker::Ranker;
use rust_waf_hunter::recon::SiteInfo;
use rust_waf_hunter::report::Report;
use rust_waf_hunter::signatures::SignatureCatalog;
use rust_waf_hunter::utils::validate_url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // The catalog is loaded exactly once; everything downstream borrows it.
    let catalog = match SignatureCatalog::load(&args.signatures) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load signature catalog: {}", e);
            eprintln!("{} {}", "ERROR:".red().bold(), e);
            return Ok(());
        }
    };

    if args.list {
        list_wafs(&catalog);
        return Ok(());
    }

    let url_arg = match &args.url {
        Some(u) => u.clone(),
        None => {
            eprintln!("{} URL is required. Use -h for help.", "[!]".red());
            return Ok(());
        }
    };

    let target = match validate_url(&url_arg) {
        Some(u) => u,
        None => {
            eprintln!("{} Invalid URL format.", "[!]".red());
            return Ok(());
        }
    };

    println!("{}", r#"
  WAF Hunter: Passive WAF Fingerprinting (Rust Edition)
    "#.cyan().bold());

    let fetcher = match Fetcher::new(args.proxy.as_deref(), args.timeout) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {:#}", e);
            eprintln!("{} {:#}", "ERROR:".red().bold(), e);
            return Ok(());
        }
    };

    println!("{} Fetching {}...", "[~]".blue(), target);
    let response = match fetcher.fetch(target.as_str()).await {
        Ok(r) => r,
        Err(e) => {
            error!("Fetch failed: {:#}", e);
            eprintln!("{} Error fetching URL: {:#}", "[!]".red(), e);
            return Ok(());
        }
    };

    println!("{} Analyzing response for WAF signatures...", "[~]".blue());
    let matcher = Matcher::new()?;
    let outcome = matcher.analyze(&response, &catalog);

    println!("{} Ranking WAFs based on similarity scores...", "[~]".blue());
    let ranked = Ranker::rank(&outcome.fingerprint_keys(), &catalog);

    println!("{} Extracting website information...", "[~]".blue());
    let site = SiteInfo::gather(&target, &response).await;

    let report = Report::assemble(&outcome, ranked, Some(site));
    report.print();

    if !report.ranked.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Rank", "WAF", "Confidence"]);
        for (i, (waf, score)) in report.ranked.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                waf.clone(),
                format!("{}%", score),
            ]);
        }
        println!("{table}");
    }

    if let Some(output_path) = &args.output {
        match report.write_to_file(output_path) {
            Ok(()) => println!("{} Output saved to {}", "[~]".blue(), output_path),
            Err(e) => {
                // The report was already printed; the write failure is not fatal.
                error!("Failed to write report: {:#}", e);
                eprintln!("{} Error writing to file: {:#}", "[!]".red(), e);
            }
        }
    }

    Ok(())
}

fn list_wafs(catalog: &SignatureCatalog) {
    println!("{} Listing all WAFs...", "[~]".blue());
    for waf in catalog.names() {
        println!("    {} {}", "[+]".green(), waf);
    }
}
