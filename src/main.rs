use clap::{crate_version, App, Arg};
use sitemapper::build::build_sitemap;
use sitemapper::config::Config;
use sitemapper::logging::setup_logging;
use std::error::Error;
use std::path::{Path, PathBuf};

fn main() {
    let matches = App::new("sitemapper")
        .version(crate_version!())
        .about("Generates sitemap.xml from the HTML pages beneath a directory")
        .arg(
            Arg::with_name("root")
                .help("The site directory to scan")
                .index(1)
                .default_value("."),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("A project file to use instead of <root>/sitemap.yaml"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Where to write the sitemap (relative to <root>)"),
        )
        .arg(
            Arg::with_name("base-url")
                .long("base-url")
                .takes_value(true)
                .help("The public URL of the site root"),
        )
        .get_matches();

    setup_logging("warn");

    let root = Path::new(matches.value_of("root").unwrap_or("."));
    if let Err(e) = run(
        root,
        matches.value_of("config").map(Path::new),
        matches.value_of("output").map(PathBuf::from),
        matches.value_of("base-url"),
    ) {
        eprintln!("Error generating sitemap: {}", e);
        std::process::exit(1);
    }
}

fn run(
    root: &Path,
    config_file: Option<&Path>,
    output: Option<PathBuf>,
    base_url: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let config = Config::load(root, config_file, output, base_url)?;

    println!("Scanning {} for HTML files...", root.display());
    let summary = build_sitemap(&config, root)?;
    println!("Sitemap generated: {}", summary.output.display());
    println!("Total URLs: {}", summary.report.total);
    println!();
    print!("{}", summary.report);
    Ok(())
}
