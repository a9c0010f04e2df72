use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;
use tablonaute_i18n::applier::{PLACEHOLDER_ATTR, TEXT_ATTR, TITLE_ATTR};
use tablonaute_i18n::{
    CatalogSource, Document, FileCatalogSource, FileStore, HttpCatalogSource, Localizer,
    LocalizerConfig, normalize_locale,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    // Global options are propagated into the subcommand's matches
    let globals = matches.subcommand().map(|(_, sub)| sub).unwrap_or(&matches);

    let config = match globals.get_one::<String>("config") {
        Some(path) => LocalizerConfig::from_file(&PathBuf::from(path))?,
        None => LocalizerConfig::default(),
    };
    let store_path = globals
        .get_one::<String>("store")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".tablonaute-prefs.json"));
    let source = catalog_source(globals, &config)?;

    let mut localizer = Localizer::new(config, FileStore::new(store_path))?;
    let mut doc = demo_page(&matches, &localizer.config().selector_id);
    localizer.init(&*source, &mut doc).await;

    match matches.subcommand() {
        Some(("lookup", sub)) => {
            let keys = sub.get_many::<String>("keys").into_iter().flatten();
            for key in keys {
                println!("{}\t{}", key, localizer.t(key));
            }
        }
        Some(("current", _)) => {
            println!(
                "{} ({})",
                localizer.current_language(),
                localizer.direction()
            );
        }
        Some(("set", sub)) => {
            let requested = sub
                .get_one::<String>("code")
                .map(|code| normalize_locale(code))
                .unwrap_or_default();
            if localizer.set_language(&requested, &mut doc) {
                println!("Language set to {}", localizer.current_language());
            } else {
                println!(
                    "'{}' is not a supported language, keeping {}",
                    requested,
                    localizer.current_language()
                );
            }
        }
        Some(("locales", _)) => {
            let codes: Vec<String> = localizer.locales().iter().map(str::to_string).collect();
            for code in codes {
                let marker = if code == localizer.current_language() {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}\t{}\t{}",
                    marker,
                    code,
                    localizer.locales().direction(&code),
                    localizer.display_name(&code)
                );
            }
        }
        Some(("render", _)) => {
            print!("{}", doc.render());
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

fn cli() -> Command {
    Command::new("tablonaute-i18n")
        .version("0.1.0")
        .about("Resolve, switch and preview Tablonaute page translations")
        .subcommand_required(true)
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .short('c')
                .global(true)
                .help("Catalog file path or site base URL (default: TABLONAUTE_BASE_URL)"),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .short('s')
                .global(true)
                .help("Preference file (default: .tablonaute-prefs.json)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("TOML configuration file"),
        )
        .subcommand(
            Command::new("lookup")
                .about("Translate keys for the current language")
                .arg(Arg::new("keys").required(true).num_args(1..)),
        )
        .subcommand(Command::new("current").about("Show the current language"))
        .subcommand(
            Command::new("set")
                .about("Switch and persist the language")
                .arg(Arg::new("code").required(true).index(1)),
        )
        .subcommand(Command::new("locales").about("List supported languages"))
        .subcommand(
            Command::new("render")
                .about("Translate a demo page and print it")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .short('p')
                        .help("Page identifier for the <title data-page> element")
                        .default_value("home"),
                )
                .arg(
                    Arg::new("keys")
                        .long("key")
                        .short('k')
                        .num_args(1..)
                        .help("Keys to place in data-i18n paragraphs"),
                ),
        )
}

fn catalog_source(
    matches: &ArgMatches,
    config: &LocalizerConfig,
) -> Result<Box<dyn CatalogSource>, Box<dyn std::error::Error>> {
    let source: Box<dyn CatalogSource> = match matches.get_one::<String>("catalog") {
        Some(location) if location.starts_with("http://") || location.starts_with("https://") => {
            Box::new(HttpCatalogSource::with_options(
                location,
                &config.catalog_path,
                config.fetch_timeout(),
            )?)
        }
        Some(location) => Box::new(FileCatalogSource::new(location)),
        None => Box::new(HttpCatalogSource::from_env()?),
    };
    Ok(source)
}

/// Page used by `render`, and a harmless target for the other subcommands
fn demo_page(matches: &ArgMatches, selector_id: &str) -> Document {
    let mut doc = Document::new();
    let render = matches.subcommand_matches("render");
    let page = render
        .and_then(|sub| sub.get_one::<String>("page"))
        .map(String::as_str)
        .unwrap_or("home");

    let head = doc.head();
    doc.append_element(head, "title", &[("data-page", page)]);

    let body = doc.body();
    let header = doc.append_element(body, "header", &[]);
    doc.append_element(header, "select", &[("id", selector_id)]);
    doc.append_element(body, "input", &[(PLACEHOLDER_ATTR, "search_placeholder")]);
    doc.append_element(body, "button", &[(TITLE_ATTR, "close")]);

    let keys = render
        .and_then(|sub| sub.get_many::<String>("keys"))
        .into_iter()
        .flatten();
    for key in keys {
        doc.append_element(body, "p", &[(TEXT_ATTR, key.as_str())]);
    }
    doc
}
