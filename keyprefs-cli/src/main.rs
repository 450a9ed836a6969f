mod settings;

use std::error::Error;
use std::fs::File;
use std::process::ExitCode;

use keyprefs_core::config::{self, Config};
use keyprefs_core::palette;
use keyprefs_core::{PreferenceSet, SqliteStore};
use keyprefs_types::ChromaTheme;

const USAGE: &str = "usage: keyprefs [-v|--verbose] <command>

commands:
  show                     print every preference
  get <name>               print one preference
  set <name> <value>       change one preference and save
  reset                    save the defaults
  palette [theme]          print the key swatches of a theme
  key-codes [labels...]    print key codes, or set all 24 custom labels
  key-codes --clear        go back to the built-in key codes";

type CliResult = Result<(), Box<dyn Error>>;

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = config::config_dir().join("keyprefs.log");
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path)
        .or_else(|_| File::create(std::env::temp_dir().join("keyprefs.log")))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("keyprefs: logging disabled: {}", e);
            return;
        }
    };

    if let Err(e) = WriteLogger::init(log_level, simplelog::Config::default(), log_file) {
        eprintln!("keyprefs: logging disabled: {}", e);
        return;
    }

    log::info!("keyprefs starting (log level: {:?})", log_level);
}

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose_flag = args.iter().any(|a| a == "--verbose" || a == "-v");
    args.retain(|a| a != "--verbose" && a != "-v");

    let config = Config::load();
    init_logging(verbose_flag || config.verbose());
    for warning in config.warnings() {
        log::warn!(target: "config", "{}", warning);
        eprintln!("keyprefs: {}", warning);
    }

    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("keyprefs: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, args: &[String]) -> CliResult {
    let Some((command, rest)) = args.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let path = config.storage_path();
    log::debug!("preferences at {}", path.display());
    let mut store = SqliteStore::open(&path)?;
    let mut prefs = PreferenceSet::load(&store);

    match (command.as_str(), rest) {
        ("show", []) => {
            for name in settings::NAMES {
                if let Some(value) = settings::render(&prefs, name) {
                    println!("{} = {}", name, value);
                }
            }
        }
        ("get", [name]) => match settings::render(&prefs, name) {
            Some(value) => println!("{}", value),
            None => return Err(settings::SettingError::Unknown(name.clone()).into()),
        },
        ("set", [name, value]) => {
            settings::apply(&mut prefs, name, value)?;
            prefs.save(&mut store)?;
        }
        ("reset", []) => {
            PreferenceSet::default().save(&mut store)?;
            println!("preferences reset to defaults");
        }
        ("palette", []) => print_palette(&prefs, prefs.chromagram_theme())?,
        ("palette", [theme]) => {
            let theme = ChromaTheme::from_name(theme).ok_or_else(|| {
                let names: Vec<&str> = ChromaTheme::ALL.iter().map(|t| t.name()).collect();
                format!("unknown theme '{}' (one of {})", theme, names.join(", "))
            })?;
            print_palette(&prefs, theme)?;
        }
        ("key-codes", []) => {
            for (index, label) in prefs.key_codes().labels().enumerate() {
                println!("{:2}  {:<6} {}", index, label, prefs.tag_text(index)?);
            }
        }
        ("key-codes", args) => {
            settings::apply_key_codes(&mut prefs, args)?;
            prefs.save(&mut store)?;
        }
        _ => return Err(format!("unrecognised arguments\n\n{}", USAGE).into()),
    }
    Ok(())
}

fn print_palette(prefs: &PreferenceSet, theme: ChromaTheme) -> CliResult {
    let swatches = palette::key_palette(theme);
    let (low, high) = palette::anchors(theme);
    println!("theme {} (low {}, high {})", theme, low.to_hex(), high.to_hex());
    for (index, colour) in swatches.iter().enumerate() {
        println!(
            "{:2}  {:<6} {}",
            index,
            prefs.key_codes().label_for(index)?,
            colour.to_hex()
        );
    }
    Ok(())
}
