//! cyr2lat - Cyrillic/Georgian to Latin slug converter

use cyr2lat::config::load_config;
use cyr2lat::{Context, JsonOptionStore, MergeMode, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "\
Usage: cyr2lat [OPTIONS] <TEXT>...

Options:
  -l, --locale <LOCALE>    table locale (iso9, bg_BG, uk, ka_GE, ...)
  -c, --context <CONTEXT>  title (default), file, query, term
  -s, --settings <PATH>    JSON settings record with table overrides
      --no-translit        skip residual Unicode -> ASCII folding
      --keep-case          do not lowercase title slugs
      --per-key            lay stored overrides over the built-in table
      --table              print the effective table as JSON
  -h, --help               show this help";

/// Parsed command line
struct Flags {
    locale: Option<String>,
    context: Context,
    settings: Option<PathBuf>,
    no_translit: bool,
    keep_case: bool,
    per_key: bool,
    print_table: bool,
    text: Vec<String>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let context: Option<String> = args.opt_value_from_str(["-c", "--context"])?;
    Ok(Some(Flags {
        locale: args.opt_value_from_str(["-l", "--locale"])?,
        context: context.as_deref().map(Context::parse).unwrap_or_default(),
        settings: args.opt_value_from_str(["-s", "--settings"])?,
        no_translit: args.contains("--no-translit"),
        keep_case: args.contains("--keep-case"),
        per_key: args.contains("--per-key"),
        print_table: args.contains("--table"),
        text: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    }))
}

fn main() -> ExitCode {
    // warn/error only unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let mut config = load_config();
    if let Some(locale) = flags.locale {
        config.locale = locale;
    }
    if let Some(path) = flags.settings {
        config.settings_path = Some(path);
    }
    if flags.no_translit {
        config.transliterate = false;
    }
    if flags.keep_case {
        config.lowercase_titles = false;
    }
    if flags.per_key {
        config.merge_mode = MergeMode::PerKey;
    }

    let mut sanitizer = config.sanitizer();
    if let Some(path) = &config.settings_path {
        match JsonOptionStore::open(path) {
            Ok(store) => sanitizer = sanitizer.with_store(Arc::new(Settings::new(store))),
            Err(e) => {
                log::error!("failed to open settings {}: {}", path.display(), e);
                eprintln!("cannot read settings {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
    }
    let service = config.service(sanitizer);

    if flags.print_table {
        let table = service.sanitizer().effective_table(service.locale());
        return match serde_json::to_string_pretty(&table) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("cannot serialize table: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if flags.text.is_empty() {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    let text = flags.text.join(" ");
    let slug = match flags.context {
        Context::FileName => service.sanitize_file_name(&text, &text),
        ctx => service.sanitize_title(&text, &text, ctx.as_str()),
    };
    println!("{}", slug);
    ExitCode::SUCCESS
}
