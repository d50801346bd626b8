//! stderr logging
//!
//! `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug
//! output from this crate when `--verbose` is passed.

use log::LevelFilter;

pub fn init(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();

    match std::env::var("RUST_LOG") {
        Ok(filters) if !filters.trim().is_empty() => {
            builder.parse_filters(&filters);
        }
        _ => {
            builder.filter_level(LevelFilter::Warn);
            if verbose {
                builder.filter_module("browser_dispatcher", LevelFilter::Debug);
            }
        }
    }

    // a logger may already be installed (tests, repeated calls)
    let _ = builder.try_init();
}
