#![allow(dead_code)]

mod commands;
mod components;

use slate::config::SlateConfig;
use slate::core;
use slate::core::list::TaskList;
#[allow(unused_imports)]
use slate::store::{self, TaskStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SlateConfig::load();

    // Set up logging to the systemd user journal (`journalctl --user -t slate -f`).
    // Wrapper filters: slate crate at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("slate") || target.starts_with("commands") || target.starts_with("components") {
                    let max = if slate::debug_logging() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        slate::set_debug_logging(config.debug_logging);

        // Outside a systemd session there is no journal; run unlogged.
        if let Ok(journal) = systemd_journal_logger::JournalLog::new() {
            let journal = journal.with_syslog_identifier("slate".to_string());
            if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
                // Global max must be Debug so slate debug logs can pass through when toggled
                log::set_max_level(log::LevelFilter::Debug);
            }
        }
    }

    if let Err(e) = config.ensure_files() {
        log::error!("Failed to create data directory: {}", e);
    }

    let store = TaskStore::open(&config);
    // A store that cannot be read at all is escalated, not hidden.
    let mut list = TaskList::load(store)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(commands::run(&mut list, &args))
}
