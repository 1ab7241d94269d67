use log::LevelFilter;
use env_logger::Builder;
use std::io::Write;
use chrono::Local;

// HTML parsing and HTTP internals are chatty at debug level.
const QUIET_TARGETS: [&str; 4] = ["html5ever", "selectors", "reqwest", "hyper"];

/// Console progress for a run: `{time} [{level}] - {message}`.
/// Info by default; `RUST_LOG` takes precedence.
pub fn init() {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info);

    for target in QUIET_TARGETS {
        builder.filter(Some(target), LevelFilter::Warn);
    }

    builder.parse_default_env().init();
}
