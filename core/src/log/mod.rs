mod builder;
mod consts;

use consts::*;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use std::iter::once;

pub use log::{Level, LevelFilter};

/// Initializes the global logger with a console appender and, when `log_dir` is given, a
/// same-pattern file appender alongside it. `filters` is a `RUST_LOG`-style per-module
/// spec (e.g. `"chainview=debug,chainview_hashes=warn"`), parsed the same way `RUST_LOG`
/// itself is parsed so operators can reuse the same mental model in config files.
pub fn init_logger(log_dir: Option<&str>, filters: &str) {
    const CONSOLE_APPENDER: &str = "stdout";
    const FILE_APPENDER: &str = "log_file";

    let loggers = builder::Builder::new().root_level(LevelFilter::Info).parse_env(DEFAULT_LOGGER_ENV).parse_expression(filters).build();

    let stdout = Appender::builder().build(CONSOLE_APPENDER, Box::new(console_appender()));
    let file = log_dir.map(|dir| Appender::builder().build(FILE_APPENDER, Box::new(file_appender(dir))));

    let appender_names = once(CONSOLE_APPENDER).chain(file.as_ref().map(|_| FILE_APPENDER));

    let mut builder = Config::builder().appender(stdout);
    if let Some(file) = file {
        builder = builder.appender(file);
    }

    let config = builder
        .loggers(loggers.items())
        .build(Root::builder().appenders(appender_names).build(loggers.root_level()))
        .expect("logger configuration is internally consistent");

    let _ = log4rs::init_config(config);
}

/// Tries to init the global logger without panicking if one is already installed.
/// Intended for test harnesses, where many tests may attempt to init concurrently.
pub fn try_init_logger(filters: &str) {
    const CONSOLE_APPENDER: &str = "stdout";

    let loggers = builder::Builder::new().root_level(LevelFilter::Info).parse_env(DEFAULT_LOGGER_ENV).parse_expression(filters).build();
    let config = Config::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console_appender())))
        .loggers(loggers.items())
        .build(Root::builder().appender(CONSOLE_APPENDER).build(loggers.root_level()))
        .expect("logger configuration is internally consistent");
    let _ = log4rs::init_config(config);
}

fn console_appender() -> ConsoleAppender {
    ConsoleAppender::builder().encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN_COLORED))).build()
}

fn file_appender(log_dir: &str) -> log4rs::append::file::FileAppender {
    let path = std::path::Path::new(log_dir).join(LOG_FILE_NAME);
    log4rs::append::file::FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN)))
        .build(path)
        .expect("log directory is writable")
}
