//! `log` facade backed by `log4rs`.
//!
//! Filtering is a whitelist: the root logger is off, this crate logs at the requested level, and
//! dependencies are opted in with `<crate>=<level>` or all at once with `root=<level>`.

mod consts;

pub use consts::*;

use crate::foundation::LendsafeError;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use log4rs::Config;
use std::io::IsTerminal;
use std::path::Path;

const STDERR: &str = "stderr";
const MAIN_FILE: &str = "main_file";
const WARN_FILE: &str = "warn_file";

/// Parsed form of a filter expression such as `"info,alloy=debug,root=warn"`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct LogFilters {
    app: LevelFilter,
    root: LevelFilter,
    modules: Vec<(String, LevelFilter)>,
}

impl LogFilters {
    fn parse(expr: &str) -> Self {
        let mut filters = Self { app: LevelFilter::Info, root: LevelFilter::Off, modules: Vec::new() };
        let mut app_set = false;
        for part in expr.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            match part.split_once('=') {
                None => {
                    if let (false, Ok(level)) = (app_set, part.parse()) {
                        filters.app = level;
                        app_set = true;
                    }
                }
                Some((target, level)) => {
                    let Ok(level) = level.trim().parse() else { continue };
                    match target.trim() {
                        "" => {}
                        "root" => filters.root = level,
                        target => filters.modules.push((target.to_string(), level)),
                    }
                }
            }
        }
        filters
    }

    fn overrides(&self, target: &str) -> bool {
        self.modules.iter().any(|(module, _)| module == target)
    }
}

/// Installs the global logger. `log_dir` adds a rolling file plus a warn-and-above file; later calls are no-ops.
pub fn init_logger(log_dir: Option<&str>, filters: &str) -> Result<(), LendsafeError> {
    let config = build_config(log_dir, filters)?;
    if log4rs::init_config(config).is_err() {
        log::debug!("logger already installed; keeping existing configuration");
    }
    Ok(())
}

fn build_config(log_dir: Option<&str>, filters: &str) -> Result<Config, LendsafeError> {
    let filters = LogFilters::parse(filters);
    let pattern = if std::io::stderr().is_terminal() { LOG_LINE_PATTERN_COLORED } else { LOG_LINE_PATTERN };
    let stderr = ConsoleAppender::builder().target(Target::Stderr).encoder(Box::new(PatternEncoder::new(pattern))).build();

    let mut builder = Config::builder().appender(Appender::builder().build(STDERR, Box::new(stderr)));
    let mut outputs = vec![STDERR.to_string()];

    if let Some(dir) = log_dir.map(str::trim).filter(|dir| !dir.is_empty()).map(Path::new) {
        builder = builder
            .appender(Appender::builder().build(MAIN_FILE, Box::new(rolling_appender(dir, LOG_FILE_NAME)?)))
            .appender(
                Appender::builder()
                    .filter(Box::new(ThresholdFilter::new(LevelFilter::Warn)))
                    .build(WARN_FILE, Box::new(rolling_appender(dir, ERR_LOG_FILE_NAME)?)),
            );
        outputs.push(MAIN_FILE.to_string());
        outputs.push(WARN_FILE.to_string());
    }

    let whitelisted = WHITELISTED_CRATES.iter().filter(|name| !filters.overrides(name)).map(|name| (name.to_string(), filters.app));
    for (target, level) in whitelisted.chain(filters.modules.iter().cloned()) {
        builder = builder.logger(Logger::builder().appenders(outputs.clone()).additive(false).build(target, level));
    }

    builder
        .build(Root::builder().appenders(outputs).build(filters.root))
        .map_err(|err| LendsafeError::ConfigError(format!("logger config: {err}")))
}

fn rolling_appender(dir: &Path, file_name: &str) -> Result<RollingFileAppender, LendsafeError> {
    let archive = dir.join(format!("{file_name}.{{}}.gz"));
    let archive = archive
        .to_str()
        .ok_or_else(|| LendsafeError::ConfigError(format!("log dir is not valid utf-8: {}", dir.display())))?;
    let roller = FixedWindowRoller::builder()
        .base(1)
        .build(archive, LOG_FILE_MAX_ROLLS)
        .map_err(|err| LendsafeError::ConfigError(format!("log roller: {err}")))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(LOG_FILE_MAX_SIZE)), Box::new(roller));

    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN)))
        .build(dir.join(file_name), Box::new(policy))
        .map_err(|err| LendsafeError::ConfigError(format!("log file appender: {err}")))
}
