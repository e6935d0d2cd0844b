use log::{LevelFilter, Log, Metadata, Record};

/// Writes every record to stderr as `[level][target][file:line] message`.
/// Stdout is left to program output.
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => format!("{}:{}", file, line),
            (Some(file), None) => file.to_string(),
            (None, _) => String::from("unknown location"),
        };

        eprintln!(
            "[{level}][{target}][{location}] {message}",
            level = record.level(),
            target = record.target(),
            location = location,
            message = record.args()
        );
    }

    fn flush(&self) {}
}

/// Install the logger. Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    static LOGGER: SimpleLogger = SimpleLogger;
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
