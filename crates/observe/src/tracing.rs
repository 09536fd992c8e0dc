use {
    crate::config::Config,
    std::{io::IsTerminal, panic::PanicHookInfo, sync::Once},
    time::macros::format_description,
    tracing::{Level, Metadata, level_filters::LevelFilter},
    tracing_subscriber::{
        EnvFilter,
        Layer,
        fmt::{time::UtcTime, writer::MakeWriterExt as _},
        prelude::*,
        util::SubscriberInitExt,
    },
};

/// Installs the global subscriber and routes panics through it. The env
/// filter has similar syntax to env_logger. It is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn initialize_with_config(config: &Config) {
    set_tracing_subscriber(config);
    std::panic::set_hook(Box::new(tracing_panic_hook));
}

/// Like [`initialize_with_config`], but can be called multiple times in a row. Later calls
/// are ignored.
///
/// Useful for tests.
pub fn initialize_reentrant(env_filter: &str) {
    // The subscriber is a global object, so installing a second one from
    // another test thread would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        set_tracing_subscriber(&Config::default().with_env_filter(env_filter));
        std::panic::set_hook(Box::new(tracing_panic_hook));
    });
}

fn set_tracing_subscriber(config: &Config) {
    let stderr_threshold = config.stderr_threshold;
    let writer = std::io::stderr
        .with_filter(move |meta: &Metadata<'_>| goes_to_stderr(*meta.level(), stderr_threshold))
        .or_else(std::io::stdout);
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_timer(timer);
    let fmt_layer = if config.use_json_format {
        fmt_layer.json().boxed()
    } else {
        fmt_layer
            .with_ansi(std::io::stdout().is_terminal())
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::new(&config.env_filter)))
        .init();
}

fn goes_to_stderr(level: Level, stderr_threshold: LevelFilter) -> bool {
    level <= stderr_threshold
}

/// Panic hook that prints roughly the same message as the default panic hook
/// but uses tracing:error instead of stderr.
fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    let backtrace = std::backtrace::Backtrace::capture();
    tracing::error!("thread '{name}' {panic}\nstack backtrace:\n{backtrace}");
}
