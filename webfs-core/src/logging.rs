//! src/logging.rs
//! ============================================================================
//! # Logging: Tracing Setup for the File Browser
//!
//! Daily rolling file appender plus a live stderr layer, both behind
//! `EnvFilter`. Events carry a monotonic sequence number so interleaved
//! async operations can be ordered when reading the log after the fact.

use std::{
    fs,
    path::Path,
    sync::OnceLock,
    sync::atomic::{AtomicUsize, Ordering},
};

use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, daily};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    prelude::*,
};

static SEQ: OnceLock<AtomicUsize> = OnceLock::new();

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`.
    pub fn init_tracing() {
        let log_dir: &Path = Path::new("logs");
        fs::create_dir_all(log_dir).expect("cannot create logs dir");

        SEQ.get_or_init(|| AtomicUsize::new(1));

        // daily rolling file appender -> logs/webfs-YYYY-MM-DD.log
        let file: RollingFileAppender = daily("logs", "webfs");

        let file_layer = fmt::layer()
            .event_format(SeqFormat)
            .with_writer(file)
            .with_ansi(false)
            .with_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()));

        // stderr layer for live debugging
        let stderr_layer = fmt::layer()
            .event_format(SeqFormat)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .init();
    }
}

/// Compact formatter: `SEQ LEVEL [file:line mod::path] message`
struct SeqFormat;

impl<S, N> FormatEvent<S, N> for SeqFormat
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let seq: usize = SEQ
            .get()
            .expect("SEQ not initialised")
            .fetch_add(1, Ordering::Relaxed);

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {:5} [{}:{} {}] ",
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}
