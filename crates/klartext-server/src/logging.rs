use std::io::Write;

/// Initialise `env_logger`.
///
/// `level` takes any `RUST_LOG` style filter and wins over `debug`.
pub fn init_logging(debug: bool, level: Option<&str>) {
    let filter = level.unwrap_or(if debug { "debug" } else { "info" });

    env_logger::Builder::new()
        .parse_filters(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
