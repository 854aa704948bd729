// Colored `LEVEL > message` output on top of env_logger, modelled after pretty_env_logger.

use env_logger::{
    fmt::{Color, Style, StyledValue},
    Builder, Env,
};
use log::Level;

/// Install the logger. `RUST_LOG` overrides `level`.
pub fn init(level: &str) {
    let env = Env::default().filter_or("RUST_LOG", level);

    Builder::from_env(env)
        .format(|buf, record| {
            use std::io::Write;

            let mut style = buf.style();
            let level = colored_level(&mut style, record.level());

            let text = record.args().to_string();
            let mut lines = text.lines();
            let first = lines.next().unwrap_or_default();

            if record.level() > Level::Info {
                writeln!(buf, "{level} {} > {first}", record.target())?;
            } else {
                writeln!(buf, "{level} > {first}")?;
            }

            // 5 (level) + 3 (" > ")
            for line in lines {
                writeln!(buf, "{:8}{line}", "")?;
            }

            Ok(())
        })
        .init();
}

fn colored_level(style: &'_ mut Style, level: Level) -> StyledValue<'_, &'static str> {
    match level {
        Level::Trace => style.set_color(Color::Magenta).value("TRACE"),
        Level::Debug => style.set_color(Color::Blue).value("DEBUG"),
        Level::Info => style.set_color(Color::Green).value("INFO "),
        Level::Warn => style.set_color(Color::Yellow).set_bold(true).value("WARN "),
        Level::Error => style.set_color(Color::Red).set_bold(true).value("ERROR"),
    }
}
