use anyhow::{Result, anyhow};
use derivative::Derivative;
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(Derivative)]
#[derivative(Default(new = "true"))]
pub struct Logger {
    pub verbose: bool,
    pub json: bool,
    pub enable: bool,
}

impl Logger {
    fn level(&self) -> LevelFilter {
        if !self.enable {
            LevelFilter::OFF
        } else if self.verbose {
            LevelFilter::from_level(Level::DEBUG)
        } else {
            LevelFilter::from_level(Level::INFO)
        }
    }

    /// Build the filter, `RUST_LOG` directives win over the flags.
    fn filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level().into())
            .from_env_lossy()
    }

    /// Init the global subscriber, logs go to stderr so stdout stays clean for output.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a global subscriber is already set.
    pub fn init(&self) -> Result<()> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter())
            .with_writer(std::io::stderr)
            .with_file(self.verbose)
            .with_line_number(self.verbose);
        if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        }
        .map_err(|e| anyhow!(e))
    }
}
