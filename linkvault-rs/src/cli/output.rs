//! Output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::error::Result;
use serde::Serialize;

/// Formats and prints command results.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Render a value in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Toml => toml::to_string_pretty(value)?,
        })
    }

    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    /// Print one record per line; JSON is emitted compact.
    pub fn print_line<T: Serialize>(&self, value: &T) -> Result<()> {
        let line = match self.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            _ => self.render(value)?,
        };
        println!("{}", line);
        Ok(())
    }

    /// Print a status message to stderr unless quiet.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        count: usize,
    }

    fn sample() -> Sample {
        Sample {
            name: "rust".to_string(),
            count: 2,
        }
    }

    #[test]
    fn test_render_formats() {
        let json = Output::new(OutputFormat::Json, false).render(&sample()).unwrap();
        assert!(json.contains("\"name\": \"rust\""));

        let yaml = Output::new(OutputFormat::Yaml, false).render(&sample()).unwrap();
        assert!(yaml.contains("name: rust"));

        let toml = Output::new(OutputFormat::Toml, false).render(&sample()).unwrap();
        assert!(toml.contains("count = 2"));
    }
}
