use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Analysis configuration.
///
/// Every field has a default, so an empty file (or no file at all) is valid.
/// See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// How the input table is parsed.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// First record holds column names.
    pub has_headers: bool,
    /// Field delimiter (single ASCII character).
    pub delimiter: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: ",".to_string(),
        }
    }
}

impl InputConfig {
    /// Delimiter as the byte expected by the CSV reader.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            &[byte] if byte.is_ascii() => Ok(byte),
            _ => bail!(
                "delimiter must be a single ASCII character, but is {:?}",
                self.delimiter
            ),
        }
    }
}

/// What gets written to the output directory.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Write one chart per order.
    pub plots: bool,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plots: true,
            width: 800,
            height: 600,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.input
            .delimiter_byte()
            .context("invalid input delimiter")?;

        check_num(self.output.width, 100..=4000).context("invalid plot width")?;
        check_num(self.output.height, 100..=4000).context("invalid plot height")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<Config> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections() {
        let config = parse("[input]\ndelimiter = \";\"\n[output]\nplots = false\n").unwrap();
        assert!(config.input.has_headers);
        assert_eq!(config.input.delimiter_byte().unwrap(), b';');
        assert!(!config.output.plots);
        assert_eq!(config.output.width, 800);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(parse("[input]\ndelimiter = \";;\"\n").is_err());
        assert!(parse("[input]\ndelimiter = \"\"\n").is_err());
        assert!(parse("[output]\nwidth = 10\n").is_err());
        assert!(parse("[output]\ncolour = \"red\"\n").is_err());
    }
}
