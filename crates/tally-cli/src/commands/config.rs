//! Config command for printing the effective configuration.

use std::io::Write;

use anyhow::Result;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, config)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_command_prints_json() {
        let mut out = Vec::new();
        run(&mut out, &Config::default()).unwrap();
        let parsed: Config = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
