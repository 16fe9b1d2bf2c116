//! Writers for generated artifacts.

use std::io::Write;

use anyhow::anyhow;

use crate::client::{CliError, CliResult};

/// Write `text` in one piece and flush.
pub(crate) fn write_output<W: Write>(out: &mut W, text: &str) -> CliResult<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|err| CliError::failure(anyhow!("failed to write output: {err}")))
}
