use crate::auth::{Notice, NoticeKind};
use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use std::io::Write;
use tokio::io::{self, AsyncBufReadExt, BufReader};

/// Reads one line from stdin after printing `label` on stderr. The trailing
/// newline is dropped; the rest of the line is kept as typed.
pub async fn prompt_secret(label: &str) -> Result<SecretString> {
    eprint!("{label}: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    BufReader::new(io::stdin())
        .read_line(&mut line)
        .await
        .with_context(|| format!("failed to read {label} from stdin"))?;

    let value = line.trim_end_matches(['\r', '\n']).to_string();
    Ok(SecretString::from(value))
}

/// Writes the form's display region. An error notice becomes the command's
/// error so the process exits non-zero.
pub fn report<W: Write>(out: &mut W, notice: Option<&Notice>) -> Result<()> {
    match notice {
        Some(notice) if notice.kind == NoticeKind::Error => bail!("{}", notice.message),
        Some(notice) => {
            writeln!(out, "{}", notice.message)?;
            Ok(())
        }
        None => Ok(()),
    }
}
