//! JSON export of the whole snapshot.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::CliResult;
use crate::session::Session;

pub fn execute<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    let json = serde_json::to_string_pretty(&session.state.snapshot())?;
    console.line(json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{console, output, session};
    use stocktally_core::Snapshot;

    #[tokio::test]
    async fn test_export_is_the_snapshot() {
        let mut session = session().await;
        session.state.add_store("Airport");
        let mut out = console("");

        execute(&session, &mut out).unwrap();

        let text = output(out);
        let parsed: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, session.state.snapshot());
        assert!(text.contains("\"selectedStoreId\""));
    }
}
