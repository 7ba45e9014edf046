//! # Commands
//!
//! One module per command group. Each handler is synchronous: it reads and
//! mutates the session's state, writes to the console, and leaves
//! persistence to the snapshot writer running in the background.

use std::io::{BufRead, Write};

use crate::cli::Command;
use crate::console::Console;
use crate::error::CliResult;
use crate::session::Session;

pub mod dashboard;
pub mod export;
pub mod product;
pub mod sale;
pub mod store;

/// Runs one parsed command.
pub fn execute<R: BufRead, W: Write>(
    command: Command,
    session: &mut Session,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    match command {
        Command::Stores(command) => store::execute(command, session, console),
        Command::Products(command) => product::execute(command, session, console),
        Command::Sales(command) => sale::execute(command, session, console),
        Command::Dashboard => dashboard::execute(session, console),
        Command::Export => export::execute(session, console),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;

    use crate::config::AppConfig;
    use crate::console::Console;
    use crate::session::Session;

    pub type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    pub async fn session() -> Session {
        Session::in_memory(AppConfig::default()).await.unwrap()
    }

    /// Console whose stdin holds `input`.
    pub fn console(input: &str) -> TestConsole {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    pub fn output(console: TestConsole) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }
}
