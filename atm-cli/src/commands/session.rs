//! Session command - the interactive ATM loop

use anyhow::Result;

use atm_core::MenuController;

use super::get_context;
use crate::terminal::ConsoleTerminal;

/// Run login/menu cycles until stdin closes or the ledger fails
pub fn run() -> Result<()> {
    let ctx = get_context()?;
    let mut terminal = ConsoleTerminal::new();

    match MenuController::new(&ctx, &mut terminal).run() {
        Err(e) if e.is_input_closed() => {
            println!();
            Ok(())
        }
        other => Ok(other?),
    }
}
