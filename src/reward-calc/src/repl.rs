//! Prompt loop: read a line, run the matching session action, print the
//! outcome. Every failure is reported inline and the loop carries on.

use crate::command::{Command, HELP};
use crate::render;
use reward_loyalty::CalculatorSession;
use reward_store::KeyValueStore;
use std::io::{self, BufRead, Write};
use tracing::debug;

pub enum Flow {
    Continue(String),
    Quit,
}

pub fn execute<S: KeyValueStore>(session: &mut CalculatorSession<S>, command: Command) -> Flow {
    debug!(?command, "Executing command");
    let output = match command {
        Command::Help => HELP.to_string(),
        Command::Show => render::config(session),
        Command::ToggleEdit => {
            if session.toggle_edit() {
                "Editing enabled; use 'set <field> <value>', then 'save'".to_string()
            } else {
                format!("Saved.\n{}", render::config(session))
            }
        }
        Command::Set { field, raw } => match session.edit_field(field, raw) {
            Ok(outcome) => render::edit(field, &outcome),
            Err(e) => e.to_string(),
        },
        Command::Spend { channel, raw } => {
            let amount = session.set_spend(channel, &raw);
            format!("{} spend: {}", channel.label(), render::money(amount))
        }
        Command::Calculate => match session.calculate_points() {
            Ok(result) => render::calculation(result),
            Err(e) => format!("Cannot calculate points: {e}"),
        },
        Command::MinimumSpend => match session.calculate_minimum_spend() {
            Ok(outcome) => render::minimum_spend(&outcome),
            Err(e) => format!("Cannot calculate minimum spend: {e}"),
        },
        Command::Clear => {
            session.clear();
            "Spend and results cleared".to_string()
        }
        Command::Reset => {
            session.reset_config();
            format!("Configuration reset to defaults.\n{}", render::config(session))
        }
        Command::Quit => return Flow::Quit,
    };
    Flow::Continue(output)
}

pub fn run<S, R, W>(session: &mut CalculatorSession<S>, input: R, out: &mut W) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Reward Points Calculator\n{}", render::config(session))?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let output = match line.parse::<Command>() {
            Ok(command) => match execute(session, command) {
                Flow::Continue(text) => text,
                Flow::Quit => break,
            },
            Err(e) => e.to_string(),
        };
        writeln!(out, "{output}")?;
    }
    writeln!(out)?;
    Ok(())
}
