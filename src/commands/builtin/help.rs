//! `help`: list the registered commands.

use std::io::Write;

use async_trait::async_trait;

use super::{BuiltinCommand, CommandContext};

/// Width of the command-name column.
const NAME_WIDTH: usize = 16;

pub struct Help;

#[async_trait]
impl BuiltinCommand for Help {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()> {
        writeln!(out, "~ Available commands are:")?;
        writeln!(out, "~ ~~~~~~~~~~~~~~~~~~~~~~~")?;
        for (name, help) in ctx.registry.help_entries() {
            match help {
                Some(text) => writeln!(out, "~ {:<width$} {}", name, text, width = NAME_WIDTH)?,
                None => writeln!(out, "~ {}", name)?,
            }
        }
        writeln!(out, "~")?;
        Ok(())
    }
}
