//! Shell completions command - Generate shell completion scripts
//!
//! - bash: Add to ~/.bashrc or ~/.bash_completion
//! - zsh: Add to ~/.zshrc or put in fpath
//! - fish: Add to ~/.config/fish/completions/
//! - powershell: Add to $PROFILE
//! - elvish: Add to ~/.elvish/rc.elv

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::Cli;

pub fn run(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
