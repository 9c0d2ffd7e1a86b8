//! completion command - Generate shell completion scripts

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells, Generator};

use crate::cli::args::{Cli, Shell};

/// Generate a completion script for `shell` on stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    write_script(shell, &mut cmd, &name, &mut io::stdout());
    Ok(())
}

fn write_script(shell: Shell, cmd: &mut clap::Command, name: &str, out: &mut dyn io::Write) {
    fn emit<G: Generator>(gen: G, cmd: &mut clap::Command, name: &str, out: &mut dyn io::Write) {
        generate(gen, cmd, name.to_string(), out);
    }
    match shell {
        Shell::Bash => emit(shells::Bash, cmd, name, out),
        Shell::Zsh => emit(shells::Zsh, cmd, name, out),
        Shell::Fish => emit(shells::Fish, cmd, name, out),
        Shell::PowerShell => emit(shells::PowerShell, cmd, name, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_the_binary() {
        let mut cmd = Cli::command();
        let mut buf: Vec<u8> = Vec::new();
        write_script(Shell::Bash, &mut cmd, "fil", &mut buf);
        let script = String::from_utf8(buf).expect("utf8 script");
        assert!(script.contains("fil"));
    }
}
