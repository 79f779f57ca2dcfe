// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation for the ow CLI.
//!
//! Install completions using:
//!
//! ```bash
//! # Bash
//! ow --completions bash > ~/.local/share/bash-completion/completions/ow
//!
//! # Zsh
//! ow --completions zsh > ~/.zfunc/_ow
//!
//! # Fish
//! ow --completions fish > ~/.config/fish/completions/ow.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions and write to stdout.
pub fn generate_completions<C: CommandFactory>(shell: Shell) {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "ow", &mut io::stdout());
}
