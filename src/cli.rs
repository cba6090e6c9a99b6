// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "A founder's personal site as a terminal chat assistant"
)]
pub struct Cli {
    /// Explicit config file, merged over the default search path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Open directly on a canned topic: about, projects, research, climbing
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Submit this visitor message as soon as the chat opens
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Use plain ASCII borders instead of unicode
    #[arg(long)]
    pub ascii: bool,
}
