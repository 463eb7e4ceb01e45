use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "santa", version, about = "Secret Santa assignment generator and verifier")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Store root directory (default: .santa)
    #[arg(long, global = true, default_value = ".santa")]
    pub store_root: String,

    /// Debug logging on stderr (overrides SANTA_LOG).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate assignments for a participants JSON file.
    Generate {
        /// JSON array of participants ({id, name, email?}).
        #[arg(long)]
        participants: String,

        /// Gifts each participant gives and receives (1-3).
        #[arg(long, default_value_t = 1)]
        gifts: u32,

        /// Seed for a reproducible draw.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the assignment triples to this file instead of stdout.
        #[arg(long)]
        out: Option<String>,
    },

    /// Verify an assignment file against a participants file.
    Verify {
        /// JSON array of participants ({id, name, email?}).
        #[arg(long)]
        participants: String,
        /// JSON array of {giverId, receiverId, giftNumber}.
        #[arg(long)]
        assignments: String,
        /// Gifts each participant should give and receive (1-3).
        #[arg(long, default_value_t = 1)]
        gifts: u32,
    },

    /// Create or join a stored group.
    #[command(subcommand)]
    Group(GroupCommand),

    /// Draw assignments for a stored group (once; `clear` to redraw).
    Draw {
        /// Group id or name.
        group: String,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Remove a group's assignments.
    Clear { group: String },

    /// Show whom one participant buys for.
    Mine { group: String, participant: String },

    /// Organizer view of every assignment in a group.
    List { group: String },

    /// Verify a group's stored assignments.
    Audit { group: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum GroupCommand {
    /// Create a group.
    Create {
        name: String,
        #[arg(long, default_value_t = 1)]
        gifts: u32,
        #[arg(long)]
        max_participants: Option<usize>,
    },

    /// Change a group's name, gift count or size limit (before the draw).
    Update {
        /// Group id or name.
        group: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        gifts: Option<u32>,
        #[arg(long)]
        max_participants: Option<usize>,
    },

    /// Delete a group with its participants and assignments.
    Delete {
        /// Group id or name.
        group: String,
    },

    /// Join a group as a participant.
    Join {
        /// Group id or name.
        group: String,
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
}
