use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum TagCommands {
    /// Create a tag.
    Create { tag: String },
    /// List tags.
    List,
}
