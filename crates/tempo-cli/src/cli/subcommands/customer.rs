use clap::Subcommand;

/// Customer commands. `<customer>` is an ID or a name.
#[derive(Clone, Debug, Subcommand)]
pub enum CustomerCommands {
    /// Create a customer.
    Create { name: String },
    /// List customers.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a customer with its projects.
    Get { customer: String },
    /// Rename or (de)activate a customer.
    Update {
        customer: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a customer without projects.
    Delete { customer: String },
}
