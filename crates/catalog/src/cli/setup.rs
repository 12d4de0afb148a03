use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    bin_name = "catalog",
    version,
    disable_help_subcommand = true
)]
#[command(
    about = "Typed-attribute catalog of categories, features and resources",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $CATALOG_DATA, then the OS data dir)
    #[arg(long, global = true, help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the value types a feature can declare
    Types,

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Manage typed features
    #[command(subcommand)]
    Feature(FeatureCommands),

    /// Manage resources
    #[command(subcommand)]
    Resource(ResourceCommands),

    /// Manage feature values
    #[command(subcommand)]
    Value(ValueCommands),

    /// Remove dangling references and mistyped values
    Doctor,

    /// Load the demo data set
    Seed {
        /// Only seed when the catalog is empty
        #[arg(long)]
        if_empty: bool,
    },

    /// Show record counts
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category
    Create { name: String },
    /// Show one category
    Get { id: String },
    /// List all categories
    #[command(alias = "ls")]
    List,
    /// Rename a category
    Update { id: String, name: String },
    /// Delete a category with its features, resources and values
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum FeatureCommands {
    /// Create a feature
    Create {
        name: String,
        /// STRING, NUMBER or BOOLEAN
        #[arg(long = "type", short = 't')]
        value_type: String,
        #[arg(long, short = 'c')]
        category: String,
    },
    /// Show one feature
    Get { id: String },
    /// List features, optionally within one category
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'c')]
        category: Option<String>,
    },
    /// Update a feature (its type cannot change)
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type", short = 't')]
        value_type: Option<String>,
        #[arg(long, short = 'c')]
        category: Option<String>,
    },
    /// Delete a feature and its values
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// Create a resource
    Create {
        name: String,
        #[arg(long, short = 'q', allow_hyphen_values = true)]
        quantity: i64,
        /// Create the resource as inactive
        #[arg(long)]
        inactive: bool,
        #[arg(long, short = 'c')]
        category: String,
    },
    /// Show one resource
    Get { id: String },
    /// List resources, optionally within one category
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'c')]
        category: Option<String>,
    },
    /// Update a resource
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, short = 'q', allow_hyphen_values = true)]
        quantity: Option<i64>,
        /// true (active) or false (inactive)
        #[arg(long)]
        status: Option<bool>,
        #[arg(long, short = 'c')]
        category: Option<String>,
    },
    /// Delete a resource and its values
    #[command(alias = "rm")]
    Delete { id: String },
}

/// The three value slots. Exactly one must be given, matching the
/// feature's type.
#[derive(Args, Debug, Default)]
pub struct SlotArgs {
    #[arg(long = "string")]
    pub value_string: Option<String>,
    #[arg(long = "number", allow_hyphen_values = true)]
    pub value_number: Option<f64>,
    #[arg(long = "bool")]
    pub value_boolean: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum ValueCommands {
    /// Attach a value to a resource for a feature
    Create {
        #[arg(long, short = 'r')]
        resource: String,
        #[arg(long, short = 'f')]
        feature: String,
        #[command(flatten)]
        slots: SlotArgs,
    },
    /// Show one value
    Get {
        id: String,
        /// Include the resource and feature it binds
        #[arg(long)]
        detail: bool,
        /// Only succeed if the value belongs to this resource
        #[arg(long, short = 'r')]
        resource: Option<String>,
    },
    /// List values, optionally for one resource or one feature
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'r', conflicts_with = "feature")]
        resource: Option<String>,
        #[arg(long, short = 'f')]
        feature: Option<String>,
    },
    /// Replace a value
    Update {
        id: String,
        /// Only succeed if the value belongs to this resource
        #[arg(long, short = 'r')]
        resource: Option<String>,
        #[command(flatten)]
        slots: SlotArgs,
    },
    /// Delete a value
    #[command(alias = "rm")]
    Delete {
        id: String,
        /// Only succeed if the value belongs to this resource
        #[arg(long, short = 'r')]
        resource: Option<String>,
    },
}
