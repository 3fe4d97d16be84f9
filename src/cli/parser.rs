use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTripPlanner
/// CLI application to plan trips and split their costs, backed by SQLite
#[derive(Parser)]
#[command(
    name = "rtripplanner",
    version = env!("CARGO_PKG_VERSION"),
    about = "A multi-trip travel planner: days, activities, expenses and cost splitting on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, edit, currencies and rates)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,

        #[arg(
            long = "set-rate",
            value_name = "CODE=RATE",
            help = "Store an exchange rate (1 base = RATE CODE), e.g. JPY=0.11"
        )]
        set_rate: Vec<String>,

        #[arg(long = "display", value_name = "CODE", help = "Set the display currency")]
        display: Option<String>,

        #[arg(long = "ocr-default", value_name = "CODE", help = "Currency for untagged receipt amounts")]
        ocr_default: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "limit", help = "Only the most recent N rows")]
        limit: Option<usize>,
    },

    /// Create, switch, duplicate and delete trips
    Trip {
        #[command(subcommand)]
        action: TripCmd,
    },

    /// Manage the days of the active trip
    Day {
        #[command(subcommand)]
        action: DayCmd,
    },

    /// Manage the activities of a day
    Activity {
        #[command(subcommand)]
        action: ActivityCmd,
    },

    /// Record expenses (trip-level or on an activity)
    Expense {
        #[command(subcommand)]
        action: ExpenseCmd,
    },

    /// Manage who expenses are billed to
    Owner {
        #[command(subcommand)]
        action: OwnerCmd,
    },

    /// Inter-city transport legs of the active trip
    Transport {
        #[command(subcommand)]
        action: TransportCmd,
    },

    /// Costs per day, totals, per-owner totals and settlement
    Summary {
        #[arg(long = "trip", help = "Trip id (prefix); defaults to the active trip")]
        trip: Option<String>,

        #[arg(long = "currency", help = "Display currency for this run")]
        currency: Option<String>,
    },

    /// Import trips from a JSON snapshot (legacy single-trip or multi-trip)
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Export the active trip's expenses (CSV) or every trip (JSON)
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TripCmd {
    /// List all trips (the active one is marked)
    List,

    /// Show the active trip's days and activities
    Show,

    /// Create a trip and make it active
    Create {
        name: String,

        #[arg(long = "start", value_name = "YYYY-MM-DD")]
        start: Option<String>,

        #[arg(long = "end", value_name = "YYYY-MM-DD")]
        end: Option<String>,

        #[arg(long = "budget", help = "Total budget in the input currency")]
        budget: Option<f64>,

        #[arg(long = "currency", help = "Currency of --budget (default: display currency)")]
        currency: Option<String>,

        #[arg(long = "days", help = "Create one day per date between --start and --end")]
        generate_days: bool,
    },

    /// Make another trip active
    Switch { trip: String },

    /// Copy a trip (fresh ids, no expenses) and make the copy active
    Duplicate { trip: String },

    /// Delete a trip (the last remaining trip cannot be deleted)
    Delete { trip: String },

    /// Edit the active trip's header
    Update {
        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "start", value_name = "YYYY-MM-DD")]
        start: Option<String>,

        #[arg(long = "end", value_name = "YYYY-MM-DD")]
        end: Option<String>,

        #[arg(long = "budget")]
        budget: Option<f64>,

        #[arg(long = "currency", help = "Currency of --budget (default: display currency)")]
        currency: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DayCmd {
    /// List days of the active trip
    List,

    /// Add a day (at the end unless --at is given)
    Add {
        #[arg(long = "date", value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long = "destination", default_value = "")]
        destination: String,

        #[arg(long = "at", help = "1-based position of the new day")]
        at: Option<usize>,
    },

    /// Remove a day by number
    Remove { day: u32 },

    /// Move a day to another position (days are renumbered)
    Move { from: u32, to: u32 },

    /// Mark the day the trip is currently on
    Current { day: u32 },

    /// Edit a day
    Update {
        day: u32,

        #[arg(long = "date", value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long = "destination")]
        destination: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ActivityCmd {
    /// List the activities of a day
    List { day: u32 },

    /// Add an activity to a day
    Add {
        day: u32,
        name: String,

        #[arg(long = "time", value_name = "HH:MM")]
        time: Option<String>,

        #[arg(long = "duration", help = "e.g. 2h, 90min, 1h30m (empty for a place)")]
        duration: Option<String>,

        #[arg(long = "category", help = "attraction, shopping, meal, transport, free")]
        category: Option<String>,

        #[arg(long = "cost", help = "Estimated cost in the input currency")]
        cost: Option<f64>,

        #[arg(long = "currency")]
        currency: Option<String>,

        #[arg(long = "at", help = "1-based position within the day")]
        at: Option<usize>,
    },

    /// Edit an activity (day number, 1-based position)
    Update {
        day: u32,
        index: usize,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "time", value_name = "HH:MM")]
        time: Option<String>,

        #[arg(long = "duration")]
        duration: Option<String>,

        #[arg(long = "category")]
        category: Option<String>,

        #[arg(long = "cost")]
        cost: Option<f64>,

        #[arg(long = "currency")]
        currency: Option<String>,
    },

    /// Remove an activity
    Remove { day: u32, index: usize },

    /// Reorder within a day; start times stay with their slots
    Move { day: u32, from: usize, to: usize },

    /// Move an activity to another day
    MoveDay {
        day: u32,
        index: usize,
        to_day: u32,

        #[arg(long = "at")]
        at: Option<usize>,
    },

    /// Toggle the completed flag (clears skipped)
    Done { day: u32, index: usize },

    /// Toggle the skipped flag (clears completed)
    Skip { day: u32, index: usize },

    /// Attach a memo
    Memo { day: u32, index: usize, text: String },
}

#[derive(Subcommand)]
pub enum ExpenseCmd {
    /// List expenses of the active trip
    List,

    /// Record an expense
    Add {
        amount: f64,

        #[arg(default_value = "")]
        description: String,

        #[arg(long = "currency", help = "Currency of AMOUNT (default: display currency)")]
        currency: Option<String>,

        #[arg(long = "owner", help = "Owner id or name (default: shared)")]
        owner: Option<String>,

        #[arg(long = "day", help = "Link a trip-level expense to a day")]
        day: Option<u32>,

        #[arg(
            long = "activity",
            requires = "day",
            help = "Record on activity N of --day instead of the trip"
        )]
        activity: Option<usize>,

        #[arg(long = "category")]
        category: Option<String>,
    },

    /// Remove an expense by id (prefix)
    Remove { id: String },

    /// Read a receipt (recognized text file) and extract the amount
    Scan {
        #[arg(long = "file", value_name = "FILE")]
        file: String,

        #[arg(long = "save", help = "Record the extracted amount as an expense")]
        save: bool,

        #[arg(long = "owner")]
        owner: Option<String>,

        #[arg(long = "day")]
        day: Option<u32>,

        #[arg(long = "description", default_value = "Receipt")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum OwnerCmd {
    /// List owners of the active trip
    List,

    /// Add an owner
    Add {
        name: String,

        #[arg(long = "color", default_value = "#4caf50")]
        color: String,
    },

    /// Rename or recolour an owner
    Update {
        owner: String,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "color")]
        color: Option<String>,
    },

    /// Remove an owner; their expenses move to shared
    Remove { owner: String },
}

#[derive(Subcommand)]
pub enum TransportCmd {
    /// List transport legs
    List,

    /// Add a leg between two places
    Add {
        from: String,
        to: String,

        #[arg(long = "date", value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long = "mode", default_value = "train", help = "train, bus, flight, ferry, car...")]
        mode: String,

        #[arg(long = "time", value_name = "HH:MM")]
        time: Option<String>,

        #[arg(long = "duration")]
        duration: Option<String>,

        #[arg(long = "cost")]
        cost: Option<f64>,

        #[arg(long = "currency")]
        currency: Option<String>,
    },

    /// Remove a leg by id (prefix)
    Remove { id: String },
}
