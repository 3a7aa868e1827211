use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use cuidaapp::model::{Emotion, Plan, Theme, UserGoal};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "cuida",
    bin_name = "cuida",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Cuida de Mim: mood check-ins, priorities, diary and habits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $CUIDA_DATA, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputMode::Text,
        help_heading = "Options"
    )]
    pub output: OutputMode,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new profile for this device
    #[command(display_order = 1)]
    Register {
        email: String,
        /// Accepted for compatibility; never checked
        #[arg(long, default_value = "")]
        password: String,
    },

    /// Log in, reusing the stored profile when the email matches
    #[command(display_order = 2)]
    Login {
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },

    /// Log out (keeps all journal data)
    #[command(display_order = 3)]
    Logout,

    /// Show who is logged in
    #[command(display_order = 4)]
    Whoami,

    /// Show or edit the profile
    #[command(display_order = 5)]
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommands>,
    },

    /// Mood check-ins
    #[command(display_order = 10)]
    Mood {
        #[command(subcommand)]
        action: MoodCommands,
    },

    /// Daily priorities
    #[command(alias = "p", display_order = 11)]
    Priority {
        #[command(subcommand)]
        action: PriorityCommands,
    },

    /// Emotional diary
    #[command(display_order = 12)]
    Diary {
        #[command(subcommand)]
        action: DiaryCommands,
    },

    /// Habit tracker
    #[command(display_order = 13)]
    Habit {
        #[command(subcommand)]
        action: HabitCommands,
    },

    /// Show the theme, or set it
    #[command(display_order = 20)]
    Theme { theme: Option<Theme> },

    /// Tip of the day for your goal
    #[command(display_order = 21)]
    Tip,

    /// Check the data directory for damaged files
    #[command(display_order = 30)]
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the full profile
    Show,

    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        age_range: Option<String>,
        #[arg(long)]
        goal: Option<UserGoal>,
        #[arg(long)]
        plan: Option<Plan>,
        #[arg(long)]
        photo_url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MoodCommands {
    /// Record a mood from 1 (awful) to 5 (great)
    Add {
        value: u8,
        /// Optional comment words
        #[arg(trailing_var_arg = true)]
        comment: Vec<String>,
    },

    /// Recent moods, newest first
    #[command(alias = "ls")]
    List {
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// The last week of moods as a chart
    Chart,
}

#[derive(Subcommand, Debug)]
pub enum PriorityCommands {
    /// Add a priority for a day (three per day)
    Add {
        /// Day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Priorities for a day
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Mark a priority done
    Done {
        /// List number (as shown by `priority list`) or id
        target: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Mark a priority not done
    Undone {
        target: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remove a priority
    #[command(alias = "delete")]
    Rm {
        target: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DiaryCommands {
    /// Write a diary entry
    Add {
        #[arg(short, long)]
        emotion: Emotion,
        #[arg(short, long)]
        title: String,
        #[arg(trailing_var_arg = true)]
        content: Vec<String>,
    },

    /// Recent entries, newest first
    #[command(alias = "ls")]
    List {
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HabitCommands {
    /// Track a new daily habit
    Add {
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// All habits with today's status
    #[command(alias = "ls")]
    List,

    /// Mark a day done, or undo it
    Toggle {
        /// List number (as shown by `habit list`) or id
        target: String,
        /// Day to toggle (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cuida", "mood", "list", "-n", "3", "--output", "json", "--data", "/tmp/x",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputMode::Json);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Commands::Mood {
                action: MoodCommands::List { limit: Some(3) }
            }
        ));
    }

    #[test]
    fn parses_typed_values() {
        let cli = Cli::try_parse_from([
            "cuida", "diary", "add", "-e", "calm", "-t", "Evening", "long", "walk",
        ])
        .unwrap();
        match cli.command {
            Commands::Diary {
                action:
                    DiaryCommands::Add {
                        emotion,
                        title,
                        content,
                    },
            } => {
                assert_eq!(emotion, Emotion::Calm);
                assert_eq!(title, "Evening");
                assert_eq!(content, vec!["long", "walk"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli =
            Cli::try_parse_from(["cuida", "priority", "list", "--date", "2024-08-01"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Priority {
                action: PriorityCommands::List { date: Some(d) }
            } if d == NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
        ));
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(Cli::try_parse_from(["cuida", "theme", "sepia"]).is_err());
        assert!(Cli::try_parse_from(["cuida", "profile", "set", "--goal", "fame"]).is_err());
        assert!(Cli::try_parse_from(["cuida", "priority", "add"]).is_err());
    }
}
