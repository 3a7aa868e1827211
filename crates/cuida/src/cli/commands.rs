//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data directory, load config, build the API
//! 3. **Dispatch**: Route each command to its handler
//! 4. **Output Formatting**: Text or JSON, via `render`
//! 5. **Error Handling**: Errors bubble up to `main` as `anyhow::Error`

use super::render;
use super::setup::{
    Cli, Commands, DiaryCommands, HabitCommands, MoodCommands, OutputMode, PriorityCommands,
    ProfileCommands,
};
use anyhow::{bail, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use cuidaapp::api::CuidaApi;
use cuidaapp::init::initialize;
use cuidaapp::model::{Feature, NewDiaryEntry, ProfilePatch, DAILY_PRIORITY_LIMIT};
use cuidaapp::services::ServiceSet;
use cuidaapp::session::Session;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = initialize(cli.data.clone())?;
    debug!(data_dir = %ctx.data_dir.display(), "context ready");

    let mut handler = Handler {
        api: ctx.api,
        output: cli.output,
        today: Local::now().date_naive(),
    };
    handler.dispatch(cli.command)
}

/// Logs go to stderr so they never mix with command output.
///
/// `RUST_LOG` controls the filter; `-v` adds debug on top of it.
fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if verbose {
        filter = filter.add_directive(LevelFilter::DEBUG.into());
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Join trailing words into one string; `None` when empty.
fn join_words(words: &[String]) -> Option<String> {
    let text = words.join(" ");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Resolve a list reference: a 1-based list number, or anything else taken as an id.
fn resolve_target<'a, T>(
    items: &'a [T],
    target: &str,
    id_of: impl Fn(&'a T) -> &'a str,
) -> Result<String> {
    match target.parse::<usize>() {
        Ok(n) => match n.checked_sub(1).and_then(|i| items.get(i)) {
            Some(item) => Ok(id_of(item).to_string()),
            None => bail!("No item number {} (the list has {})", n, items.len()),
        },
        Err(_) => Ok(target.to_string()),
    }
}

struct Handler<S: ServiceSet> {
    api: CuidaApi<S>,
    output: OutputMode,
    today: NaiveDate,
}

impl<S: ServiceSet> Handler<S> {
    fn json(&self) -> bool {
        self.output == OutputMode::Json
    }

    fn dispatch(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Register { email, password } => {
                let profile = self.api.register(&email, &password)?;
                if self.json() {
                    return render::print_json(&profile);
                }
                render::print_success(&format!("Welcome, {}!", profile.first_name()));
                Ok(())
            }
            Commands::Login { email, password } => {
                let profile = self.api.login(&email, &password)?;
                if self.json() {
                    return render::print_json(&profile);
                }
                render::print_success(&format!("Logged in as {}", profile.email));
                Ok(())
            }
            Commands::Logout => {
                self.api.logout()?;
                if !self.json() {
                    println!("Logged out.");
                }
                Ok(())
            }
            Commands::Whoami => self.whoami(),
            Commands::Profile { action } => self.profile(action.unwrap_or(ProfileCommands::Show)),
            Commands::Mood { action } => self.mood(action),
            Commands::Priority { action } => self.priority(action),
            Commands::Diary { action } => self.diary(action),
            Commands::Habit { action } => self.habit(action),
            Commands::Theme { theme } => self.theme(theme),
            Commands::Tip => self.tip(),
            Commands::Doctor => self.doctor(),
        }
    }

    fn whoami(&self) -> Result<()> {
        let Some(profile) = self.api.current_user()? else {
            if self.json() {
                return render::print_json(&serde_json::Value::Null);
            }
            println!("Not logged in.");
            return Ok(());
        };

        let unlocked: Vec<&str> = Feature::ALL
            .iter()
            .filter(|f| self.api.feature_unlocked(&profile, **f))
            .map(|f| f.as_str())
            .collect();
        if self.json() {
            return render::print_json(&json!({
                "session": Session::from(&profile),
                "features": unlocked,
            }));
        }
        println!("{} <{}>", profile.first_name(), profile.email);
        println!("features: {}", unlocked.join(", "));
        Ok(())
    }

    fn profile(&mut self, action: ProfileCommands) -> Result<()> {
        let session = self.api.require_session()?;
        let profile = match action {
            ProfileCommands::Show => self.api.profile(&session)?,
            ProfileCommands::Set {
                name,
                bio,
                age_range,
                goal,
                plan,
                photo_url,
            } => {
                let patch = ProfilePatch {
                    display_name: name,
                    bio,
                    age_range,
                    goal,
                    plan,
                    photo_url,
                    ..Default::default()
                };
                if patch.is_empty() {
                    bail!("Nothing to update (see `cuida profile set --help`)");
                }
                self.api.update_profile(&session, patch)?
            }
        };
        if self.json() {
            return render::print_json(&profile);
        }
        print!("{}", render::render_profile(&profile, Utc::now()));
        Ok(())
    }

    fn mood(&mut self, action: MoodCommands) -> Result<()> {
        let session = self.api.require_session()?;
        match action {
            MoodCommands::Add { value, comment } => {
                let entry = self.api.add_mood(&session, value, join_words(&comment))?;
                if self.json() {
                    return render::print_json(&entry);
                }
                render::print_success(&format!("Mood {} recorded.", entry.value));
            }
            MoodCommands::List { limit } => {
                let moods = self.api.moods(&session, limit)?;
                if self.json() {
                    return render::print_json(&moods);
                }
                print!("{}", render::render_moods(&moods, Utc::now()));
            }
            MoodCommands::Chart => {
                let chart = self.api.mood_chart(&session, self.today)?;
                if self.json() {
                    return render::print_json(&chart);
                }
                print!("{}", render::render_chart(&chart));
            }
        }
        Ok(())
    }

    fn priority(&mut self, action: PriorityCommands) -> Result<()> {
        let session = self.api.require_session()?;
        match action {
            PriorityCommands::Add { date, text } => {
                let date = date.unwrap_or(self.today);
                let Some(text) = join_words(&text) else {
                    bail!("Priority text cannot be empty");
                };
                if self.api.remaining_priority_slots(&session, date)? == 0 {
                    bail!(
                        "You already have {} priorities for {}. Finish or remove one first.",
                        DAILY_PRIORITY_LIMIT,
                        date
                    );
                }
                let item = self.api.add_priority(&session, &text, date)?;
                if self.json() {
                    return render::print_json(&item);
                }
                let left = self.api.remaining_priority_slots(&session, date)?;
                render::print_success(&format!("Added \"{}\" ({} left)", item.text, left));
            }
            PriorityCommands::List { date } => {
                let date = date.unwrap_or(self.today);
                let items = self.api.priorities(&session, date)?;
                if self.json() {
                    return render::print_json(&items);
                }
                let remaining = DAILY_PRIORITY_LIMIT.saturating_sub(items.len());
                print!("{}", render::render_priorities(&items, date, remaining));
            }
            PriorityCommands::Done { target, date } => {
                self.set_priority(&session, &target, date, Some(true))?
            }
            PriorityCommands::Undone { target, date } => {
                self.set_priority(&session, &target, date, Some(false))?
            }
            PriorityCommands::Rm { target, date } => {
                self.set_priority(&session, &target, date, None)?
            }
        }
        Ok(())
    }

    /// Toggle (`Some(completed)`) or delete (`None`) one priority.
    fn set_priority(
        &mut self,
        session: &Session,
        target: &str,
        date: Option<NaiveDate>,
        completed: Option<bool>,
    ) -> Result<()> {
        let items = self
            .api
            .priorities(session, date.unwrap_or(self.today))?;
        let id = resolve_target(&items, target, |p| p.id.as_str())?;

        let found = match completed {
            Some(completed) => self.api.toggle_priority(&id, completed)?,
            None => self.api.delete_priority(&id)?,
        };
        if !found {
            bail!("No priority matches '{}'", target);
        }
        if self.json() {
            return render::print_json(&json!({ "id": id, "completed": completed }));
        }
        let verb = match completed {
            Some(true) => "Done",
            Some(false) => "Reopened",
            None => "Removed",
        };
        render::print_success(&format!("{}.", verb));
        Ok(())
    }

    fn diary(&mut self, action: DiaryCommands) -> Result<()> {
        let session = self.api.require_session()?;
        match action {
            DiaryCommands::Add {
                emotion,
                title,
                content,
            } => {
                let content = join_words(&content).unwrap_or_default();
                let entry = NewDiaryEntry::new(emotion, title, content);
                let saved = self.api.add_diary_entry(&session, entry)?;
                if self.json() {
                    return render::print_json(&saved);
                }
                render::print_success(&format!("Saved \"{}\".", saved.title));
            }
            DiaryCommands::List { limit } => {
                let entries = self.api.diary_entries(&session, limit)?;
                if self.json() {
                    return render::print_json(&entries);
                }
                print!("{}", render::render_diary(&entries, Utc::now()));
            }
        }
        Ok(())
    }

    fn habit(&mut self, action: HabitCommands) -> Result<()> {
        let session = self.api.require_session()?;
        match action {
            HabitCommands::Add { title } => {
                let Some(title) = join_words(&title) else {
                    bail!("Habit title cannot be empty");
                };
                let habit = self.api.add_habit(&session, &title)?;
                if self.json() {
                    return render::print_json(&habit);
                }
                render::print_success(&format!("Tracking \"{}\".", habit.title));
            }
            HabitCommands::List => {
                let habits = self.api.habits(&session)?;
                if self.json() {
                    return render::print_json(&habits);
                }
                print!("{}", render::render_habits(&habits, self.today));
            }
            HabitCommands::Toggle { target, date } => {
                let date = date.unwrap_or(self.today);
                let habits = self.api.habits(&session)?;
                let id = resolve_target(&habits, &target, |h| h.id.as_str())?;
                let Some(habit) = self.api.toggle_habit(&id, date)? else {
                    bail!("No habit matches '{}'", target);
                };
                if self.json() {
                    return render::print_json(&habit);
                }
                let message = render::habit_toggle_message(&habit, date);
                if habit.is_done_on(date) {
                    render::print_success(&message);
                } else {
                    render::print_warning(&message);
                }
            }
        }
        Ok(())
    }

    fn theme(&mut self, theme: Option<cuidaapp::model::Theme>) -> Result<()> {
        let theme = match theme {
            Some(theme) => {
                self.api.set_theme(theme)?;
                theme
            }
            None => self.api.theme()?,
        };
        if self.json() {
            return render::print_json(&theme);
        }
        println!("{}", theme);
        Ok(())
    }

    fn tip(&self) -> Result<()> {
        let session = self.api.require_session()?;
        let profile = self.api.profile(&session)?;
        let tip = self.api.daily_tip(&profile, self.today);
        if self.json() {
            return render::print_json(&json!({ "goal": profile.goal, "tip": tip }));
        }
        println!("{}, {}", profile.first_name(), tip);
        Ok(())
    }

    fn doctor(&self) -> Result<()> {
        let reports = self.api.doctor()?;
        if self.json() {
            return render::print_json(&reports);
        }
        print!("{}", render::render_doctor(&reports));
        let corrupt = reports
            .iter()
            .filter(|r| matches!(r.state, cuidaapp::store::BucketState::Corrupt { .. }))
            .count();
        if corrupt > 0 {
            bail!("{} damaged file(s); fix or remove them to continue", corrupt);
        }
        Ok(())
    }
}
