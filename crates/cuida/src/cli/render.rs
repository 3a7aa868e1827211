//! Output formatting.
//!
//! Every `render_*` function returns a `String` so it can be tested without a
//! terminal; the handlers print it. Lines are fitted to [`LINE_WIDTH`] by
//! display width, not byte length, since titles and comments are often
//! accented Portuguese or emoji.

use super::styles;
use chrono::{DateTime, NaiveDate, Utc};
use cuidaapp::commands::insights::ChartPoint;
use cuidaapp::model::{DiaryEntry, Habit, MoodEntry, PriorityItem, UserProfile};
use cuidaapp::store::{BucketReport, BucketState};
use serde::Serialize;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 14;
const INDEX_WIDTH: usize = 4;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{}", styles::success().apply_to(message));
}

pub fn print_warning(message: &str) {
    println!("{}", styles::warning().apply_to(message));
}

pub fn render_profile(profile: &UserProfile, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let name = profile.display_name.as_deref().unwrap_or("-");
    let _ = writeln!(out, "{}", styles::title().apply_to(name));
    field(&mut out, "email", &profile.email);
    field(&mut out, "id", &profile.uid);
    field(&mut out, "plan", &profile.plan.to_string());
    field(
        &mut out,
        "goal",
        profile.goal.map(|g| g.as_str()).unwrap_or("-"),
    );
    if let Some(bio) = &profile.bio {
        field(&mut out, "bio", bio);
    }
    if let Some(range) = &profile.age_range {
        field(&mut out, "age range", range);
    }
    if let Some(url) = &profile.photo_url {
        field(&mut out, "photo", url);
    }
    field(
        &mut out,
        "level",
        &format!("{} ({} xp)", profile.level, profile.xp),
    );
    if !profile.badges.is_empty() {
        let badges: Vec<&str> = profile.badges.iter().map(String::as_str).collect();
        field(&mut out, "badges", &badges.join(", "));
    }
    field(
        &mut out,
        "joined",
        format_time_ago(profile.created_at, now).trim(),
    );
    out
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        out,
        "  {} {}",
        styles::muted().apply_to(format!("{:<10}", label)),
        value
    );
}

pub fn render_moods(moods: &[MoodEntry], now: DateTime<Utc>) -> String {
    if moods.is_empty() {
        return "No moods recorded yet.\n".to_string();
    }

    let mut out = String::new();
    for mood in moods {
        let value = mood.value.get();
        let dots = format!(
            "{}{}",
            "●".repeat(value as usize),
            "○".repeat(5 - value as usize)
        );
        let prefix_width = 2 + dots.width() + 1;
        let available = LINE_WIDTH.saturating_sub(prefix_width + TIME_WIDTH);
        let comment = fit(mood.comment.as_deref().unwrap_or(""), available);

        let _ = writeln!(
            out,
            "  {} {}{}",
            styles::mood(value).apply_to(dots),
            comment,
            styles::time().apply_to(format_time_ago(mood.timestamp, now))
        );
    }
    out
}

/// One bar per chart point, labelled with its weekday and day of month.
pub fn render_chart(points: &[ChartPoint]) -> String {
    let mut out = String::new();
    for point in points {
        let bar = "█".repeat(point.value as usize * 2);
        let _ = writeln!(
            out,
            "  {} {} {} {}",
            styles::muted().apply_to(format!("{:<3}", point.day)),
            styles::muted().apply_to(point.date.format("%d/%m")),
            styles::mood(point.value).apply_to(format!("{:<10}", bar)),
            point.value
        );
    }
    out
}

pub fn render_priorities(items: &[PriorityItem], date: NaiveDate, remaining: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        styles::title().apply_to(format!("Priorities for {}", date.format("%Y-%m-%d")))
    );
    if items.is_empty() {
        let _ = writeln!(out, "  {}", styles::muted().apply_to("Nothing planned."));
    }
    for (i, item) in items.iter().enumerate() {
        let check = if item.completed { "[x]" } else { "[ ]" };
        let available = LINE_WIDTH.saturating_sub(2 + INDEX_WIDTH + 4);
        let text = fit(&item.text, available);
        let line = format!("{} {}", check, text.trim_end());
        let styled = if item.completed {
            styles::done().apply_to(line)
        } else {
            console::Style::new().apply_to(line)
        };
        let _ = writeln!(
            out,
            "  {}{}",
            styles::id().apply_to(index_label(i)),
            styled
        );
    }
    let _ = writeln!(
        out,
        "  {}",
        styles::muted().apply_to(format!("{} of 3 slots left", remaining))
    );
    out
}

pub fn render_diary(entries: &[DiaryEntry], now: DateTime<Utc>) -> String {
    if entries.is_empty() {
        return "No diary entries yet.\n".to_string();
    }

    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let heading = format!("{} ({})", entry.title, entry.emotion);
        let available = LINE_WIDTH.saturating_sub(2 + TIME_WIDTH);
        let _ = writeln!(
            out,
            "  {}{}",
            styles::title().apply_to(fit(&heading, available)),
            styles::time().apply_to(format_time_ago(entry.timestamp, now))
        );
        let preview: String = entry
            .content
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        if !preview.trim().is_empty() {
            let _ = writeln!(
                out,
                "    {}",
                truncate_to_width(preview.trim(), LINE_WIDTH - 4)
            );
        }
    }
    out
}

pub fn render_habits(habits: &[Habit], today: NaiveDate) -> String {
    if habits.is_empty() {
        return "No habits yet.\n".to_string();
    }

    let mut out = String::new();
    for (i, habit) in habits.iter().enumerate() {
        let check = if habit.is_done_on(today) { "[x]" } else { "[ ]" };
        let stats = format!(
            "{} done, {} day run",
            habit.streak,
            habit.current_run(today)
        );
        let available = LINE_WIDTH.saturating_sub(2 + INDEX_WIDTH + 4 + stats.width() + 1);
        let _ = writeln!(
            out,
            "  {}{} {} {}",
            styles::id().apply_to(index_label(i)),
            check,
            fit(&habit.title, available),
            styles::muted().apply_to(stats)
        );
    }
    out
}

/// Outcome line for toggling `habit` on `date`, with the run ending on that day.
pub fn habit_toggle_message(habit: &Habit, date: NaiveDate) -> String {
    if habit.is_done_on(date) {
        format!(
            "\"{}\" done for {} ({} day run)",
            habit.title,
            date,
            habit.current_run(date)
        )
    } else {
        format!("\"{}\" undone for {}", habit.title, date)
    }
}

pub fn render_doctor(reports: &[BucketReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let status = match &report.state {
            BucketState::Empty => styles::muted().apply_to("empty".to_string()),
            BucketState::Ok { records } => {
                styles::success().apply_to(format!("ok ({} records)", records))
            }
            BucketState::Corrupt { reason } => {
                styles::error().apply_to(format!("CORRUPT: {}", reason))
            }
        };
        let _ = writeln!(out, "  {:<16}{}", report.bucket, status);
        let _ = writeln!(
            out,
            "  {:<16}{}",
            "",
            styles::muted().apply_to(report.location.display())
        );
    }
    out
}

/// Pad or truncate `s` to exactly `width` display columns.
/// One-based list number, padded so entries line up.
fn index_label(i: usize) -> String {
    format!("{:<width$}", format!("{}.", i + 1), width = INDEX_WIDTH)
}

fn fit(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // Left-pad units to the width of "seconds" so the column lines up
    let time_str = time_str
        .replace("hours ago", "  hours ago")
        .replace("hour ago", "   hour ago")
        .replace("days ago", "   days ago")
        .replace("day ago", "    day ago")
        .replace("weeks ago", "  weeks ago")
        .replace("week ago", "   week ago")
        .replace("months ago", " months ago")
        .replace("month ago", "  month ago")
        .replace("years ago", "  years ago")
        .replace("year ago", "   year ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
