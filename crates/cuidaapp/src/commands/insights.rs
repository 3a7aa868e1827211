//! Read-only views derived from stored data: the weekly mood chart and the tip
//! of the day. These never touch the store; callers fetch the data first.

use crate::model::{MoodEntry, MoodValue, UserGoal};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::Serialize;

/// Number of points on the mood chart.
pub const CHART_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub day: &'static str,
    pub value: u8,
}

/// Chart points for the given moods (as returned by the mood list: newest
/// first), oldest first.
///
/// With no moods the chart shows the last [`CHART_DAYS`] days ending at
/// `today`, all at the neutral value, so a new user sees a flat line rather
/// than an empty chart.
pub fn mood_chart(moods: &[MoodEntry], today: NaiveDate) -> Vec<ChartPoint> {
    if moods.is_empty() {
        return (0..CHART_DAYS)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset as i64);
                ChartPoint {
                    date,
                    day: weekday_label(date.weekday()),
                    value: MoodValue::NEUTRAL.get(),
                }
            })
            .collect();
    }

    moods
        .iter()
        .take(CHART_DAYS)
        .rev()
        .map(|m| {
            let date = m.timestamp.with_timezone(&Local).date_naive();
            ChartPoint {
                date,
                day: weekday_label(date.weekday()),
                value: m.value.get(),
            }
        })
        .collect()
}

/// Short pt-BR weekday label, as shown on the chart axis.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "seg",
        Weekday::Tue => "ter",
        Weekday::Wed => "qua",
        Weekday::Thu => "qui",
        Weekday::Fri => "sex",
        Weekday::Sat => "sáb",
        Weekday::Sun => "dom",
    }
}

const ANXIETY_TIPS: [&str; 3] = [
    "Respire. Você não precisa resolver tudo agora.",
    "Um passo de cada vez já é progresso.",
    "Sua paz é mais importante que sua produtividade.",
];

const FOCUS_TIPS: [&str; 3] = [
    "O segredo é começar. O resto flui.",
    "Faça uma coisa de cada vez, e faça bem feito.",
    "Elimine o ruído, foque no sinal.",
];

const PRODUCTIVITY_TIPS: [&str; 3] = [
    "Pequenas vitórias constroem grandes resultados.",
    "Organização é liberdade.",
    "Seu futuro é criado pelo que você faz hoje.",
];

const GENERAL_TIPS: [&str; 3] = [
    "Você é capaz de coisas incríveis.",
    "Hoje é um ótimo dia para começar.",
    "Acredite no seu potencial.",
];

/// Tip of the day for a goal. Stable for a whole calendar day.
pub fn daily_tip(goal: Option<UserGoal>, day: NaiveDate) -> &'static str {
    let tips: &[&str] = match goal {
        Some(UserGoal::Anxiety) => &ANXIETY_TIPS,
        Some(UserGoal::Focus) => &FOCUS_TIPS,
        Some(UserGoal::Productivity) => &PRODUCTIVITY_TIPS,
        None => &GENERAL_TIPS,
    };
    tips[day.ordinal() as usize % tips.len()]
}
