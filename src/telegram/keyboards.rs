//! Keyboard builders for the main menu and the inline flows.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::automation::{Automation, Period};
use crate::texts::{period_label, render, Lang};

fn period_emoji(period: Period) -> &'static str {
    match period {
        Period::Hourly => "⏱️",
        Period::Daily => "☀️",
        Period::Weekly => "📅",
        Period::Monthly => "🗓️",
    }
}

fn period_button(lang: Lang, period: Period, data: String) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(
        format!("{} {}", period_emoji(period), period_label(lang, period)),
        data,
    )
}

fn cancel_row(lang: Lang, scope: &str) -> Vec<InlineKeyboardButton> {
    vec![InlineKeyboardButton::callback(
        lang.texts().cancel_button.to_string(),
        format!("cancel:{scope}"),
    )]
}

/// Persistent reply keyboard with the three localized menu buttons.
pub fn main_menu(lang: Lang) -> KeyboardMarkup {
    let t = lang.texts();
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(t.menu_automation),
            KeyboardButton::new(t.menu_manage),
        ],
        vec![KeyboardButton::new(t.menu_settings)],
    ])
    .resize_keyboard()
}

/// Frequency selection during automation setup (`new:<period>` callbacks).
pub fn period_keyboard(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            period_button(lang, Period::Hourly, "new:hourly".to_string()),
            period_button(lang, Period::Daily, "new:daily".to_string()),
        ],
        vec![
            period_button(lang, Period::Weekly, "new:weekly".to_string()),
            period_button(lang, Period::Monthly, "new:monthly".to_string()),
        ],
        cancel_row(lang, "auto"),
    ])
}

/// Per-automation delete and reschedule buttons (`del:<id>`, `set:<id>:<period>`).
pub fn manage_keyboard(lang: Lang, automations: &[Automation]) -> InlineKeyboardMarkup {
    let t = lang.texts();
    let mut rows = Vec::new();
    for automation in automations {
        let id = automation.id.to_string();
        rows.push(vec![InlineKeyboardButton::callback(
            format!(
                "🗑️ {}",
                render(
                    t.delete_button,
                    &[("automation_id", id.as_str()), ("symbol", &automation.symbol)],
                )
            ),
            format!("del:{id}"),
        )]);
        rows.push(
            Period::ALL
                .into_iter()
                .map(|p| period_button(lang, p, format!("set:{id}:{}", p.as_str())))
                .collect(),
        );
    }
    if !rows.is_empty() {
        rows.push(cancel_row(lang, "manage"));
    }
    InlineKeyboardMarkup::new(rows)
}

/// Language selection, current choice marked (`lang:<code>` callbacks).
pub fn language_keyboard(current: Lang) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Lang::ALL
        .into_iter()
        .map(|lang| {
            let prefix = if lang == current { "✅ " } else { "" };
            vec![InlineKeyboardButton::callback(
                format!("{}{} {}", prefix, lang.emoji(), lang.label()),
                format!("lang:{}", lang.code()),
            )]
        })
        .collect();
    rows.push(cancel_row(current, "lang"));
    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::JobHandle;

    fn automation(id: u32, symbol: &str, period: Period) -> Automation {
        Automation {
            id,
            user_id: 1,
            chat_id: 1,
            symbol: symbol.to_string(),
            slug: symbol.to_lowercase(),
            period,
            handle: JobHandle(id as u64),
        }
    }

    #[test]
    fn manage_keyboard_has_two_rows_per_automation_plus_cancel() {
        let automations = vec![
            automation(1, "BTC", Period::Hourly),
            automation(2, "ETH", Period::Daily),
        ];
        let markup = manage_keyboard(Lang::En, &automations);
        assert_eq!(markup.inline_keyboard.len(), 5);
        assert_eq!(markup.inline_keyboard[1].len(), 4);
    }

    #[test]
    fn empty_manage_keyboard_has_no_cancel_row() {
        let markup = manage_keyboard(Lang::En, &[]);
        assert!(markup.inline_keyboard.is_empty());
    }

    #[test]
    fn language_keyboard_marks_current_language() {
        let markup = language_keyboard(Lang::Es);
        let texts: Vec<_> = markup
            .inline_keyboard
            .iter()
            .map(|row| row[0].text.clone())
            .collect();
        assert!(texts.iter().any(|t| t.starts_with("✅ ") && t.contains("Español")));
        assert!(!texts.iter().any(|t| t.starts_with("✅ ") && t.contains("English")));
    }
}
