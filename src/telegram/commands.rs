//! Slash-command grammar and menu-button mapping.

use teloxide::utils::command::BotCommands;

use crate::texts::Lang;

/// Commands the bot accepts. Menu buttons map onto the same set through
/// [`command_for_menu_text`].
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "welcome message and main menu")]
    Start,
    #[command(description = "how to use the bot")]
    Help,
    #[command(description = "language settings")]
    Settings,
    #[command(description = "set up a recurring quote")]
    Automation,
    #[command(description = "list and adjust recurring quotes")]
    Manageautomation,
    #[command(description = "cancel the current setup")]
    Cancel,
}

/// Maps a main-menu button label (in any language) to its command.
pub fn command_for_menu_text(text: &str) -> Option<Command> {
    for lang in Lang::ALL {
        let t = lang.texts();
        if text == t.menu_automation {
            return Some(Command::Automation);
        }
        if text == t.menu_manage {
            return Some(Command::Manageautomation);
        }
        if text == t.menu_settings {
            return Some(Command::Settings);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_lowercase_with_and_without_mention() {
        assert_eq!(
            Command::parse("/manageautomation", "quote_bot").unwrap(),
            Command::Manageautomation
        );
        assert_eq!(
            Command::parse("/start@quote_bot", "quote_bot").unwrap(),
            Command::Start
        );
        assert!(Command::parse("/unknown", "quote_bot").is_err());
    }

    #[test]
    fn menu_buttons_map_to_commands_in_every_language() {
        assert_eq!(command_for_menu_text("🤖 Automation"), Some(Command::Automation));
        assert_eq!(
            command_for_menu_text("🗂️ Gestionar automatizaciones"),
            Some(Command::Manageautomation)
        );
        assert_eq!(command_for_menu_text("⚙️ 设置"), Some(Command::Settings));
        assert_eq!(command_for_menu_text("BTC"), None);
    }
}
