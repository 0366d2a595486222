//! Slash-command and menu-button handler.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ReplyMarkup;
use teloxide::utils::command::BotCommands;
use tracing::info;

use crate::automation::{AutomationRegistry, MessageJanitor, COMMAND_DELETE_DELAY};
use crate::core::{
    parse_message_id, BotError, Handler, HandlerResponse, Message, Result,
};
use crate::session::SessionStore;
use crate::telegram::commands::{command_for_menu_text, Command};
use crate::telegram::keyboards::{language_keyboard, main_menu, manage_keyboard};
use crate::texts::{period_label, render, Lang, LanguageStore};

/// Handles the command set (`/start`, `/help`, `/settings`, `/automation`,
/// `/manageautomation`, `/cancel`) and the localized menu buttons that alias
/// them. Command echoes are scheduled for deletion so the chat stays clean.
pub struct CommandHandler {
    bot: Bot,
    registry: Arc<AutomationRegistry>,
    sessions: Arc<SessionStore>,
    languages: Arc<LanguageStore>,
    janitor: Arc<MessageJanitor>,
    bot_username: Arc<RwLock<String>>,
}

impl CommandHandler {
    pub fn new(
        bot: Bot,
        registry: Arc<AutomationRegistry>,
        sessions: Arc<SessionStore>,
        languages: Arc<LanguageStore>,
        janitor: Arc<MessageJanitor>,
        bot_username: Arc<RwLock<String>>,
    ) -> Self {
        Self {
            bot,
            registry,
            sessions,
            languages,
            janitor,
            bot_username,
        }
    }

    fn parse(&self, text: &str) -> Option<Command> {
        if text.starts_with('/') {
            let username = self
                .bot_username
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            Command::parse(text, &username).ok()
        } else {
            command_for_menu_text(text)
        }
    }

    async fn reply(
        &self,
        chat_id: i64,
        text: String,
        markup: impl Into<ReplyMarkup>,
    ) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(markup.into())
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn run_command(&self, command: Command, message: &Message) -> Result<()> {
        let user_id = message.user.id;
        let chat_id = message.chat.id;
        let lang = self.languages.get(user_id);
        let t = lang.texts();

        match command {
            Command::Start => {
                self.reply(chat_id, t.start.to_string(), main_menu(lang)).await
            }
            Command::Help => {
                let text = render(
                    t.help,
                    &[
                        ("automation", t.menu_automation),
                        ("manage", t.menu_manage),
                        ("settings", t.menu_settings),
                    ],
                );
                self.reply(chat_id, text, main_menu(lang)).await
            }
            Command::Settings => {
                self.reply(chat_id, t.language_prompt.to_string(), language_keyboard(lang))
                    .await
            }
            Command::Automation => {
                self.sessions.begin(user_id);
                self.reply(chat_id, t.automation_prompt.to_string(), main_menu(lang))
                    .await
            }
            Command::Manageautomation => self.list_automations(user_id, chat_id, lang).await,
            Command::Cancel => {
                self.sessions.clear(user_id);
                self.reply(chat_id, t.automation_cancelled.to_string(), main_menu(lang))
                    .await
            }
        }
    }

    async fn list_automations(&self, user_id: i64, chat_id: i64, lang: Lang) -> Result<()> {
        let t = lang.texts();
        let automations = self.registry.list(user_id);
        if automations.is_empty() {
            let text = render(t.no_automations, &[("automation_label", t.menu_automation)]);
            return self.reply(chat_id, text, main_menu(lang)).await;
        }

        let mut lines = vec![t.automation_list_header.to_string()];
        for automation in &automations {
            lines.push(render(
                t.automation_line,
                &[
                    ("automation_id", automation.id.to_string().as_str()),
                    ("symbol", automation.symbol.as_str()),
                    ("period", period_label(lang, automation.period)),
                    ("every_hours", automation.period.every_hours().to_string().as_str()),
                ],
            ));
        }
        self.reply(chat_id, lines.join("\n"), manage_keyboard(lang, &automations))
            .await
    }
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        let Some(command) = self.parse(text) else {
            return Ok(HandlerResponse::Continue);
        };

        if let Some(id) = parse_message_id(&message.id) {
            self.janitor
                .schedule_delete(message.chat.id, id, COMMAND_DELETE_DELAY);
        }

        info!(user_id = message.user.id, command = ?command, "Command received");
        self.run_command(command, message).await?;
        Ok(HandlerResponse::Stop)
    }
}
