//! Inline callback routing: `new:`, `del:`, `set:`, `lang:`, `cancel:`.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::MessageId;
use tracing::{debug, instrument};

use crate::automation::{AutomationRegistry, MessageJanitor, Period, MENU_DELETE_DELAY};
use crate::core::{BotError, Result};
use crate::session::{SessionStore, SetupState};
use crate::telegram::keyboards::{language_keyboard, main_menu};
use crate::texts::{period_label, render, Lang, LanguageStore, DEFAULT_LANG};

/// Routes callback queries from the inline menus. Every menu message that is
/// edited in place gets a delayed deletion, so answered menus clean themselves
/// up a few seconds later.
pub struct CallbackRouter {
    bot: Bot,
    registry: Arc<AutomationRegistry>,
    sessions: Arc<SessionStore>,
    languages: Arc<LanguageStore>,
    janitor: Arc<MessageJanitor>,
}

impl CallbackRouter {
    pub fn new(
        bot: Bot,
        registry: Arc<AutomationRegistry>,
        sessions: Arc<SessionStore>,
        languages: Arc<LanguageStore>,
        janitor: Arc<MessageJanitor>,
    ) -> Self {
        Self {
            bot,
            registry,
            sessions,
            languages,
            janitor,
        }
    }

    #[instrument(skip(self, query), fields(user_id = query.from.id.0))]
    pub async fn dispatch(&self, query: CallbackQuery) -> Result<()> {
        self.bot
            .answer_callback_query(query.id.clone())
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;

        // Messages older than 48h come back inaccessible; nothing to edit then.
        let Some(message) = query.message else {
            return Ok(());
        };
        let chat = message.chat().id;
        let message_id = message.id();
        let user_id = query.from.id.0 as i64;
        let lang = self.languages.get(user_id);

        let data = query.data.unwrap_or_default();
        let parts: Vec<&str> = data.split(':').collect();
        debug!(data = %data, "Callback received");

        match parts.as_slice() {
            ["new", token] => self.create_automation(user_id, chat, message_id, lang, token).await,
            ["new", ..] => {
                self.edit_ephemeral(chat, message_id, lang.texts().invalid_selection)
                    .await
            }
            [action @ ("del" | "set"), rest @ ..] => {
                self.manage_automation(user_id, chat, message_id, lang, action, rest)
                    .await
            }
            ["lang", code] => self.change_language(user_id, chat, message_id, code).await,
            ["cancel", ..] => self.cancel_menu(user_id, chat, message_id, lang).await,
            _ => {
                self.edit_ephemeral(chat, message_id, lang.texts().invalid_action)
                    .await
            }
        }
    }

    /// Edits the menu message in place and schedules its deletion.
    async fn edit_ephemeral(&self, chat: ChatId, message_id: MessageId, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(chat, message_id, text)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        self.janitor
            .schedule_delete(chat.0, message_id.0, MENU_DELETE_DELAY);
        Ok(())
    }

    async fn create_automation(
        &self,
        user_id: i64,
        chat: ChatId,
        message_id: MessageId,
        lang: Lang,
        token: &str,
    ) -> Result<()> {
        let t = lang.texts();
        let period = token.parse::<Period>().ok();
        let state = self.sessions.take(user_id);
        let (Some(period), Some(SetupState::AwaitingPeriod { symbol, slug })) = (period, state)
        else {
            return self.edit_ephemeral(chat, message_id, t.missing_data).await;
        };

        let id = self.registry.create(user_id, chat.0, &symbol, &slug, period);
        let text = render(
            t.automation_created,
            &[
                ("symbol", symbol.as_str()),
                ("period", period_label(lang, period)),
                ("automation_id", id.to_string().as_str()),
                ("manage_label", t.menu_manage),
            ],
        );
        self.edit_ephemeral(chat, message_id, &text).await
    }

    async fn manage_automation(
        &self,
        user_id: i64,
        chat: ChatId,
        message_id: MessageId,
        lang: Lang,
        action: &str,
        rest: &[&str],
    ) -> Result<()> {
        let t = lang.texts();
        let Some(id) = rest.first().and_then(|s| s.parse::<u32>().ok()) else {
            return self.edit_ephemeral(chat, message_id, t.invalid_id).await;
        };
        if !self.registry.contains(user_id, id) {
            return self
                .edit_ephemeral(chat, message_id, t.automation_missing)
                .await;
        }

        match action {
            "del" => {
                self.registry.delete(user_id, id);
                let text = render(
                    t.deleted_automation,
                    &[("automation_id", id.to_string().as_str())],
                );
                self.edit_ephemeral(chat, message_id, &text).await
            }
            _ => {
                let Some(period) = rest.get(1).and_then(|s| s.parse::<Period>().ok()) else {
                    return self.edit_ephemeral(chat, message_id, t.invalid_period).await;
                };
                self.registry.update_period(user_id, id, period);
                let text = render(
                    t.updated_period,
                    &[
                        ("automation_id", id.to_string().as_str()),
                        ("period", period_label(lang, period)),
                    ],
                );
                self.edit_ephemeral(chat, message_id, &text).await
            }
        }
    }

    async fn change_language(
        &self,
        user_id: i64,
        chat: ChatId,
        message_id: MessageId,
        code: &str,
    ) -> Result<()> {
        let Some(lang) = Lang::from_code(code) else {
            return self
                .edit_ephemeral(chat, message_id, DEFAULT_LANG.texts().invalid_language)
                .await;
        };
        self.languages.set(user_id, lang);
        let t = lang.texts();

        // Re-render the prompt in the new language so the checkmark moves,
        // then confirm with the relabelled main menu.
        self.bot
            .edit_message_text(chat, message_id, t.language_prompt)
            .reply_markup(language_keyboard(lang))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        self.bot
            .send_message(
                chat,
                render(
                    t.language_updated,
                    &[("language", format!("{} {}", lang.emoji(), lang.label()).as_str())],
                ),
            )
            .reply_markup(main_menu(lang))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        self.janitor
            .schedule_delete(chat.0, message_id.0, MENU_DELETE_DELAY);
        Ok(())
    }

    async fn cancel_menu(
        &self,
        user_id: i64,
        chat: ChatId,
        message_id: MessageId,
        lang: Lang,
    ) -> Result<()> {
        self.sessions.clear(user_id);
        if let Err(e) = self.bot.delete_message(chat, message_id).await {
            debug!(chat_id = chat.0, message_id = message_id.0, error = %e, "Failed to delete menu message");
        }
        let ack = self
            .bot
            .send_message(chat, lang.texts().cancelled)
            .reply_markup(main_menu(lang))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        self.janitor
            .schedule_delete(chat.0, ack.id.0, MENU_DELETE_DELAY);
        Ok(())
    }
}
