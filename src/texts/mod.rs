//! Localized text catalog and per-user language store.
//!
//! Four languages are supported; unknown codes fall back to English. Catalog
//! entries are plain templates with `{name}` placeholders, rendered with
//! [`render`]. Keeping the catalog as static structs (rather than a runtime
//! map) makes a missing key a compile error.

use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::automation::Period;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Es,
    Zh,
    Fa,
}

/// Default language for users who never picked one.
pub const DEFAULT_LANG: Lang = Lang::En;

impl Lang {
    /// All supported languages, in language-menu order.
    pub const ALL: [Lang; 4] = [Lang::En, Lang::Es, Lang::Zh, Lang::Fa];

    /// Two-letter code used in callback data.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
            Lang::Zh => "zh",
            Lang::Fa => "fa",
        }
    }

    /// Strict parse of a language code; unknown codes are rejected.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "es" => Some(Lang::Es),
            "zh" => Some(Lang::Zh),
            "fa" => Some(Lang::Fa),
            _ => None,
        }
    }

    /// Native display name for the language menu.
    pub fn label(self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Es => "Español",
            Lang::Zh => "中文",
            Lang::Fa => "فارسی",
        }
    }

    /// Flag emoji for the language menu.
    pub fn emoji(self) -> &'static str {
        match self {
            Lang::En => "🇺🇸",
            Lang::Es => "🇪🇸",
            Lang::Zh => "🇨🇳",
            Lang::Fa => "🇮🇷",
        }
    }

    /// The catalog for this language.
    pub fn texts(self) -> &'static Texts {
        match self {
            Lang::En => &EN,
            Lang::Es => &ES,
            Lang::Zh => &ZH,
            Lang::Fa => &FA,
        }
    }
}

/// Localized period name, used in menus, list lines, and the delivery prefix.
pub fn period_label(lang: Lang, period: Period) -> &'static str {
    let t = lang.texts();
    match period {
        Period::Hourly => t.period_hourly,
        Period::Daily => t.period_daily,
        Period::Weekly => t.period_weekly,
        Period::Monthly => t.period_monthly,
    }
}

/// Renders a catalog template, substituting `{key}` placeholders.
pub fn render(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in args {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}

/// Complete text catalog for one language.
pub struct Texts {
    pub menu_automation: &'static str,
    pub menu_manage: &'static str,
    pub menu_settings: &'static str,
    pub start: &'static str,
    pub help: &'static str,
    pub automation_prompt: &'static str,
    pub invalid_symbol: &'static str,
    pub symbol_not_found: &'static str,
    pub choose_frequency: &'static str,
    pub invalid_selection: &'static str,
    pub missing_data: &'static str,
    pub automation_created: &'static str,
    pub automation_prefix: &'static str,
    pub no_automations: &'static str,
    pub automation_list_header: &'static str,
    pub automation_line: &'static str,
    pub delete_button: &'static str,
    pub invalid_action: &'static str,
    pub invalid_id: &'static str,
    pub automation_missing: &'static str,
    pub deleted_automation: &'static str,
    pub invalid_period: &'static str,
    pub updated_period: &'static str,
    pub automation_cancelled: &'static str,
    pub fetch_unavailable: &'static str,
    pub manual_fetch_fail: &'static str,
    pub invalid_language: &'static str,
    pub cancel_button: &'static str,
    pub cancelled: &'static str,
    pub language_prompt: &'static str,
    pub language_updated: &'static str,
    pub quote_price: &'static str,
    pub quote_change: &'static str,
    pub quote_marketcap: &'static str,
    pub quote_volume: &'static str,
    pub quote_rank: &'static str,
    pub quote_source: &'static str,
    pub period_hourly: &'static str,
    pub period_daily: &'static str,
    pub period_weekly: &'static str,
    pub period_monthly: &'static str,
}

static EN: Texts = Texts {
    menu_automation: "🤖 Automation",
    menu_manage: "🗂️ Manage automations",
    menu_settings: "⚙️ Settings",
    start: "Hi! Send me a crypto or stablecoin symbol (e.g., BTC, USDT, TON) \
            and I'll fetch the latest info from CoinMarketCap. \
            You can keep sending symbols to get fresh updates.",
    help: "Use the menu buttons or commands:\n- {automation}\n- {manage}\n- {settings}\n\
           Or send a symbol like BTC/USDT for immediate data.",
    automation_prompt: "Automation setup: send a symbol (e.g., BTC, USDT, TON).",
    invalid_symbol: "Please send a valid symbol (letters/numbers only).",
    symbol_not_found: "Couldn't find {symbol} on CoinMarketCap. Try another ticker?",
    choose_frequency: "Great, {symbol} found. Choose how often to send updates:",
    invalid_selection: "Invalid selection. Please restart Automation.",
    missing_data: "Missing data. Please restart Automation.",
    automation_created: "Automation created for {symbol} ({period}). ID: {automation_id}. \
                         Use {manage_label} to view or adjust.",
    automation_prefix: "[{period} automation]",
    no_automations: "You have no automations. Use {automation_label} to create one.",
    automation_list_header: "Your automations:",
    automation_line: "- ID {automation_id}: {symbol} ({period}) every {every_hours}h",
    delete_button: "Delete #{automation_id} ({symbol})",
    invalid_action: "Invalid action.",
    invalid_id: "Invalid automation id.",
    automation_missing: "Automation not found.",
    deleted_automation: "Deleted automation #{automation_id}.",
    invalid_period: "Invalid period selection.",
    updated_period: "Updated automation #{automation_id} to {period}.",
    automation_cancelled: "Automation setup cancelled.",
    fetch_unavailable: "Automation for {symbol}: unable to fetch data right now.",
    manual_fetch_fail: "I couldn't fetch live data right now. Please try again.",
    invalid_language: "Invalid language selection.",
    cancel_button: "❌ Cancel",
    cancelled: "Cancelled.",
    language_prompt: "Choose your language:",
    language_updated: "Language changed to {language}.",
    quote_price: "Price",
    quote_change: "24h Change",
    quote_marketcap: "Market Cap",
    quote_volume: "24h Volume",
    quote_rank: "Market Cap Rank",
    quote_source: "Source",
    period_hourly: "Hourly",
    period_daily: "Daily",
    period_weekly: "Weekly",
    period_monthly: "Monthly",
};

static ES: Texts = Texts {
    menu_automation: "🤖 Automatización",
    menu_manage: "🗂️ Gestionar automatizaciones",
    menu_settings: "⚙️ Ajustes",
    start: "¡Hola! Envíame un símbolo de cripto o stablecoin (ej. BTC, USDT, TON) \
            y obtendré la información de CoinMarketCap. \
            Puedes seguir enviando símbolos para obtener nuevas actualizaciones.",
    help: "Usa los botones del menú o comandos:\n- {automation}\n- {manage}\n- {settings}\n\
           O envía un símbolo como BTC/USDT para datos inmediatos.",
    automation_prompt: "Configurar automatización: envía un símbolo (ej. BTC, USDT, TON).",
    invalid_symbol: "Envía un símbolo válido (solo letras/números).",
    symbol_not_found: "No encontré {symbol} en CoinMarketCap. ¿Pruebas otro ticker?",
    choose_frequency: "Listo, {symbol} encontrado. Elige cada cuánto enviar actualizaciones:",
    invalid_selection: "Selección inválida. Reinicia Automatización.",
    missing_data: "Faltan datos. Reinicia Automatización.",
    automation_created: "Automatización creada para {symbol} ({period}). ID: {automation_id}. \
                         Usa {manage_label} para ver o ajustar.",
    automation_prefix: "[Automatización {period}]",
    no_automations: "No tienes automatizaciones. Usa {automation_label} para crear una.",
    automation_list_header: "Tus automatizaciones:",
    automation_line: "- ID {automation_id}: {symbol} ({period}) cada {every_hours}h",
    delete_button: "Eliminar #{automation_id} ({symbol})",
    invalid_action: "Acción inválida.",
    invalid_id: "ID de automatización inválido.",
    automation_missing: "Automatización no encontrada.",
    deleted_automation: "Automatización #{automation_id} eliminada.",
    invalid_period: "Selección de periodo inválida.",
    updated_period: "Automatización #{automation_id} actualizada a {period}.",
    automation_cancelled: "Configuración cancelada.",
    fetch_unavailable: "Automatización de {symbol}: no puedo obtener datos ahora.",
    manual_fetch_fail: "No pude obtener datos en vivo ahora. Inténtalo de nuevo.",
    invalid_language: "Selección de idioma inválida.",
    cancel_button: "❌ Cancelar",
    cancelled: "Cancelado.",
    language_prompt: "Elige tu idioma:",
    language_updated: "Idioma cambiado a {language}.",
    quote_price: "Precio",
    quote_change: "Cambio 24h",
    quote_marketcap: "Capitalización",
    quote_volume: "Volumen 24h",
    quote_rank: "Rango de capitalización",
    quote_source: "Fuente",
    period_hourly: "Cada hora",
    period_daily: "Diario",
    period_weekly: "Semanal",
    period_monthly: "Mensual",
};

static ZH: Texts = Texts {
    menu_automation: "🤖 自动更新",
    menu_manage: "🗂️ 管理更新",
    menu_settings: "⚙️ 设置",
    start: "你好！发送加密货币或稳定币代号（如 BTC、USDT、TON），我会提供 CoinMarketCap 的最新信息。",
    help: "使用菜单按钮或命令：\n- {automation}\n- {manage}\n- {settings}\n或发送如 BTC/USDT 获取即时数据。",
    automation_prompt: "自动更新：发送代号（如 BTC、USDT、TON）。",
    invalid_symbol: "请发送有效的代号（仅限字母或数字）。",
    symbol_not_found: "在 CoinMarketCap 上找不到 {symbol}。换一个试试？",
    choose_frequency: "好的，找到 {symbol}。选择发送频率：",
    invalid_selection: "选择无效。请重新开始自动更新。",
    missing_data: "数据缺失。请重新开始自动更新。",
    automation_created: "已为 {symbol} 创建自动更新（{period}）。ID: {automation_id}。使用 {manage_label} 查看或调整。",
    automation_prefix: "[{period} 更新]",
    no_automations: "暂无自动更新。使用 {automation_label} 创建一个。",
    automation_list_header: "你的自动更新：",
    automation_line: "- ID {automation_id}: {symbol}（{period}）每 {every_hours} 小时",
    delete_button: "删除 #{automation_id}（{symbol}）",
    invalid_action: "无效操作。",
    invalid_id: "自动更新 ID 无效。",
    automation_missing: "未找到该自动更新。",
    deleted_automation: "已删除自动更新 #{automation_id}。",
    invalid_period: "无效的周期选择。",
    updated_period: "自动更新 #{automation_id} 已改为 {period}。",
    automation_cancelled: "已取消设置。",
    fetch_unavailable: "关于 {symbol} 的自动更新：现在无法获取数据。",
    manual_fetch_fail: "现在无法获取实时数据，请稍后再试。",
    invalid_language: "语言选择无效。",
    cancel_button: "❌ 取消",
    cancelled: "已取消。",
    language_prompt: "选择你的语言：",
    language_updated: "语言已切换为 {language}。",
    quote_price: "价格",
    quote_change: "24小时变化",
    quote_marketcap: "市值",
    quote_volume: "24小时成交量",
    quote_rank: "市值排名",
    quote_source: "来源",
    period_hourly: "每小时",
    period_daily: "每天",
    period_weekly: "每周",
    period_monthly: "每月",
};

static FA: Texts = Texts {
    menu_automation: "🤖 خودکارسازی",
    menu_manage: "🗂️ مدیریت خودکارسازی‌ها",
    menu_settings: "⚙️ تنظیمات",
    start: "سلام! نماد کریپتو یا استیبل‌کوین (مثل BTC، USDT، TON) را بفرست تا آخرین اطلاعات CoinMarketCap را بگیرم.",
    help: "از دکمه‌های منو یا دستورها استفاده کن:\n- {automation}\n- {manage}\n- {settings}\nیا نمادی مثل BTC/USDT بفرست تا داده فوری بگیری.",
    automation_prompt: "راه‌اندازی خودکارسازی: یک نماد بفرست (مثل BTC، USDT، TON).",
    invalid_symbol: "لطفاً یک نماد معتبر بفرست (فقط حروف/اعداد).",
    symbol_not_found: "{symbol} در CoinMarketCap پیدا نشد. نماد دیگری امتحان کن؟",
    choose_frequency: "عالی، {symbol} پیدا شد. بازه‌ی ارسال را انتخاب کن:",
    invalid_selection: "انتخاب نامعتبر. خودکارسازی را دوباره شروع کن.",
    missing_data: "اطلاعات ناقص است. خودکارسازی را دوباره شروع کن.",
    automation_created: "خودکارسازی برای {symbol} ({period}) ساخته شد. شناسه: {automation_id}. \
                         برای مشاهده یا تغییر از {manage_label} استفاده کن.",
    automation_prefix: "[به‌روزرسانی {period}]",
    no_automations: "خودکارسازی‌ای نداری. با {automation_label} یکی بساز.",
    automation_list_header: "خودکارسازی‌های تو:",
    automation_line: "- شناسه {automation_id}: {symbol} ({period}) هر {every_hours} ساعت",
    delete_button: "حذف #{automation_id} ({symbol})",
    invalid_action: "عملیات نامعتبر.",
    invalid_id: "شناسه خودکارسازی نامعتبر است.",
    automation_missing: "خودکارسازی پیدا نشد.",
    deleted_automation: "خودکارسازی #{automation_id} حذف شد.",
    invalid_period: "انتخاب بازه نامعتبر است.",
    updated_period: "خودکارسازی #{automation_id} به {period} تغییر کرد.",
    automation_cancelled: "تنظیمات لغو شد.",
    fetch_unavailable: "برای {symbol}: فعلاً نمی‌توانم داده بگیرم.",
    manual_fetch_fail: "الان نمی‌توانم داده زنده بگیرم. دوباره تلاش کن.",
    invalid_language: "انتخاب زبان نامعتبر است.",
    cancel_button: "❌ لغو",
    cancelled: "لغو شد.",
    language_prompt: "زبان خود را انتخاب کن:",
    language_updated: "زبان به {language} تغییر کرد.",
    quote_price: "قیمت",
    quote_change: "تغییر ۲۴ساعته",
    quote_marketcap: "ارزش بازار",
    quote_volume: "حجم ۲۴ساعته",
    quote_rank: "رتبه ارزش بازار",
    quote_source: "منبع",
    period_hourly: "ساعتی",
    period_daily: "روزانه",
    period_weekly: "هفتگی",
    period_monthly: "ماهانه",
};

/// Returns true if the text is one of the main-menu button labels in any language.
pub fn is_menu_button_text(text: &str) -> bool {
    Lang::ALL.iter().any(|lang| {
        let t = lang.texts();
        text == t.menu_automation || text == t.menu_manage || text == t.menu_settings
    })
}

/// Per-user language selection, in memory for the process lifetime.
#[derive(Default)]
pub struct LanguageStore {
    langs: RwLock<HashMap<i64, Lang>>,
}

impl LanguageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language for a user; [`DEFAULT_LANG`] when never set.
    pub fn get(&self, user_id: i64) -> Lang {
        self.langs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .copied()
            .unwrap_or(DEFAULT_LANG)
    }

    pub fn set(&self, user_id: i64, lang: Lang) {
        self.langs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id, lang);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_is_rejected_but_store_falls_back_to_english() {
        assert_eq!(Lang::from_code("de"), None);

        let store = LanguageStore::new();
        assert_eq!(store.get(42), Lang::En);
        store.set(42, Lang::Es);
        assert_eq!(store.get(42), Lang::Es);
        assert_eq!(store.get(43), Lang::En);
    }

    #[test]
    fn render_substitutes_placeholders() {
        let out = render(
            Lang::En.texts().symbol_not_found,
            &[("symbol", "BTC")],
        );
        assert_eq!(out, "Couldn't find BTC on CoinMarketCap. Try another ticker?");
    }

    #[test]
    fn period_labels_are_localized() {
        assert_eq!(period_label(Lang::En, Period::Hourly), "Hourly");
        assert_eq!(period_label(Lang::Es, Period::Monthly), "Mensual");
        assert_eq!(period_label(Lang::Zh, Period::Weekly), "每周");
    }

    #[test]
    fn menu_button_detection_covers_all_languages() {
        assert!(is_menu_button_text("🤖 Automation"));
        assert!(is_menu_button_text("⚙️ Ajustes"));
        assert!(is_menu_button_text("🗂️ 管理更新"));
        assert!(!is_menu_button_text("BTC"));
    }
}
