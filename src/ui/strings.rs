use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    Tr,
    En,
}

impl Lang {
    /// Accepts `tr`/`en` in any case, surrounding whitespace ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tr" => Some(Lang::Tr),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    /// Interactive language answer: anything starting with `e`/`E` is
    /// English, everything else Turkish.
    pub fn from_choice(answer: &str) -> Self {
        match answer.trim_start().chars().next() {
            Some('e' | 'E') => Lang::En,
            _ => Lang::Tr,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Tr => "tr",
            Lang::En => "en",
        }
    }

    pub fn strings(self) -> &'static UiStrings {
        match self {
            Lang::Tr => &TR,
            Lang::En => &EN,
        }
    }

    pub fn default_system_prompt(self) -> &'static str {
        match self {
            Lang::Tr => "Sen Linux terminalinden erişilen yardımcı bir asistansın. Türkçe konuş.",
            Lang::En => "You are a helpful assistant accessed from a Linux terminal.",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every user-facing line of the REPL in one language.
#[derive(Debug)]
pub struct UiStrings {
    pub welcome: &'static str,
    pub model: &'static str,
    pub lang: &'static str,
    pub commands: &'static str,
    pub me: &'static str,
    pub assistant: &'static str,
    pub question: &'static str,
    pub bye: &'static str,
    pub exiting: &'static str,
    pub history_empty: &'static str,
    pub history_cleared: &'static str,
    pub suggested: &'static str,
    pub run_hint: &'static str,
    pub no_commands: &'static str,
    pub invalid_number: &'static str,
    pub run_command: &'static str,
    pub confirm: &'static str,
    pub cancelled: &'static str,
    pub return_code: &'static str,
    pub multiline_intro: &'static str,
    pub multiline_empty: &'static str,
    pub file_loaded: &'static str,
    pub file_unreadable: &'static str,
    pub nothing_to_save: &'static str,
    pub saved: &'static str,
    pub save_failed: &'static str,
    pub nothing_to_copy: &'static str,
    pub copied: &'static str,
    pub no_clipboard: &'static str,
    pub no_answer: &'static str,
    pub usage_tokens: &'static str,
    pub api_key_prompt: &'static str,
    pub api_key_saved: &'static str,
    pub default_model_set: &'static str,
    pub model_list: &'static str,
}

pub const LANGUAGE_PROMPT: &str = "Dil seçiniz / Select language [tr/en] (Default: tr): ";
pub const LANGUAGE_SAVE_PROMPT: &str = "Seçim kaydedilsin mi? / Save choice permanently? [y/N]: ";
pub const LANGUAGE_SAVED: &str = "Dil ayarı kaydedildi / Language saved";

static TR: UiStrings = UiStrings {
    welcome: "termgpt",
    model: "Aktif model",
    lang: "Aktif dil",
    commands: "Komutlar: /exit, /model, /history, /clear, /read <dosya>, /save <dosya>, /copy, /ml, /run N",
    me: "Ben",
    assistant: "ChatGPT",
    question: "Soru",
    bye: "Görüşürüz 👋",
    exiting: "Çıkılıyor.",
    history_empty: "(henüz geçmiş yok)",
    history_cleared: "Sohbet geçmişi temizlendi.",
    suggested: "Önerilen komutlar",
    run_hint: "(Çalıştırmak için /run NUMARA yazabilirsin.)",
    no_commands: "Çalıştırılabilir komut yok (son yanıtta '$ ' satırı yok).",
    invalid_number: "Geçerli bir komut numarası gir",
    run_command: "Çalıştırılacak komut",
    confirm: "Onaylıyor musun? [y/N]: ",
    cancelled: "İptal edildi.",
    return_code: "Komut dönüş kodu",
    multiline_intro: "Çok satırlı moda geçtin. Metni yaz, sadece '.' içeren bir satırla bitir.",
    multiline_empty: "Boş çok satırlı giriş.",
    file_loaded: "Dosya yüklendi. Sonraki mesajınıza eklenecek",
    file_unreadable: "Dosya okunamadı",
    nothing_to_save: "Kaydedilecek cevap yok.",
    saved: "Cevap dosyaya kaydedildi",
    save_failed: "Dosya yazılamadı",
    nothing_to_copy: "Kopyalanacak cevap yok.",
    copied: "Cevap panoya kopyalandı.",
    no_clipboard: "pbcopy/wl-copy/xclip bulunamadı.",
    no_answer: "Cevap alınamadı veya hata oluştu.",
    usage_tokens: "tokens",
    api_key_prompt: "OpenAI API anahtarını gir (sadece ilk sefer): ",
    api_key_saved: "API anahtarı config dosyasına kaydedildi",
    default_model_set: "Varsayılan model ayarlandı",
    model_list: "Örnek sohbet modelleri:\n\n\
  gpt-4o-mini   - Hızlı, ucuz, günlük işler\n\
  gpt-4.1-mini  - Mini serisinin yeni nesli (erişimin varsa)\n\
  gpt-4o        - Daha güçlü, multimodal, genel amaçlı\n\
  gpt-4.1       - Güçlü, teknik işler ve kod için iyi\n\
  o3-mini       - Mantık / reasoning odaklı\n\n\
Not: Hesabında hangilerinin açık olduğunu OpenAI panelinden kontrol et.",
};

static EN: UiStrings = UiStrings {
    welcome: "termgpt",
    model: "Active model",
    lang: "Active language",
    commands: "Commands: /exit, /model, /history, /clear, /read <file>, /save <file>, /copy, /ml, /run N",
    me: "Me",
    assistant: "ChatGPT",
    question: "Question",
    bye: "Bye 👋",
    exiting: "Exiting.",
    history_empty: "(no history yet)",
    history_cleared: "Chat history cleared.",
    suggested: "Suggested commands",
    run_hint: "(Type /run NUMBER to execute.)",
    no_commands: "No executable commands found (no '$ ' lines in last response).",
    invalid_number: "Enter a valid command number",
    run_command: "Command to run",
    confirm: "Do you approve? [y/N]: ",
    cancelled: "Cancelled.",
    return_code: "Command return code",
    multiline_intro: "Multi-line mode. Type your text and finish with a line containing only '.'.",
    multiline_empty: "Empty multi-line input.",
    file_loaded: "File loaded. It will be attached to your next message",
    file_unreadable: "Could not read file",
    nothing_to_save: "No answer to save.",
    saved: "Answer saved to file",
    save_failed: "Could not write file",
    nothing_to_copy: "No answer to copy.",
    copied: "Answer copied to clipboard.",
    no_clipboard: "pbcopy/wl-copy/xclip not found.",
    no_answer: "No answer received or an error occurred.",
    usage_tokens: "tokens",
    api_key_prompt: "Enter your OpenAI API key (first run only): ",
    api_key_saved: "API key saved to config file",
    default_model_set: "Default model set",
    model_list: "Example chat models:\n\n\
  gpt-4o-mini   - Fast, cheap, everyday tasks\n\
  gpt-4.1-mini  - Newer mini generation (if you have access)\n\
  gpt-4o        - Stronger, multimodal, general purpose\n\
  gpt-4.1       - Strong, good for technical work and code\n\
  o3-mini       - Reasoning focused\n\n\
Note: check which ones your account can use in the OpenAI dashboard.",
};
