use crate::domain::error::AskError;
use crate::domain::traits::{LanguageModel, Translator};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// Schema description the model sees; keep in sync with `storage::db::SCHEMA`.
pub const DATABASE_SCHEMA: &str = "\
База данных (SQLite) содержит две таблицы.

1. `videos` — итоговая статистика по каждому видео:
   - id (TEXT, PRIMARY KEY) — идентификатор видео
   - creator_id (TEXT) — идентификатор креатора, у одного креатора может быть много видео
   - video_created_at (TEXT, 'YYYY-MM-DD HH:MM:SS', UTC) — дата и время публикации видео
   - views_count (INTEGER) — итоговое количество просмотров
   - likes_count (INTEGER) — итоговое количество лайков
   - comments_count (INTEGER) — итоговое количество комментариев
   - reports_count (INTEGER) — итоговое количество жалоб
   - created_at, updated_at (TEXT) — служебные времена записи, не время публикации

2. `video_snapshots` — почасовые замеры статистики видео:
   - id (TEXT, PRIMARY KEY) — идентификатор замера
   - video_id (TEXT, ссылка на videos.id) — к какому видео относится замер
   - views_count, likes_count, comments_count, reports_count (INTEGER) — значения счётчиков на момент замера
   - delta_views_count, delta_likes_count, delta_comments_count, delta_reports_count (INTEGER) — прирост счётчика с предыдущего замера
   - created_at (TEXT, 'YYYY-MM-DD HH:MM:SS', UTC) — время замера (раз в час)
   - updated_at (TEXT) — служебное время записи

Как выбирать таблицу:
- Итоговые значения («сколько всего», «сколько у видео/креатора») — таблица `videos`.
- Динамика, прирост, «за период», «за последний час/день» — SUM по полям delta_* из `video_snapshots` с фильтром по created_at.
- Вопросы про креатора — фильтр по videos.creator_id; для динамики по креатору соедини video_snapshots с videos по video_id.
- Даты публикации видео — videos.video_created_at; время замера — video_snapshots.created_at.
";

const RULES: &str = "\
Правила:
- Только один запрос SELECT, никаких других команд.
- Запрос возвращает ровно одну строку с одним значением.
- Сумма — SUM(), количество — COUNT(), среднее — AVG(), максимум и минимум — MAX() и MIN().
- Прирост — SUM() по полям delta_* из video_snapshots.
- Текущее время — datetime('now'); сдвиги — datetime('now', '-1 hour'), datetime('now', '-1 day'), date('now').
- Фильтр по креатору — WHERE creator_id = '...'.
- Используй только перечисленные таблицы и поля.
";

const EXAMPLES: &[(&str, &str)] = &[
    ("Сколько всего видео?", "SELECT COUNT(*) FROM videos;"),
    (
        "Сколько просмотров у всех видео?",
        "SELECT SUM(views_count) FROM videos;",
    ),
    (
        "Сколько лайков у креатора abc123?",
        "SELECT SUM(likes_count) FROM videos WHERE creator_id = 'abc123';",
    ),
    (
        "Какой прирост просмотров за последний час?",
        "SELECT SUM(delta_views_count) FROM video_snapshots WHERE created_at >= datetime('now', '-1 hour');",
    ),
    (
        "Сколько новых лайков за сегодня у креатора abc123?",
        "SELECT SUM(s.delta_likes_count) FROM video_snapshots s JOIN videos v ON v.id = s.video_id WHERE v.creator_id = 'abc123' AND s.created_at >= date('now');",
    ),
    (
        "Сколько комментариев у видео с id xyz?",
        "SELECT comments_count FROM videos WHERE id = 'xyz';",
    ),
    (
        "Среднее количество лайков?",
        "SELECT AVG(likes_count) FROM videos;",
    ),
];

/// The full system instruction sent with every question.
pub static SYSTEM_PROMPT: Lazy<String> = Lazy::new(|| {
    let mut prompt = String::from(
        "Ты помощник, который переводит вопросы по аналитике видео в SQL-запросы.\n\n",
    );
    prompt.push_str(DATABASE_SCHEMA);
    prompt.push('\n');
    prompt.push_str(RULES);
    prompt.push_str("\nПримеры:\n");
    for (question, sql) in EXAMPLES {
        prompt.push_str(&format!("- \"{}\" -> {}\n", question, sql));
    }
    prompt.push_str(
        "\nВерни ТОЛЬКО SQL-запрос: без markdown-разметки и без пояснений.",
    );
    prompt
});

/// Translator backed by a language model and the fixed schema prompt.
pub struct SqlTranslator<M> {
    model: M,
}

impl<M: LanguageModel> SqlTranslator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: LanguageModel> Translator for SqlTranslator<M> {
    async fn translate(&self, question: &str) -> Result<String, AskError> {
        let completion = self.model.complete(&SYSTEM_PROMPT, question).await?;
        let sql = clean_sql_response(&completion);

        if sql.is_empty() {
            return Err(AskError::Api(
                "LLM response contained no SQL".to_string(),
            ));
        }

        Ok(sql)
    }
}

/// Strip an enclosing code fence and surrounding whitespace.
///
/// Handles "```sql\n...\n```", "```SQL ...```", "```\n...```" and unfenced text.
pub fn clean_sql_response(response: &str) -> String {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let body = strip_language_tag(trimmed.trim_start_matches('`'));
    body.trim().trim_end_matches("```").trim().to_string()
}

/// Drop a leading fence language tag (`sql`, `SQL`, `sqlite`, ...).
fn strip_language_tag(fenced: &str) -> &str {
    let end = fenced
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(fenced.len());
    let (tag, rest) = fenced.split_at(end);

    // A bare fence can open straight onto the statement
    if tag.eq_ignore_ascii_case("select") || tag.eq_ignore_ascii_case("with") {
        fenced
    } else {
        rest
    }
}
