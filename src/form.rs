use crate::book::{Book, BookRecord};

/// Typed coercion failures. The browser original let `parseInt` produce
/// `NaN` and shipped it to the API; here every bad field is a named error
/// surfaced as a notice before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("o campo name é obrigatório")]
    MissingName,
    #[error("número de páginas inválido: {0:?}")]
    InvalidPageCount(String),
    #[error("nenhum livro carregado para edição")]
    MissingId,
    #[error("id inválido: {0:?}")]
    InvalidId(String),
    #[error("campo desconhecido: {0:?}")]
    UnknownField(String),
    #[error("valor inválido para flg_completed: {0:?} (use sim/não)")]
    InvalidFlag(String),
}

/// The edit form draft. Field names mirror the form controls of the
/// original page; `num_pages` stays raw text until `extract` coerces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub id: String,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub num_pages: String,
    pub des_synopsis: String,
    pub des_note: String,
    pub flg_completed: bool,
}

impl BookForm {
    /// Writes every field of a fetched record into the form, including the
    /// hidden id. This is the only place the client ever sets an id.
    pub fn populate(&mut self, book: &Book) {
        self.id = book.id.to_string();
        self.name = book.name.clone();
        self.author = book.author.clone();
        self.genre = book.genre.clone();
        self.num_pages = book.num_pages.to_string();
        self.des_synopsis = book.des_synopsis.clone().unwrap_or_default();
        self.des_note = book.des_observacao.clone().unwrap_or_default();
        self.flg_completed = book.flg_completed;
    }

    /// Reads the form back into a request record. Empty synopsis/note become
    /// absent rather than empty strings.
    pub fn extract(&self) -> Result<BookRecord, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let raw_pages = self.num_pages.trim();
        let num_pages = raw_pages
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidPageCount(raw_pages.to_owned()))?;

        Ok(BookRecord {
            name: name.to_owned(),
            author: self.author.trim().to_owned(),
            genre: self.genre.trim().to_owned(),
            num_pages,
            des_synopsis: optional_text(&self.des_synopsis),
            des_observacao: optional_text(&self.des_note),
            flg_completed: self.flg_completed,
        })
    }

    /// The hidden id field, required before an update.
    pub fn extract_id(&self) -> Result<u64, ValidationError> {
        let raw = self.id.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingId);
        }
        raw.parse::<u64>()
            .map_err(|_| ValidationError::InvalidId(raw.to_owned()))
    }

    /// Keyed field write for the shell. `id` is deliberately not settable:
    /// it is server-assigned and only `populate` may write it.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        match field {
            "name" => self.name = value.to_owned(),
            "author" => self.author = value.to_owned(),
            "genre" => self.genre = value.to_owned(),
            "num_pages" => self.num_pages = value.to_owned(),
            "des_synopsis" => self.des_synopsis = value.to_owned(),
            "des_note" => self.des_note = value.to_owned(),
            "flg_completed" => self.flg_completed = parse_flag(value)?,
            other => return Err(ValidationError::UnknownField(other.to_owned())),
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn render(&self) -> String {
        let completed = if self.flg_completed { "Sim" } else { "Não" };
        format!(
            "formulário:\n  id: {}\n  name: {}\n  author: {}\n  genre: {}\n  \
             num_pages: {}\n  des_synopsis: {}\n  des_note: {}\n  flg_completed: {completed}\n",
            self.id,
            self.name,
            self.author,
            self.genre,
            self.num_pages,
            self.des_synopsis,
            self.des_note,
        )
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn parse_flag(value: &str) -> Result<bool, ValidationError> {
    match value.trim().to_lowercase().as_str() {
        "sim" | "s" | "true" | "1" => Ok(true),
        "não" | "nao" | "n" | "false" | "0" => Ok(false),
        other => Err(ValidationError::InvalidFlag(other.to_owned())),
    }
}
