use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt as _, BufReader};

use crate::api::ApiClient;
use crate::book::Book;
use crate::cli::{ListArgs, ShellArgs};
use crate::form::BookForm;
use crate::selection::Selection;
use crate::shell::{self, Action};
use crate::table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Editing,
}

/// The whole client state: current book list, current selection, current
/// form draft. Handlers are transitions on this value; each loop iteration
/// ends in a single render of it.
pub struct App {
    api: ApiClient,
    books: Vec<Book>,
    selection: Selection,
    form: BookForm,
    mode: Mode,
}

/// What a handler has to say back to the loop. Policy violations and parse
/// problems land here as notices; transport failures propagate as errors.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Option<String>,
    pub quit: bool,
}

impl Outcome {
    fn done() -> Self {
        Self {
            notice: None,
            quit: false,
        }
    }

    fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            notice: None,
            quit: true,
        }
    }
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            books: Vec::new(),
            selection: Selection::default(),
            form: BookForm::default(),
            mode: Mode::Idle,
        }
    }

    /// Full list re-fetch. The table is rebuilt from scratch, so the
    /// previous selection is discarded with it.
    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        self.books = self.api.list_books().await.context("fetch book list")?;
        self.selection.clear();
        tracing::debug!(count = self.books.len(), "refreshed book list");
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = table::render(&self.books, &self.selection);
        if self.mode == Mode::Editing || !self.form.is_empty() {
            out.push('\n');
            out.push_str(&self.form.render());
        }
        out
    }

    pub async fn apply(&mut self, action: Action) -> anyhow::Result<Outcome> {
        match action {
            Action::List => {
                self.refresh().await?;
                Ok(Outcome::done())
            }
            Action::Toggle(id) => {
                if !self.books.iter().any(|book| book.id == id) {
                    return Ok(Outcome::notice(format!("nenhum livro com id {id} na tabela")));
                }
                self.selection.toggle(id);
                Ok(Outcome::done())
            }
            Action::Search => self.search().await,
            Action::Set { field, value } => match self.form.set(&field, &value) {
                Ok(()) => Ok(Outcome::done()),
                Err(err) => Ok(Outcome::notice(err.to_string())),
            },
            Action::Form => Ok(Outcome::notice(self.form.render())),
            Action::Submit => self.submit().await,
            Action::Update => self.update().await,
            Action::Reset => {
                self.form.reset();
                self.mode = Mode::Idle;
                Ok(Outcome::done())
            }
            Action::Delete => self.delete().await,
            Action::Help => Ok(Outcome::notice(shell::HELP)),
            Action::Quit => Ok(Outcome::quit()),
        }
    }

    async fn search(&mut self) -> anyhow::Result<Outcome> {
        let id = match self.selection.single() {
            Ok(id) => id,
            Err(err) => return Ok(Outcome::notice(err.to_string())),
        };

        let book = self
            .api
            .get_book(id)
            .await
            .with_context(|| format!("fetch book {id}"))?;
        self.form.populate(&book);
        self.mode = Mode::Editing;
        tracing::debug!(id, "loaded book into form");
        Ok(Outcome::done())
    }

    async fn submit(&mut self) -> anyhow::Result<Outcome> {
        let record = match self.form.extract() {
            Ok(record) => record,
            Err(err) => return Ok(Outcome::notice(err.to_string())),
        };

        self.api.create_book(&record).await.context("create book")?;
        self.form.reset();
        self.mode = Mode::Idle;
        self.refresh().await?;
        Ok(Outcome::notice("livro cadastrado"))
    }

    async fn update(&mut self) -> anyhow::Result<Outcome> {
        let id = match self.form.extract_id() {
            Ok(id) => id,
            Err(err) => return Ok(Outcome::notice(err.to_string())),
        };
        let record = match self.form.extract() {
            Ok(record) => record,
            Err(err) => return Ok(Outcome::notice(err.to_string())),
        };

        self.api
            .update_book(id, &record)
            .await
            .with_context(|| format!("update book {id}"))?;
        self.form.reset();
        self.mode = Mode::Idle;
        self.refresh().await?;
        Ok(Outcome::notice("livro atualizado"))
    }

    async fn delete(&mut self) -> anyhow::Result<Outcome> {
        let ids = match self.selection.at_least_one() {
            Ok(ids) => ids,
            Err(err) => return Ok(Outcome::notice(err.to_string())),
        };

        // One request per id, awaited in turn; the API only exposes
        // single-id delete.
        for id in &ids {
            self.api
                .delete_book(*id)
                .await
                .with_context(|| format!("delete book {id}"))?;
        }
        self.refresh().await?;
        Ok(Outcome::notice(format!("{} livro(s) deletado(s)", ids.len())))
    }
}

pub async fn run_shell(args: ShellArgs) -> anyhow::Result<()> {
    let api = ApiClient::new(&args.api_url)?;
    let mut app = App::new(api);
    app.refresh().await.context("initial list fetch")?;
    println!("{}", app.render());
    println!("digite `help` para ver os comandos");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await.context("read shell line")? else {
            break;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let action = match shell::parse(trimmed) {
            Ok(action) => action,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };
        tracing::debug!(?action, "applying action");

        match app.apply(action).await {
            Ok(outcome) => {
                if let Some(notice) = outcome.notice {
                    println!("{notice}");
                }
                if outcome.quit {
                    break;
                }
                println!("{}", app.render());
            }
            // Transport failure: the previous state stays on screen and the
            // shell stays interactive.
            Err(err) => println!("erro: {err:#}"),
        }
    }

    Ok(())
}

pub async fn run_list(args: ListArgs) -> anyhow::Result<()> {
    let api = ApiClient::new(&args.api_url)?;
    let books = api.list_books().await.context("fetch book list")?;
    println!("{}", table::render(&books, &Selection::default()));
    Ok(())
}
