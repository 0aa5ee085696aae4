use anyhow::Context as _;

/// One user action per input line. These are the terminal counterparts of
/// the original page's event targets: row checkboxes, the search and delete
/// buttons, the form controls, the submit event and the edit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Toggle(u64),
    Search,
    Set { field: String, value: String },
    Form,
    Submit,
    Update,
    Reset,
    Delete,
    Help,
    Quit,
}

pub const HELP: &str = "\
comandos:
  list                 recarrega a lista de livros
  toggle <id>          marca/desmarca o livro na tabela
  search               carrega o livro marcado no formulário
  set <campo> <valor>  preenche um campo do formulário
  form                 mostra o formulário
  submit               cadastra um novo livro (sem id)
  update               atualiza o livro carregado (usa o id do formulário)
  reset                limpa o formulário
  delete               deleta os livros marcados
  quit                 sai";

pub fn parse(line: &str) -> anyhow::Result<Action> {
    let trimmed = line.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command {
        "list" => Ok(Action::List),
        "toggle" => {
            if rest.is_empty() {
                anyhow::bail!("uso: toggle <id>");
            }
            let id = rest
                .parse::<u64>()
                .with_context(|| format!("id inválido: {rest:?}"))?;
            Ok(Action::Toggle(id))
        }
        "search" => Ok(Action::Search),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None if !rest.is_empty() => (rest, ""),
                None => anyhow::bail!("uso: set <campo> <valor>"),
            };
            Ok(Action::Set {
                field: field.to_owned(),
                value: value.to_owned(),
            })
        }
        "form" => Ok(Action::Form),
        "submit" => Ok(Action::Submit),
        "update" => Ok(Action::Update),
        "reset" => Ok(Action::Reset),
        "delete" => Ok(Action::Delete),
        "help" => Ok(Action::Help),
        "quit" | "exit" => Ok(Action::Quit),
        other => anyhow::bail!("comando desconhecido: {other:?} (use `help`)"),
    }
}
