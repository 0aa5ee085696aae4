use crate::book::Book;
use crate::selection::Selection;

pub const SYNOPSIS_PLACEHOLDER: &str = "Não disponível";
pub const NOTE_PLACEHOLDER: &str = "Sem observação";

const HEADERS: [&str; 8] = [
    "nome",
    "autor",
    "gênero",
    "páginas",
    "sinopse",
    "observação",
    "concluído",
    "sel",
];

/// Renders the book table as text, one row per book in input order. Pure:
/// the previous table is never kept, the whole thing is rebuilt from the
/// current list and selection on every call.
pub fn render(books: &[Book], selection: &Selection) -> String {
    let rows: Vec<[String; 8]> = books
        .iter()
        .map(|book| {
            [
                book.name.clone(),
                book.author.clone(),
                book.genre.clone(),
                book.num_pages.to_string(),
                text_or(book.des_synopsis.as_deref(), SYNOPSIS_PLACEHOLDER),
                text_or(book.des_observacao.as_deref(), NOTE_PLACEHOLDER),
                if book.flg_completed { "Sim" } else { "Não" }.to_owned(),
                format!(
                    "[{}] {}",
                    if selection.is_checked(book.id) { 'x' } else { ' ' },
                    book.id
                ),
            ]
        })
        .collect();

    let mut widths: [usize; 8] = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_owned), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    if books.is_empty() {
        out.push_str("(nenhum livro cadastrado)\n");
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    for (idx, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // pad by chars, not bytes: headers carry accented text
        for _ in cell.chars().count()..*width {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_owned(),
        _ => placeholder.to_owned(),
    }
}
