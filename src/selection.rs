use std::collections::BTreeSet;

/// Selection policy violations. These are user notices, never fatal: the
/// operation that hit one aborts and the state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("selecione um livro")]
    NoneSelected,
    #[error("selecione apenas um livro")]
    MultipleSelected,
    #[error("selecione ao menos um livro para deletar")]
    NoneToDelete,
}

/// The set of checked table rows, keyed by book id. Purely UI-local: the
/// table rebuild on every list fetch discards it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    checked: BTreeSet<u64>,
}

impl Selection {
    /// Flips the checkbox for `id` and returns the new checked state.
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.checked.remove(&id) {
            false
        } else {
            self.checked.insert(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }

    pub fn is_checked(&self, id: u64) -> bool {
        self.checked.contains(&id)
    }

    /// Single-selection policy, used before loading a book into the form.
    pub fn single(&self) -> Result<u64, SelectionError> {
        let mut ids = self.checked.iter();
        let first = ids.next().copied().ok_or(SelectionError::NoneSelected)?;
        if ids.next().is_some() {
            return Err(SelectionError::MultipleSelected);
        }
        Ok(first)
    }

    /// Multi-selection policy, used before deleting.
    pub fn at_least_one(&self) -> Result<Vec<u64>, SelectionError> {
        if self.checked.is_empty() {
            return Err(SelectionError::NoneToDelete);
        }
        Ok(self.checked.iter().copied().collect())
    }
}
