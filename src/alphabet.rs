use itertools::Itertools;

use crate::{math::OrderedSet, Show};

/// A symbol is a single character of the input.
pub type Symbol = char;

/// Represents an alphabet where a [`Symbol`] is just a single `char`. The order in which symbols
/// were given is preserved, duplicates are dropped.
///
/// # Example
/// ```
/// use stateflow::prelude::*;
///
/// let alphabet = CharAlphabet::from("abca");
/// assert_eq!(alphabet.size(), 3);
/// assert_eq!(alphabet.universe().collect::<String>(), "abc");
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, Default)]
pub struct CharAlphabet(Vec<Symbol>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] from the given symbols, keeping the first occurrence
    /// of each one.
    pub fn new<I: IntoIterator<Item = Symbol>>(symbols: I) -> Self {
        Self(symbols.into_iter().unique().collect())
    }

    /// Creates a new [`CharAlphabet`] of the given size. The symbols are just the first `size`
    /// letters of the latin alphabet, so at most 26 symbols are produced.
    pub fn of_size(size: usize) -> Self {
        Self((b'a'..=b'z').take(size).map(char::from).collect())
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no symbol is defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the symbols in their given order.
    pub fn universe(&self) -> impl DoubleEndedIterator<Item = Symbol> + '_ {
        self.0.iter().copied()
    }

    /// Checks whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.contains(&symbol)
    }

    /// Returns the position of `symbol` in the alphabet, if it is present.
    pub fn position(&self, symbol: Symbol) -> Option<usize> {
        self.0.iter().position(|s| *s == symbol)
    }

    /// Checks whether every symbol of `label` belongs to the alphabet.
    pub fn covers(&self, label: &SymbolSet) -> bool {
        label.symbols().all(|sym| self.contains(sym))
    }

    /// Returns the first character of `word` that is not part of the alphabet together with
    /// its position (counted in characters), or `None` if the whole word is valid input.
    pub fn first_foreign(&self, word: &str) -> Option<(usize, Symbol)> {
        word.chars().enumerate().find(|(_, sym)| !self.contains(*sym))
    }
}

impl From<&str> for CharAlphabet {
    fn from(value: &str) -> Self {
        Self::new(value.chars())
    }
}

impl From<Vec<char>> for CharAlphabet {
    fn from(value: Vec<char>) -> Self {
        Self::new(value)
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Show for CharAlphabet {
    fn show(&self) -> String {
        format!("{{{}}}", self.0.iter().join(", "))
    }
}

/// The label of an edge. A label is a set of symbols, each of which triggers the edge on
/// its own. So a label `"ab"` is matched by `'a'` and by `'b'`, but never by the word `"ab"`.
/// Repeated symbols collapse, the insertion order is kept for display.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SymbolSet(OrderedSet<Symbol>);

impl SymbolSet {
    /// Creates an empty label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `symbol` triggers this label.
    pub fn matched_by(&self, symbol: Symbol) -> bool {
        self.0.contains(&symbol)
    }

    /// Iterates over the distinct symbols of the label.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().copied()
    }

    /// Adds all symbols of `other` that are not yet present. Returns `true` if at least one
    /// symbol was new.
    pub fn extend_from(&mut self, other: &SymbolSet) -> bool {
        let before = self.0.len();
        self.0.extend(other.symbols());
        self.0.len() > before
    }

    /// Returns the number of distinct symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the label holds no symbol at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SymbolSet {
    fn from(value: &str) -> Self {
        value.chars().collect()
    }
}

impl From<char> for SymbolSet {
    fn from(value: char) -> Self {
        std::iter::once(value).collect()
    }
}

impl FromIterator<char> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Show for SymbolSet {
    fn show(&self) -> String {
        self.0.iter().join(",")
    }
}
