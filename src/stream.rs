use crate::ast::Token;

/// Ordered tokens with a movable cursor.
///
/// Lookahead never copies the stream: take a [`mark`](TokenStream::mark),
/// probe forward, then [`reset`](TokenStream::reset) to it or simply keep going.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, cursor: 0 }
    }

    /// Returns the token under the cursor and moves past it.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Next token that is not whitespace, a newline or a comment, without moving.
    pub fn peek_significant(&self) -> Option<&Token> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|t| !t.is_ignorable())
    }

    /// Moves past ignorable tokens and returns the next significant one.
    pub fn next_significant(&mut self) -> Option<Token> {
        while let Some(token) = self.next_token() {
            if !token.is_ignorable() {
                return Some(token);
            }
        }
        None
    }

    pub fn mark(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self, mark: usize) {
        self.cursor = mark.min(self.tokens.len());
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
