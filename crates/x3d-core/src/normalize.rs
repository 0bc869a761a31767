//! Text normalization hooks for attribute values

use std::borrow::Cow;

/// Force a whitespace-separated list to an even number of tokens.
///
/// Even input (including empty) is returned untouched. Odd input loses its
/// trailing unpaired token and the remaining tokens are joined by single
/// spaces.
pub fn even_token_count(text: &str) -> Cow<'_, str> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() % 2 == 0 {
        return Cow::Borrowed(text);
    }

    tracing::debug!(
        "dropping unpaired token '{}' from '{}'",
        tokens[tokens.len() - 1],
        text
    );
    Cow::Owned(tokens[..tokens.len() - 1].join(" "))
}
