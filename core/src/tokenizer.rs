/// Split text into whitespace-delimited tokens.
///
/// Tokens are compared byte for byte: no case folding, no Unicode
/// normalization, no stemming. `"Rua"` and `"RUA"` are different tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
