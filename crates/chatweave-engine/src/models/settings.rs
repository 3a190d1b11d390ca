/// Host-supplied knobs that cross the engine boundary.
///
/// Everything else the engine needs lives inside the block itself
/// (directives, metadata); this comes from the embedding application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Swap the alignment of the `>` and `<` prefix glyphs. The glyph-to-side
    /// mapping has flipped between historical variants of this markup, so it
    /// is a user preference rather than a constant.
    pub reverse_arrows: bool,
}
