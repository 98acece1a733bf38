/// A single paragraph unit produced by segmentation.
///
/// `index` is the stable document position; paragraphs are never merged
/// or reordered. Dropping a paragraph flips `keep` instead of removing
/// the entry, so indices in the action log stay valid for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub index: usize,
    pub text: String,
    pub keep: bool,
}

/// Single-owner arena of paragraphs with tombstone deletion.
#[derive(Debug, Clone, Default)]
pub struct ParagraphArena {
    paragraphs: Vec<Paragraph>,
}

impl ParagraphArena {
    pub fn from_texts(texts: Vec<String>) -> Self {
        let paragraphs = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Paragraph { index, text, keep: true })
            .collect();
        Self { paragraphs }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn text(&self, index: usize) -> &str {
        &self.paragraphs[index].text
    }

    pub fn is_kept(&self, index: usize) -> bool {
        self.paragraphs[index].keep
    }

    /// Tombstone a paragraph. Returns true if it was kept before the
    /// call, i.e. the flag actually transitioned.
    pub fn tombstone(&mut self, index: usize) -> bool {
        let was_kept = self.paragraphs[index].keep;
        self.paragraphs[index].keep = false;
        was_kept
    }

    /// Replace the text of a paragraph in place; index and keep flag
    /// are untouched.
    pub fn replace_text(&mut self, index: usize, text: String) {
        self.paragraphs[index].text = text;
    }

    /// Kept paragraphs in document order.
    pub fn kept(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter().filter(|p| p.keep)
    }

    /// Indices of kept paragraphs in document order.
    pub fn kept_indices(&self) -> Vec<usize> {
        self.paragraphs
            .iter()
            .filter(|p| p.keep)
            .map(|p| p.index)
            .collect()
    }

    pub fn kept_count(&self) -> usize {
        self.paragraphs.iter().filter(|p| p.keep).count()
    }

    /// Texts of kept paragraphs in document order.
    pub fn kept_texts(&self) -> Vec<&str> {
        self.paragraphs
            .iter()
            .filter(|p| p.keep)
            .map(|p| p.text.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter()
    }
}
