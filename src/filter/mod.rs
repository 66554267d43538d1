mod dom;

pub(crate) use dom::attach_list_filters;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    Mark(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FilteredItem {
    pub visible: bool,
    pub segments: Vec<Segment>,
}

/// Filter + highlight over a snapshot of item texts taken once at attach time.
///
/// Every call renders from the snapshot, never from what a previous call produced.
#[derive(Clone, Debug, Default)]
pub(crate) struct ListFilter {
    items: Vec<String>,
}

impl ListFilter {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    #[cfg(test)]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn apply(&self, query: &str) -> Vec<FilteredItem> {
        let needle: Vec<char> = query.trim().chars().collect();
        self.items
            .iter()
            .map(|text| {
                if needle.is_empty() {
                    return FilteredItem {
                        visible: true,
                        segments: vec![Segment::Text(text.clone())],
                    };
                }
                let segments = highlight(text, &needle);
                let visible = segments.iter().any(|s| matches!(s, Segment::Mark(_)));
                FilteredItem { visible, segments }
            })
            .collect()
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte length of the match of `needle` at the start of `hay`, if any.
fn match_len(hay: &str, needle: &[char]) -> Option<usize> {
    let mut chars = hay.char_indices();
    for &n in needle {
        let (_, c) = chars.next()?;
        if !chars_eq_ignore_case(c, n) {
            return None;
        }
    }
    Some(chars.next().map(|(i, _)| i).unwrap_or(hay.len()))
}

/// Split `text` into alternating plain and marked runs covering it exactly.
fn highlight(text: &str, needle: &[char]) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < text.len() {
        if let Some(len) = match_len(&text[i..], needle) {
            if i > plain_start {
                out.push(Segment::Text(text[plain_start..i].to_string()));
            }
            out.push(Segment::Mark(text[i..i + len].to_string()));
            i += len;
            plain_start = i;
            continue;
        }

        // Advance one char.
        i += text[i..].chars().next().map(char::len_utf8).unwrap_or(1);
    }

    if plain_start < text.len() || out.is_empty() {
        out.push(Segment::Text(text[plain_start..].to_string()));
    }
    out
}
