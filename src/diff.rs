//! Line classification for unified-diff style text.
//!
//! The diff is never parsed structurally: each line is classified by its
//! prefix so the viewer can style it.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffLineKind {
    /// `---` / `+++` file headers.
    FileHeader,
    /// `@@ ... @@` hunk headers.
    HunkHeader,
    Addition,
    Deletion,
    Context,
}

impl DiffLineKind {
    pub fn as_class(self) -> &'static str {
        match self {
            DiffLineKind::FileHeader => "diff-line file-header",
            DiffLineKind::HunkHeader => "diff-line hunk-header",
            DiffLineKind::Addition => "diff-line addition",
            DiffLineKind::Deletion => "diff-line deletion",
            DiffLineKind::Context => "diff-line context",
        }
    }

    /// Gutter marker shown in front of the text, if any.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            DiffLineKind::Addition => Some("+"),
            DiffLineKind::Deletion => Some("-"),
            DiffLineKind::Context => Some(" "),
            DiffLineKind::FileHeader | DiffLineKind::HunkHeader => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffLine<'a> {
    pub kind: DiffLineKind,
    pub text: &'a str,
}

pub fn classify_line(line: &str) -> DiffLine<'_> {
    if line.starts_with("---") || line.starts_with("+++") {
        return DiffLine {
            kind: DiffLineKind::FileHeader,
            text: line,
        };
    }
    if line.starts_with("@@") {
        return DiffLine {
            kind: DiffLineKind::HunkHeader,
            text: line,
        };
    }
    if let Some(rest) = line.strip_prefix('+') {
        return DiffLine {
            kind: DiffLineKind::Addition,
            text: rest,
        };
    }
    if let Some(rest) = line.strip_prefix('-') {
        return DiffLine {
            kind: DiffLineKind::Deletion,
            text: rest,
        };
    }
    DiffLine {
        kind: DiffLineKind::Context,
        text: line,
    }
}

pub fn parse_diff(content: &str) -> Vec<DiffLine<'_>> {
    content
        .split('\n')
        .map(|line| classify_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
}

impl DiffStats {
    pub fn from_lines(lines: &[DiffLine<'_>]) -> Self {
        lines.iter().fold(Self::default(), |mut stats, line| {
            match line.kind {
                DiffLineKind::Addition => stats.additions += 1,
                DiffLineKind::Deletion => stats.deletions += 1,
                _ => {}
            }
            stats
        })
    }

    pub fn summary(&self) -> String {
        format!("+{} • -{}", self.additions, self.deletions)
    }
}
