//! Single-pass literal marker detection using Aho-Corasick.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;

/// Literal markers the check battery looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Marker {
    TryBlock,
    Catch,
    BroadcastLower,
    BroadcastUpper,
    ConsoleLog,
    ConsoleError,
    SupabaseLower,
    SupabaseUpper,
    QueryKeyColon,
    QueryKeyAssign,
    OnMutate,
    OnError,
    InvalidateQueries,
    IsLoading,
    IsPending,
    Interface,
    TypeKeyword,
    DocComment,
    Star,
    Import,
    NamedImport,
}

/// Pattern text, indexed by `Marker as usize`.
const MARKER_TEXT: [&str; 21] = [
    "try {",
    "catch",
    "broadcast",
    "Broadcast",
    "console.log",
    "console.error",
    "supabase",
    "Supabase",
    "queryKey:",
    "queryKey =",
    "onMutate",
    "onError",
    "invalidateQueries",
    "isLoading",
    "isPending",
    "interface",
    "type ",
    "/**",
    "*",
    "import ",
    "import { ",
];

static MATCHER: LazyLock<Option<AhoCorasick>> =
    LazyLock::new(|| AhoCorasick::new(MARKER_TEXT).ok());

/// Which markers occur at least once in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerSet {
    present: [bool; MARKER_TEXT.len()],
}

impl MarkerSet {
    /// Scan `text` once, recording every marker that occurs.
    ///
    /// Overlapping search so that `import ` and `import { ` are both seen
    /// at the same position.
    pub fn scan(text: &str) -> Self {
        let mut set = Self::default();
        let Some(ac) = MATCHER.as_ref() else {
            for (i, needle) in MARKER_TEXT.iter().enumerate() {
                set.present[i] = text.contains(needle);
            }
            return set;
        };
        for m in ac.find_overlapping_iter(text) {
            set.present[m.pattern().as_usize()] = true;
        }
        set
    }

    pub fn has(&self, marker: Marker) -> bool {
        self.present[marker as usize]
    }

    pub fn any(&self, markers: &[Marker]) -> bool {
        markers.iter().any(|m| self.has(*m))
    }

    pub fn all(&self, markers: &[Marker]) -> bool {
        markers.iter().all(|m| self.has(*m))
    }
}
