/// Column-driven ordering of scan results.
///
/// A presentation layer names the column it wants with [`ColumnKind`]
/// rather than a raw grid index, and [`SortState`] turns repeated header
/// clicks into direction toggles.
use crate::model::{magnitude, FileRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A sortable attribute of [`FileRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnKind {
    Name,
    Extension,
    Size,
    DateModified,
    DateAccessed,
    DateCreated,
    Path,
}

impl ColumnKind {
    /// All columns in display order.
    pub const ALL: [ColumnKind; 7] = [
        Self::Name,
        Self::Extension,
        Self::Size,
        Self::DateModified,
        Self::DateAccessed,
        Self::DateCreated,
        Self::Path,
    ];

    /// Column for a zero-based grid index, in display order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Header text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "File",
            Self::Extension => "Extension",
            Self::Size => "Size",
            Self::DateModified => "Date Modified",
            Self::DateAccessed => "Date Accessed",
            Self::DateCreated => "Date Created",
            Self::Path => "Path",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown column name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column '{0}' (expected name, extension, size, modified, accessed, created or path)")]
pub struct UnknownColumn(pub String);

impl FromStr for ColumnKind {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "file" => Ok(Self::Name),
            "extension" | "ext" => Ok(Self::Extension),
            "size" => Ok(Self::Size),
            "modified" | "date-modified" => Ok(Self::DateModified),
            "accessed" | "date-accessed" => Ok(Self::DateAccessed),
            "created" | "date-created" => Ok(Self::DateCreated),
            "path" => Ok(Self::Path),
            _ => Err(UnknownColumn(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// How the Size column is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeOrdering {
    /// Compare the magnitude re-parsed from the rounded display string.
    /// Files that display the same (e.g. 1000 and 1023 bytes, both "1 KB")
    /// compare equal.
    #[default]
    Display,
    /// Compare raw byte counts.
    Bytes,
}

/// How the Path column is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathOrdering {
    /// Compare only the number of leading separator characters of the
    /// parent path. Every absolute Unix path counts 1, so on Unix this
    /// leaves the order unchanged under a stable sort.
    #[default]
    LeadingSeparators,
    /// Ordinal comparison of the full parent path.
    Lexicographic,
}

/// Comparison rules for the columns whose default ordering is lossy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortPolicy {
    pub size: SizeOrdering,
    pub path: PathOrdering,
}

impl SortPolicy {
    /// Raw byte sizes and full path strings.
    pub fn exact() -> Self {
        Self {
            size: SizeOrdering::Bytes,
            path: PathOrdering::Lexicographic,
        }
    }
}

/// Orders records by one column in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparator {
    pub column: ColumnKind,
    pub order: SortOrder,
    pub policy: SortPolicy,
}

impl Comparator {
    pub fn new(column: ColumnKind, order: SortOrder) -> Self {
        Self {
            column,
            order,
            policy: SortPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SortPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn compare(&self, a: &FileRecord, b: &FileRecord) -> Ordering {
        let base = match self.column {
            ColumnKind::Name => a.name().cmp(b.name()),
            ColumnKind::Extension => a.extension().cmp(b.extension()),
            ColumnKind::Size => match self.policy.size {
                SizeOrdering::Display => {
                    magnitude(a.size_display()).total_cmp(&magnitude(b.size_display()))
                }
                SizeOrdering::Bytes => a.size_bytes().cmp(&b.size_bytes()),
            },
            ColumnKind::DateModified => a.modified().cmp(&b.modified()),
            ColumnKind::DateAccessed => a.accessed().cmp(&b.accessed()),
            ColumnKind::DateCreated => a.created().cmp(&b.created()),
            ColumnKind::Path => match self.policy.path {
                PathOrdering::LeadingSeparators => {
                    leading_separators(a.parent_path()).cmp(&leading_separators(b.parent_path()))
                }
                PathOrdering::Lexicographic => a.parent_path().cmp(b.parent_path()),
            },
        };

        match self.order {
            SortOrder::Ascending => base,
            SortOrder::Descending => base.reverse(),
        }
    }

    /// Stable sort of `records` in place.
    pub fn sort(&self, records: &mut [FileRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

/// Compare two records with the default policy.
pub fn compare(a: &FileRecord, b: &FileRecord, column: ColumnKind, order: SortOrder) -> Ordering {
    Comparator::new(column, order).compare(a, b)
}

/// Stable in-place sort with the default policy.
pub fn sort(records: &mut [FileRecord], column: ColumnKind, order: SortOrder) {
    Comparator::new(column, order).sort(records);
}

fn leading_separators(path: &str) -> usize {
    path.chars()
        .take_while(|&c| std::path::is_separator(c))
        .count()
}

/// Remembers the last sorted column so header clicks toggle direction.
///
/// A request for a different column sorts it ascending; a repeated request
/// for the current column flips the direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortState {
    current: Option<(ColumnKind, SortOrder)>,
    pub policy: SortPolicy,
}

impl SortState {
    pub fn new(policy: SortPolicy) -> Self {
        Self {
            current: None,
            policy,
        }
    }

    /// Column and direction of the last sort, if any.
    pub fn current(&self) -> Option<(ColumnKind, SortOrder)> {
        self.current
    }

    /// Record a sort request and return the direction to use.
    pub fn request(&mut self, column: ColumnKind) -> SortOrder {
        let order = match self.current {
            Some((current, order)) if current == column => order.reversed(),
            _ => SortOrder::Ascending,
        };
        self.current = Some((column, order));
        order
    }

    /// Handle a header click: pick the direction and reorder `records`.
    pub fn apply(&mut self, records: &mut [FileRecord], column: ColumnKind) -> SortOrder {
        let order = self.request(column);
        Comparator::new(column, order)
            .with_policy(self.policy)
            .sort(records);
        order
    }
}
