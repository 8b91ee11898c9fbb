use itertools::Itertools;

pub const DEFAULT_TRACKED: [&str; 5] = [
    "src/CollectibleCast.sol",
    "src/Metadata.sol",
    "src/Minter.sol",
    "src/TransferValidator.sol",
    "src/Auction.sol",
];

// forge init template contract
pub const DEFAULT_IGNORED: [&str; 1] = ["src/Counter.sol"];

pub const DEFAULT_SOURCE_PREFIX: &str = "src/";

pub const DEFAULT_COMMAND: [&str; 4] = ["forge", "coverage", "--report", "summary"];

/// Ordered production files that must be fully covered. Duplicates are
/// dropped, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFiles(Vec<String>);

impl TrackedFiles {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(files.into_iter().map(Into::into).unique().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|file| file == path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for TrackedFiles {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKED)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    pub tracked: TrackedFiles,
    /// Source files left out of the "not tracked" listing.
    pub ignored: Vec<String>,
    /// Marks a report path as production source.
    pub source_prefix: String,
    /// Treat tracked files absent from the report as failures.
    pub fail_on_missing: bool,
    /// Program followed by its arguments.
    pub command: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            tracked: TrackedFiles::default(),
            ignored: DEFAULT_IGNORED.iter().map(|file| file.to_string()).collect(),
            source_prefix: DEFAULT_SOURCE_PREFIX.to_string(),
            fail_on_missing: false,
            command: DEFAULT_COMMAND.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl GateConfig {
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignored.iter().any(|file| file == path)
    }
}
