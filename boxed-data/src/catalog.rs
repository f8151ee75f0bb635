//! Fixed object catalog and dataset-wide constants.

/// Number of the first participant whose first scene contains unique objects
/// only (earlier recordings predate that feature).
pub const UNIQUE_OBJECTS_THRESHOLD: u32 = 26;

/// Sentinel prepended to packing sequences on request.
pub const START_TOKEN: &str = "<start>";

/// Every object name appearing in the dataset.
pub const ALL_OBJECT_NAMES: [&str; 24] = [
    "002 masterchef can",
    "003 cracker box",
    "004 sugar box",
    "005 tomato soup can",
    "006 mustard bottle",
    "007 tuna fish can",
    "008 pudding box",
    "010 potted meat can",
    "011 banana",
    "012 strawberry",
    "013 apple",
    "014 lemon",
    "015 peach",
    "016 pear",
    "017 orange",
    "018 plum",
    "021 bleach cleanser",
    "025 mug",
    "057 racquetball",
    "058 golf ball",
    "100 half egg carton",
    "101 bread",
    "102 toothbrush",
    "103 toothpaste",
];

/// The set of valid object names plus the unique-objects threshold.
///
/// Queries validate object selections against this catalog. It is passed
/// into the dataset facade explicitly rather than read from global state, so
/// callers with a customized dataset tree can substitute their own.
#[derive(Debug, Clone)]
pub struct ObjectCatalog {
    names: Vec<String>,
    /// First participant number with a unique-objects-only first scene.
    pub unique_objects_threshold: u32,
}

impl ObjectCatalog {
    /// Create a catalog from an explicit name list and threshold.
    pub fn new(names: Vec<String>, unique_objects_threshold: u32) -> Self {
        Self {
            names,
            unique_objects_threshold,
        }
    }

    /// All valid object names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is a valid object name.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Default for ObjectCatalog {
    fn default() -> Self {
        Self {
            names: ALL_OBJECT_NAMES.iter().map(|s| s.to_string()).collect(),
            unique_objects_threshold: UNIQUE_OBJECTS_THRESHOLD,
        }
    }
}
