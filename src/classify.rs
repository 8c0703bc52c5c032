use crate::config::ClassificationConfig;
use crate::tracker::Task;

/// Report buckets, in the order they are evaluated and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Active,
    Blocked,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::Active, Bucket::Blocked];

    /// Section header in the report
    pub fn display_name(&self) -> &'static str {
        match self {
            Bucket::Active => "Work In Progress",
            Bucket::Blocked => "Blocked / On Hold",
        }
    }

    /// Key used on the counts line
    pub fn count_label(&self) -> &'static str {
        match self {
            Bucket::Active => "InProgress",
            Bucket::Blocked => "Blocked",
        }
    }
}

/// Tasks partitioned by bucket. Each list keeps fetch order.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    pub active: Vec<&'a Task>,
    pub blocked: Vec<&'a Task>,
}

impl<'a> Buckets<'a> {
    pub fn get(&self, bucket: Bucket) -> &[&'a Task] {
        match bucket {
            Bucket::Active => &self.active,
            Bucket::Blocked => &self.blocked,
        }
    }

    pub fn classified(&self) -> usize {
        self.active.len() + self.blocked.len()
    }
}

/// Lower-cased, trimmed column names for one bucket
struct ColumnSet(Vec<String>);

impl ColumnSet {
    fn new(columns: &[String]) -> Self {
        Self(columns.iter().map(|c| normalize(c)).collect())
    }

    fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|c| c == label)
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Stable partition of `tasks` into active and blocked buckets.
///
/// A task lands in the first bucket whose column set contains its label;
/// tasks matching neither set are left out.
pub fn classify<'a>(tasks: &'a [Task], columns: &ClassificationConfig) -> Buckets<'a> {
    let active = ColumnSet::new(&columns.active_columns);
    let blocked = ColumnSet::new(&columns.blocked_columns);
    let mut buckets = Buckets::default();

    for task in tasks {
        let label = normalize(task.column_label());
        if active.contains(&label) {
            buckets.active.push(task);
        } else if blocked.contains(&label) {
            buckets.blocked.push(task);
        }
    }

    buckets
}
