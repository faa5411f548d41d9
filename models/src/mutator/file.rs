use crate::field::registry::FieldRegistry;
use crate::field::{ChangeTracker, FieldSet, accept_snapshot, assign, sync};
use crate::files::{FileStat, Priority};
use crate::mutator::AssignFrom;

use once_cell::sync::Lazy;

/// Pending change to one file of a torrent (the file grid's editable cells).
///
/// Not sent on its own: fold it into a [`crate::TorrentMutator`] with
/// [`crate::TorrentMutator::apply_file_change`].
#[derive(Debug, Clone, Default)]
pub struct FileStatMutator {
    pub wanted: Option<bool>,
    pub priority: Option<i32>,
    changes: ChangeTracker,
}

impl FileStatMutator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn priority_kind(&self) -> Option<Priority> {
        self.priority.map(Priority::from_raw)
    }
}

static FILE_STAT_FIELDS: Lazy<FieldRegistry<FileStatMutator>> = Lazy::new(|| {
    FieldRegistry::<FileStatMutator>::builder()
        .field("wanted", |m, v, f| assign(&mut m.wanted, v, f))
        .field("priority", |m, v, f| assign(&mut m.priority, v, f))
        .derives("priority", &["priorityKind"])
        .build()
});

impl FieldSet for FileStatMutator {
    fn registry() -> &'static FieldRegistry<Self> {
        &FILE_STAT_FIELDS
    }

    fn tracker(&self) -> &ChangeTracker {
        &self.changes
    }

    fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.changes
    }
}

impl AssignFrom<FileStat> for FileStatMutator {
    fn assign_from(&mut self, source: &FileStat) {
        let mut changed = Vec::new();
        sync(&mut self.wanted, &Some(source.wanted), "wanted", &mut changed);
        sync(&mut self.priority, &Some(source.priority), "priority", &mut changed);
        accept_snapshot(self, &changed);
    }
}

impl AssignFrom<FileStatMutator> for FileStatMutator {
    fn assign_from(&mut self, source: &FileStatMutator) {
        let mut changed = Vec::new();
        sync(&mut self.wanted, &source.wanted, "wanted", &mut changed);
        sync(&mut self.priority, &source.priority, "priority", &mut changed);
        accept_snapshot(self, &changed);
    }
}
