//! Undo/redo over a command log. Instead of storing a full configuration
//! snapshot per edit, each entry stores the command that produced it, and a
//! materialized snapshot every `SNAPSHOT_INTERVAL` entries so reconstruction
//! replays at most a handful of commands. The first entry is always a
//! snapshot. Capacity is bounded: once full, the oldest entry is evicted and
//! the new head is materialized so replay can still start from it.

use crate::builder::command::EditCommand;

const SNAPSHOT_INTERVAL: usize = 10;
const CAPACITY: usize = 50;

struct Entry<C, Cmd> {
    command: Option<Cmd>,
    snapshot: Option<C>,
}

pub struct EditHistory<C, Cmd> {
    entries: Vec<Entry<C, Cmd>>,
    index: usize,
}

impl<C, Cmd> EditHistory<C, Cmd>
where
    C: Clone,
    Cmd: EditCommand<C>,
{
    pub fn new(initial: C) -> Self {
        Self {
            entries: vec![Entry {
                command: None,
                snapshot: Some(initial),
            }],
            index: 0,
        }
    }

    /// Apply `command` to the current configuration and record it, discarding
    /// any undone future.
    pub fn commit(&mut self, command: Cmd) -> C {
        let next = command.apply(&self.config_at(self.index));
        self.entries.truncate(self.index + 1);
        let snapshot = if (self.entries.len()) % SNAPSHOT_INTERVAL == 0 {
            Some(next.clone())
        } else {
            None
        };
        self.entries.push(Entry {
            command: Some(command),
            snapshot,
        });
        if self.entries.len() > CAPACITY {
            // Materialize the new head before dropping the old one so every
            // reachable entry still has a snapshot at or before it.
            let head = self.config_at(1);
            self.entries.remove(0);
            self.entries[0] = Entry {
                command: None,
                snapshot: Some(head),
            };
        }
        self.index = self.entries.len() - 1;
        next
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Step back one entry. Returns the restored configuration, or `None` at
    /// the start of history.
    pub fn undo(&mut self) -> Option<C> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.config_at(self.index))
    }

    /// Step forward one entry. Returns the restored configuration, or `None`
    /// when there is no undone future.
    pub fn redo(&mut self) -> Option<C> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.config_at(self.index))
    }

    pub fn current(&self) -> C {
        self.config_at(self.index)
    }

    /// Reconstruct the configuration at entry `index` by replaying commands
    /// forward from the nearest snapshot at or before it.
    fn config_at(&self, index: usize) -> C {
        let base = (0..=index)
            .rev()
            .find(|&i| self.entries[i].snapshot.is_some())
            .unwrap_or(0);
        // Entry 0 always holds a snapshot.
        let mut config = self.entries[base]
            .snapshot
            .as_ref()
            .cloned()
            .unwrap_or_else(|| unreachable!());
        for entry in &self.entries[base + 1..=index] {
            if let Some(command) = &entry.command {
                config = command.apply(&config);
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::command::{BlockCommand, FormCommand};
    use crate::model::form::FormConfig;
    use crate::model::payslip::{BlockKind, PayslipConfig};

    fn add(n: usize) -> BlockCommand {
        BlockCommand::AddBlock {
            id: format!("b{n}"),
            kind: BlockKind::Text,
        }
    }

    #[test]
    fn undo_restores_the_previous_state_exactly() {
        let mut history = EditHistory::new(PayslipConfig::default());
        let after_one = history.commit(add(1));
        let after_two = history.commit(add(2));
        assert_eq!(history.current(), after_two);
        assert_eq!(history.undo(), Some(after_one.clone()));
        assert_eq!(history.redo(), Some(after_two));
        assert_eq!(history.undo(), Some(after_one));
        assert_eq!(history.undo(), Some(PayslipConfig::default()));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn committing_after_undo_discards_the_future() {
        let mut history = EditHistory::new(PayslipConfig::default());
        history.commit(add(1));
        history.commit(add(2));
        history.undo();
        let branched = history.commit(add(3));
        assert!(!history.can_redo());
        let ids: Vec<&str> = branched.sections.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b3"]);
    }

    #[test]
    fn reconstruction_crosses_snapshot_boundaries() {
        let mut history = EditHistory::new(PayslipConfig::default());
        for n in 1..=25 {
            history.commit(add(n));
        }
        assert_eq!(history.current().sections.len(), 25);
        for _ in 0..12 {
            history.undo();
        }
        assert_eq!(history.current().sections.len(), 13);
        for _ in 0..12 {
            history.redo();
        }
        assert_eq!(history.current().sections.len(), 25);
    }

    #[test]
    fn capacity_evicts_the_oldest_entries() {
        let mut history = EditHistory::new(PayslipConfig::default());
        for n in 1..=60 {
            history.commit(add(n));
        }
        assert_eq!(history.current().sections.len(), 60);
        // Only 49 undos remain: the initial state and the first ten edits
        // have been evicted.
        let mut undos = 0;
        while history.undo().is_some() {
            undos += 1;
        }
        assert_eq!(undos, 49);
        assert_eq!(history.current().sections.len(), 11);
    }

    #[test]
    fn works_for_form_configs_too() {
        let mut history = EditHistory::new(FormConfig::default());
        history.commit(FormCommand::AddSection { id: "s1".into() });
        let current = history.commit(FormCommand::AddField {
            id: "f1".into(),
            db_key: "custom_f1".into(),
            field_type: Default::default(),
            section_id: "s1".into(),
        });
        assert_eq!(current.fields.len(), 1);
        let undone = history.undo().unwrap();
        assert!(undone.fields.is_empty());
        assert_eq!(undone.sections.len(), 1);
    }
}
