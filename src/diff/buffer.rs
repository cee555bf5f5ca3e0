//! Lock-free single-writer / single-reader split of the diff processor.
//!
//! The writer builds each immutable [`DiffState`] on its own thread and
//! publishes it through a triple buffer. The reader always interpolates the
//! most recently published state, skipping stale intermediates, and never
//! blocks the writer.

use std::fmt;
use std::sync::Arc;

use super::processor::DiffProcessor;
use super::state::DiffState;
use crate::data::Series;

/// Create a connected writer/reader pair with nothing committed.
#[must_use]
pub fn diff_channel() -> (DiffWriter, DiffReader) {
    let (input, output) = triple_buffer::triple_buffer(&Arc::new(DiffState::empty()));
    (
        DiffWriter {
            processor: DiffProcessor::new(),
            input,
        },
        DiffReader { output },
    )
}

/// Producer half: commits datasets and publishes their diff states.
pub struct DiffWriter {
    processor: DiffProcessor,
    input: triple_buffer::Input<Arc<DiffState>>,
}

impl DiffWriter {
    /// Commit `new`, rebasing on the previously committed target.
    pub fn set_entries(&mut self, new: Vec<Series>) {
        self.processor.set_entries(new);
        self.publish();
    }

    /// Commit `new`, diffing it against an explicit `old` dataset.
    pub fn set_entries_between(&mut self, old: &[Series], new: Vec<Series>) {
        self.processor.set_entries_between(old, new);
        self.publish();
    }

    /// The last committed target dataset.
    #[must_use]
    pub fn snapshot(&self) -> &[Series] {
        self.processor.snapshot()
    }

    fn publish(&mut self) {
        self.input.write(Arc::clone(self.processor.state()));
    }
}

/// Consumer half: interpolates the latest published state.
pub struct DiffReader {
    output: triple_buffer::Output<Arc<DiffState>>,
}

impl DiffReader {
    /// Interpolated dataset at `progress` for the latest published state.
    pub fn progress_diff(&mut self, progress: f32) -> Vec<Series> {
        self.state().materialize(progress)
    }

    /// Latest published diff state.
    pub fn state(&mut self) -> Arc<DiffState> {
        let _ = self.output.update();
        Arc::clone(self.output.output_buffer_mut())
    }
}

impl fmt::Debug for DiffWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffWriter")
            .field("processor", &self.processor)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for DiffReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffReader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn series(points: &[(f32, f32)]) -> Series {
        Series::from(points.to_vec())
    }

    #[test]
    fn reader_starts_empty() {
        let (_writer, mut reader) = diff_channel();
        assert!(reader.progress_diff(0.5).is_empty());
    }

    #[test]
    fn reader_sees_latest_commit() {
        let (mut writer, mut reader) = diff_channel();
        writer.set_entries(vec![series(&[(0.0, 2.0), (1.0, 0.0)])]);
        writer.set_entries(vec![series(&[(0.0, 0.0), (1.0, 2.0)])]);

        assert_eq!(
            reader.progress_diff(0.5),
            vec![series(&[(0.0, 1.0), (1.0, 1.0)])]
        );
        assert_eq!(reader.progress_diff(0.5), reader.progress_diff(0.5));
        assert_eq!(writer.snapshot(), &[series(&[(0.0, 0.0), (1.0, 2.0)])]);
    }

    #[test]
    fn explicit_old_snapshot_is_respected() {
        let (mut writer, mut reader) = diff_channel();
        writer.set_entries_between(
            &[series(&[(0.0, 1.0), (1.0, 1.0)])],
            vec![series(&[(0.0, 1.0)])],
        );
        assert_eq!(reader.progress_diff(1.0), vec![series(&[(0.0, 1.0)])]);
    }

    #[test]
    fn writer_thread_and_reader_thread() {
        let (mut writer, mut reader) = diff_channel();
        let handle = thread::spawn(move || {
            for i in 0..100 {
                let value = i as f32;
                writer.set_entries(vec![series(&[(0.0, value), (1.0, value)])]);
            }
        });

        for _ in 0..1000 {
            for frame in reader.progress_diff(0.25) {
                let values: Vec<f32> = frame.values().collect();
                assert_eq!(values.len(), 2);
                assert_eq!(values[0], values[1]);
            }
        }
        handle.join().unwrap();
        assert_eq!(
            reader.progress_diff(1.0),
            vec![series(&[(0.0, 99.0), (1.0, 99.0)])]
        );
    }
}
