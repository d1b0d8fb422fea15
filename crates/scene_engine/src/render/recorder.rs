//! Finished frame history

use super::commands::Frame;

/// Keeps the most recent finished frame and the debug text printed for it
#[derive(Debug, Default)]
pub struct FrameRecorder {
    last_frame: Option<Frame>,
    debug_lines: Vec<String>,
    frames_recorded: u64,
}

impl FrameRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished frame, replacing the previous one
    pub fn record(&mut self, frame: Frame, debug_lines: Vec<String>) {
        log::trace!(
            "Frame {}: {} commands, {} debug lines",
            frame.number,
            frame.commands.len(),
            debug_lines.len()
        );
        self.last_frame = Some(frame);
        self.debug_lines = debug_lines;
        self.frames_recorded += 1;
    }

    /// Most recent frame
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Debug text printed during the most recent frame
    pub fn debug_lines(&self) -> &[String] {
        &self.debug_lines
    }

    /// Frames recorded since creation
    pub fn frames_recorded(&self) -> u64 {
        self.frames_recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_latest_frame() {
        let mut recorder = FrameRecorder::new();
        assert!(recorder.last_frame().is_none());

        recorder.record(Frame { number: 0, commands: Vec::new() }, vec!["Value:1".to_string()]);
        recorder.record(Frame { number: 1, commands: Vec::new() }, vec!["Value:2".to_string()]);

        assert_eq!(recorder.last_frame().map(|f| f.number), Some(1));
        assert_eq!(recorder.debug_lines(), ["Value:2".to_string()]);
        assert_eq!(recorder.frames_recorded(), 2);
    }
}
