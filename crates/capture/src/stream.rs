//! Landmark frames read from a line-oriented JSON stream.
//!
//! Each line holds the hands of one video frame as a JSON array of
//! 21-point landmark lists, typically piped in from an external detector
//! process. `[]` is a frame without hands; blank lines carry no frame.

use std::io::BufRead;

use handsign_common::error::{HandsignError, HandsignResult};
use handsign_hand_model::landmark::LandmarkFrame;

use crate::{DetectedHand, HandDetector};

pub struct JsonLinesDetector<R> {
    reader: R,
    line: String,
    lines_read: u64,
    finished: bool,
}

impl<R: BufRead + Send> JsonLinesDetector<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            lines_read: 0,
            finished: false,
        }
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl<R: BufRead + Send> HandDetector for JsonLinesDetector<R> {
    fn detect(&mut self) -> HandsignResult<Option<Vec<DetectedHand>>> {
        if self.finished {
            return Ok(None);
        }

        self.line.clear();
        let read = match self.reader.read_line(&mut self.line) {
            Ok(read) => read,
            Err(e) => {
                self.finished = true;
                return Err(HandsignError::detector(format!("frame stream read failed: {e}")));
            }
        };
        if read == 0 {
            self.finished = true;
            return Ok(None);
        }
        self.lines_read += 1;

        let line = self.line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let line_number = self.lines_read;
        let frames: Vec<LandmarkFrame> = serde_json::from_str(line).map_err(|e| {
            HandsignError::detector(format!("frame stream line {line_number}: {e}"))
        })?;
        Ok(Some(DetectedHand::enumerate(frames)))
    }

    fn name(&self) -> &str {
        "json-lines"
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
