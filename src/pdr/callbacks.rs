/*!
Callbacks associated with a run of the engine.

# Callback types

Callbacks may be mutable functions.
Still, information passed from the engine is non-mutable.

- A progress callback is given the count of cubes in each frame, each time a frame is opened.
- A terminate callback is polled alongside the time limit, and a run ends as undecided when it returns true.
*/

use crate::{pdr::Pdr, sat::SatOracle};

pub type CallbackProgress = dyn FnMut(&[usize]);

pub type CallbackTerminate = dyn FnMut() -> bool;

impl<S: SatOracle> Pdr<'_, S> {
    pub fn set_callback_progress(&mut self, callback: Box<CallbackProgress>) {
        self.callback_progress = Some(callback);
    }

    pub fn set_callback_terminate(&mut self, callback: Box<CallbackTerminate>) {
        self.callback_terminate = Some(callback);
    }

    pub(super) fn make_callback_progress(&mut self) {
        if let Some(callback) = &mut self.callback_progress {
            let sizes: Vec<usize> = self.frames.iter().map(|frame| frame.len()).collect();
            callback(&sizes);
        }
    }

    pub(super) fn check_callback_terminate(&mut self) -> bool {
        if let Some(callback) = &mut self.callback_terminate {
            callback()
        } else {
            false
        }
    }
}
