// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-facing notices for recovered faults

/// Receiver of single, human-readable notices
///
/// The UI layer shows each notice once (a modal in desktop front ends).
/// Recovered faults are also logged, so a sink may simply discard them.
pub trait NoticeSink {
    fn notice(&mut self, message: &str);
}

impl NoticeSink for Vec<String> {
    fn notice(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Sink that drops every notice
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardNotices;

impl NoticeSink for DiscardNotices {
    fn notice(&mut self, _message: &str) {}
}
