// src/guard/sync_guard/mock.rs

//! Scriptable channel and sink doubles shared by the guard tests.

use crate::common::{
    config::PortConfig,
    hal_traits::{ByteChannel, DiagnosticSink, OpenError, Severity},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

/// One call made on the channel, in the order the guard made it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Open,
    Close,
    Write(Vec<u8>),
    Read(usize),
    SetConfig(PortConfig),
}

// --- Mock Interface ---
pub(crate) struct MockChannel {
    pub open: bool,
    /// Outcomes of successive `open` calls; `Ok(())` once exhausted.
    pub open_results: VecDeque<Result<(), OpenError<MockCommError>>>,
    pub close_result: Result<(), MockCommError>,
    /// Outcomes of successive `read` calls; `Ok(0)` once exhausted.
    pub read_script: VecDeque<nb::Result<Vec<u8>, MockCommError>>,
    /// Max bytes accepted per `write` call.
    pub write_chunk: usize,
    /// Total bytes accepted before every further write returns `Ok(0)`.
    pub write_limit: Option<usize>,
    /// Number of `WouldBlock` results before writes are accepted.
    pub write_would_block: usize,
    /// Writes fail with this error when set.
    pub write_error: Option<MockCommError>,
    pub written: Vec<u8>,
    pub config: PortConfig,
    /// Sleep inside every read/write so unsynchronised callers would overlap.
    pub call_delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl MockChannel {
    pub fn new() -> Self {
        MockChannel {
            open: false,
            open_results: VecDeque::new(),
            close_result: Ok(()),
            read_script: VecDeque::new(),
            write_chunk: usize::MAX,
            write_limit: None,
            write_would_block: 0,
            write_error: None,
            written: Vec::new(),
            config: PortConfig::default(),
            call_delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn opened() -> Self {
        let mut mock = Self::new();
        mock.open = true;
        mock
    }

    /// Queues `data` to be delivered in reads of at most `chunk` bytes.
    pub fn stage_read_data(&mut self, data: &[u8], chunk: usize) {
        for piece in data.chunks(chunk) {
            self.read_script.push_back(Ok(piece.to_vec()));
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn pause(&self) {
        if let Some(delay) = self.call_delay {
            thread::sleep(delay);
        }
    }
}

impl ByteChannel for MockChannel {
    type Error = MockCommError;

    fn name(&self) -> &str {
        "COM3"
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) -> Result<(), OpenError<Self::Error>> {
        self.record(Call::Open);
        let result = self.open_results.pop_front().unwrap_or(Ok(()));
        if result.is_ok() {
            self.open = true;
        }
        result
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.record(Call::Close);
        self.close_result?;
        self.open = false;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> nb::Result<usize, Self::Error> {
        self.pause();
        if let Some(e) = self.write_error {
            return Err(nb::Error::Other(e));
        }
        if self.write_would_block > 0 {
            self.write_would_block -= 1;
            return Err(nb::Error::WouldBlock);
        }
        let room = self
            .write_limit
            .map_or(usize::MAX, |limit| limit.saturating_sub(self.written.len()));
        let n = bytes.len().min(self.write_chunk).min(room);
        self.record(Call::Write(bytes[..n].to_vec()));
        self.written.extend_from_slice(&bytes[..n]);
        Ok(n)
    }

    fn read(&mut self, buffer: &mut [u8]) -> nb::Result<usize, Self::Error> {
        self.pause();
        match self.read_script.pop_front() {
            Some(Ok(data)) => {
                let n = data.len().min(buffer.len());
                buffer[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.read_script.push_front(Ok(data[n..].to_vec()));
                }
                self.record(Call::Read(n));
                Ok(n)
            }
            Some(Err(e)) => Err(e),
            None => {
                self.record(Call::Read(0));
                Ok(0)
            }
        }
    }

    fn set_config(&mut self, config: &PortConfig) -> Result<(), Self::Error> {
        self.record(Call::SetConfig(*config));
        self.config = *config;
        Ok(())
    }
}

/// Sink that keeps every line it receives.
#[derive(Default)]
pub(crate) struct RecordingSink {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, line)| line)
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, severity: Severity, message: &str) {
        self.lines.lock().unwrap().push((severity, message.to_string()));
    }
}
