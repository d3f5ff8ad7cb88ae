//! In-memory stream doubles for unit tests.

use std::{
    collections::VecDeque,
    io::{self, Read, Write},
    sync::Arc,
};

use parking_lot::Mutex;

/// Replays a script of read results, one entry per `read` call.
///
/// A chunk larger than the caller's buffer is split across calls. An
/// exhausted script reads as end of stream.
#[derive(Debug, Default)]
pub(crate) struct ScriptedReader {
    script: VecDeque<io::Result<Vec<u8>>>,
}

impl ScriptedReader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn chunk(mut self, bytes: &[u8]) -> Self {
        self.script.push_back(Ok(bytes.to_vec()));
        self
    }

    pub(crate) fn timeout(mut self) -> Self {
        self.script
            .push_back(Err(io::Error::from(io::ErrorKind::WouldBlock)));
        self
    }

    pub(crate) fn error(mut self, kind: io::ErrorKind) -> Self {
        self.script.push_back(Err(io::Error::from(kind)));
        self
    }
}

impl Read for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.script.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(mut chunk)) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    self.script.push_front(Ok(chunk.split_off(n)));
                }
                Ok(n)
            }
        }
    }
}

/// Shared write sink that accepts one byte per `write` call, so any
/// unsynchronised writers would interleave.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedSink {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedSink {
    pub(crate) fn contents(&self) -> Vec<u8> {
        self.bytes.lock().clone()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match buf.first() {
            Some(&b) => {
                self.bytes.lock().push(b);
                std::thread::yield_now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
