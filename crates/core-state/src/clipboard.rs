//! Process-wide clipboard (spec §3). Single-writer by construction: the
//! editor runs single-threaded (spec §5), so no synchronization is needed.

#[derive(Debug, Default, Clone)]
pub struct Clipboard {
    data: Vec<u8>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    pub fn get(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
