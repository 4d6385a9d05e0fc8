#[derive(Debug, Default)]
pub struct ReceiveBuffer {
    bytes: Vec<u8>,
}

impl ReceiveBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn append(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    pub fn splice(&mut self, start: usize, end: usize) -> Vec<u8> {
        let end = end.min(self.bytes.len());
        let start = start.min(end);
        self.bytes.drain(start..end).collect()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::ReceiveBuffer;

    #[test]
    fn append_then_splice_returns_concatenation() {
        let mut buffer = ReceiveBuffer::new();
        buffer.append(b"hello ");
        buffer.append(b"world");
        let taken = buffer.splice(0, 11);
        assert_eq!(taken, b"hello world");
        assert!(buffer.is_empty());
    }

    #[test]
    fn splice_preserves_surrounding_bytes() {
        let mut buffer = ReceiveBuffer::new();
        buffer.append(b"abcdefgh");
        let taken = buffer.splice(2, 5);
        assert_eq!(taken, b"cde");
        assert_eq!(buffer.as_slice(), b"abfgh");
    }

    #[test]
    fn splice_round_trip_reconstructs_original() {
        let original = b"the quick brown fox";
        let mut buffer = ReceiveBuffer::new();
        buffer.append(original);
        let taken = buffer.splice(4, 9);

        let mut rebuilt = Vec::new();
        rebuilt.extend_from_slice(&original[..4]);
        rebuilt.extend_from_slice(&taken);
        rebuilt.extend_from_slice(&original[9..]);
        assert_eq!(rebuilt, original);
        assert_eq!(buffer.len(), original.len() - taken.len());
    }

    #[test]
    fn splice_clamps_out_of_range_end() {
        let mut buffer = ReceiveBuffer::new();
        buffer.append(b"abc");
        let taken = buffer.splice(1, 100);
        assert_eq!(taken, b"bc");
        assert_eq!(buffer.as_slice(), b"a");
    }

    #[test]
    fn splice_of_empty_range_is_empty() {
        let mut buffer = ReceiveBuffer::new();
        buffer.append(b"abc");
        assert!(buffer.splice(2, 2).is_empty());
        assert_eq!(buffer.len(), 3);
    }
}
