//! Operation scripts replayed against both the cache and the reference model.

/// Keys are drawn from a small alphabet so scripts hit existing entries often.
pub const KEY_SPACE: u8 = 16;

/// Largest capacity a script will resize to.
pub const MAX_CAPACITY: usize = 12;

/// One cache call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOp {
    Add(u8, u32),
    Get(u8),
    Peek(u8),
    Contains(u8),
    Remove(u8),
    RemoveOldest,
    GetOldest,
    Purge,
    Resize(usize),
}

/// Decode raw bytes (fuzzer input) into an operation script.
///
/// Each op consumes a tag byte plus its operands; a truncated trailing op is
/// dropped. Resize targets may be zero so the rejection path is exercised.
pub fn decode_ops(data: &[u8]) -> Vec<CacheOp> {
    let mut ops = Vec::new();
    let mut bytes = data.iter().copied();

    while let Some(tag) = bytes.next() {
        let op = match tag % 9 {
            0 => match (bytes.next(), bytes.next()) {
                (Some(key), Some(value)) => CacheOp::Add(key % KEY_SPACE, u32::from(value)),
                _ => break,
            },
            1 => match bytes.next() {
                Some(key) => CacheOp::Get(key % KEY_SPACE),
                None => break,
            },
            2 => match bytes.next() {
                Some(key) => CacheOp::Peek(key % KEY_SPACE),
                None => break,
            },
            3 => match bytes.next() {
                Some(key) => CacheOp::Contains(key % KEY_SPACE),
                None => break,
            },
            4 => match bytes.next() {
                Some(key) => CacheOp::Remove(key % KEY_SPACE),
                None => break,
            },
            5 => CacheOp::RemoveOldest,
            6 => CacheOp::GetOldest,
            7 => CacheOp::Purge,
            _ => match bytes.next() {
                Some(capacity) => CacheOp::Resize(usize::from(capacity) % (MAX_CAPACITY + 1)),
                None => break,
            },
        };
        ops.push(op);
    }
    ops
}
