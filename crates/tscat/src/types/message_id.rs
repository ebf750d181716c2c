use const_fnv1a_hash::fnv1a_hash_64;
/// A compact identifier for a message key inside a catalog.
///
/// `MessageId` is a 64-bit FNV-1a hash of `context`, `source` and the
/// disambiguation `comment`, joined by NUL bytes. Two distinct keys may
/// collide; the catalog index compares the real strings on a hit.
///
/// # Example
///
/// ```
/// use tscat::MessageId;
///
/// let plain = MessageId::new("TopBar", "Available", "");
/// let same = MessageId::new("TopBar", "Available", "");
/// let other = MessageId::new("SendWidget", "Available", "");
///
/// assert_eq!(plain, same);
/// assert_ne!(plain, other);
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct MessageId(u64);

impl MessageId {
    /// Hash a `(context, source, comment)` key.
    pub fn new(context: &str, source: &str, comment: &str) -> Self {
        let mut key = Vec::with_capacity(context.len() + source.len() + comment.len() + 2);
        key.extend_from_slice(context.as_bytes());
        key.push(0);
        key.extend_from_slice(source.as_bytes());
        key.push(0);
        key.extend_from_slice(comment.as_bytes());
        Self(fnv1a_hash_64(&key, None))
    }
}
