//! The `Buffer` type: owned storage, logical size and growth.

use std::ffi::CStr;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Deref;

use bytes::Bytes;

use super::growth::next_capacity;
use crate::config::{BufferConfig, DEFAULT_GROWTH_UNIT};
use crate::error::BufferError;

const DEFAULT_UNIT: NonZeroUsize = match NonZeroUsize::new(DEFAULT_GROWTH_UNIT) {
    Some(unit) => unit,
    None => panic!("default growth unit must be non-zero"),
};

/// A growable, contiguous byte buffer.
///
/// `Buffer` tracks the number of bytes in use ([`len`](Buffer::len))
/// separately from the number of bytes allocated
/// ([`capacity`](Buffer::capacity)). When an append does not fit, capacity is
/// raised by whole growth units, so a buffer configured with a unit of 64
/// reallocates at most once per 64 appended bytes.
///
/// Every operation that may allocate returns a `Result`. If growth fails the
/// buffer is left exactly as it was before the call.
///
/// A `Buffer` can live wherever the caller puts it (a struct field, the
/// stack) via [`Buffer::new`], or behind its own heap allocation via
/// [`Buffer::boxed`]. Either way, dropping it releases its storage.
///
/// # Example
///
/// ```
/// use growbuf::{Buffer, BufferConfig};
///
/// let mut buf = Buffer::new(BufferConfig::new(4)?)?;
/// buf.append_str("AB")?;
/// assert_eq!((buf.len(), buf.capacity()), (2, 4));
///
/// buf.append_byte(b'C')?;
/// buf.append_byte(b'D')?;
/// buf.append_byte(b'E')?;
/// assert_eq!((buf.len(), buf.capacity()), (5, 8));
/// assert!(buf.eq_str("ABCDE"));
///
/// buf.truncate();
/// assert_eq!((buf.len(), buf.capacity()), (0, 8));
/// # Ok::<(), growbuf::BufferError>(())
/// ```
pub struct Buffer {
    /// Allocated storage. `data.len()` is the capacity; bytes past `size`
    /// are stale.
    data: Vec<u8>,

    /// Logical length.
    size: usize,

    /// Minimum capacity increment.
    unit: NonZeroUsize,
}

impl Buffer {
    /// Creates an empty buffer with the given configuration.
    ///
    /// No storage is allocated until the first append.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if the growth unit is zero.
    pub fn new(config: BufferConfig) -> Result<Self, BufferError> {
        Ok(Self::with_unit(config.checked_unit()?))
    }

    /// Creates an empty buffer growing by `unit` bytes at a time.
    ///
    /// Shorthand for `Buffer::new(BufferConfig::new(unit)?)`.
    pub fn with_growth_unit(unit: usize) -> Result<Self, BufferError> {
        Self::new(BufferConfig::new(unit)?)
    }

    /// Creates an empty buffer in its own heap allocation.
    ///
    /// Dropping the box (or passing it to [`Buffer::free`]) releases both
    /// the storage and the allocation holding the buffer itself.
    pub fn boxed(config: BufferConfig) -> Result<Box<Self>, BufferError> {
        Self::new(config).map(Box::new)
    }

    /// Releases a heap-allocated buffer. `None` is a no-op.
    pub fn free(buffer: Option<Box<Self>>) {
        if let Some(buffer) = buffer {
            log::trace!("buffer: releasing {} bytes", buffer.capacity());
        }
    }

    /// Re-initializes this buffer in place with a new configuration.
    ///
    /// Storage is released and the buffer becomes empty, as if freshly
    /// constructed. This is the only way capacity shrinks.
    pub fn reinit(&mut self, config: BufferConfig) -> Result<(), BufferError> {
        let unit = config.checked_unit()?;
        *self = Self::with_unit(unit);
        Ok(())
    }

    fn with_unit(unit: NonZeroUsize) -> Self {
        Self {
            data: Vec::new(),
            size: 0,
            unit,
        }
    }

    /// Returns the number of bytes in use.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if no bytes are in use.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of bytes allocated.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns how many bytes can be appended without reallocating.
    pub fn spare_capacity(&self) -> usize {
        self.data.len() - self.size
    }

    /// Returns the growth unit.
    pub fn growth_unit(&self) -> usize {
        self.unit.get()
    }

    /// Returns the bytes in use.
    ///
    /// The slice borrows the buffer, so it cannot be held across an append
    /// that might move the storage.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Makes sure at least `target` bytes are allocated.
    ///
    /// If capacity is already sufficient this does nothing. Otherwise capacity
    /// becomes the smallest `capacity + k * growth_unit` that reaches
    /// `target`. Existing content is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Alloc`] if the allocation fails or the new
    /// capacity overflows. Capacity and content are unchanged in that case.
    pub fn ensure_capacity(&mut self, target: usize) -> Result<(), BufferError> {
        let capacity = self.capacity();
        if capacity >= target {
            return Ok(());
        }

        let Some(grown) = next_capacity(capacity, target, self.unit) else {
            log::warn!(
                "buffer: capacity overflow growing {} -> {} bytes (unit {})",
                capacity,
                target,
                self.unit
            );
            return Err(BufferError::Alloc { requested: target });
        };

        if let Err(err) = self.data.try_reserve_exact(grown - capacity) {
            log::warn!("buffer: cannot grow {} -> {} bytes: {}", capacity, grown, err);
            return Err(BufferError::Alloc { requested: grown });
        }
        self.data.resize(grown, 0);

        log::trace!("buffer: grew {} -> {} bytes", capacity, grown);
        Ok(())
    }

    /// Makes sure at least `additional` more bytes fit without reallocating.
    pub fn reserve(&mut self, additional: usize) -> Result<(), BufferError> {
        let target = self.end_after(additional)?;
        self.ensure_capacity(target)
    }

    /// Appends raw bytes.
    ///
    /// Appending an empty slice does nothing and never allocates.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Alloc`] if growth fails; nothing is written.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.is_empty() {
            return Ok(());
        }

        let end = self.end_after(bytes.len())?;
        self.ensure_capacity(end)?;
        self.data[self.size..end].copy_from_slice(bytes);
        self.size = end;
        Ok(())
    }

    /// Appends the content of another buffer.
    pub fn append_buffer(&mut self, other: &Buffer) -> Result<(), BufferError> {
        self.append(other.as_bytes())
    }

    /// Appends a string's bytes.
    pub fn append_str(&mut self, text: &str) -> Result<(), BufferError> {
        self.append(text.as_bytes())
    }

    /// Appends a C string's bytes, without the terminating NUL.
    pub fn append_cstr(&mut self, text: &CStr) -> Result<(), BufferError> {
        self.append(text.to_bytes())
    }

    /// Appends a single byte.
    pub fn append_byte(&mut self, byte: u8) -> Result<(), BufferError> {
        let end = self.end_after(1)?;
        self.ensure_capacity(end)?;
        self.data[self.size] = byte;
        self.size = end;
        Ok(())
    }

    /// Sets the length to zero, keeping the allocated capacity.
    pub fn truncate(&mut self) {
        self.size = 0;
    }

    /// Returns a deep copy of the content, or an error if allocation fails.
    ///
    /// The copy has the same growth unit, and its capacity is exactly
    /// `self.len()`: only the bytes in use are copied and allocated.
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        let mut data = Vec::new();
        if data.try_reserve_exact(self.size).is_err() {
            log::warn!("buffer: cannot allocate {} bytes for clone", self.size);
            return Err(BufferError::Alloc {
                requested: self.size,
            });
        }
        data.extend_from_slice(self.as_bytes());

        Ok(Self {
            data,
            size: self.size,
            unit: self.unit,
        })
    }

    /// Converts the content into [`Bytes`] without copying.
    ///
    /// Only the bytes in use are kept; stale bytes past the logical end are
    /// dropped.
    pub fn freeze(self) -> Bytes {
        Bytes::from(Vec::from(self))
    }

    /// Returns the unused tail of the storage, `[len, capacity)`.
    pub(crate) fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.size..]
    }

    /// Marks `n` bytes of the spare tail as content.
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.spare_capacity());
        self.size += n;
    }

    /// Drops content past `len` after a failed multi-step append.
    pub(crate) fn rewind(&mut self, len: usize) {
        debug_assert!(len <= self.size);
        self.size = len;
    }

    /// `len + additional`, or an allocation error on overflow.
    pub(crate) fn end_after(&self, additional: usize) -> Result<usize, BufferError> {
        self.size
            .checked_add(additional)
            .ok_or(BufferError::Alloc {
                requested: usize::MAX,
            })
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::with_unit(DEFAULT_UNIT)
    }
}

impl Clone for Buffer {
    fn clone(&self) -> Self {
        Self {
            data: self.as_bytes().to_vec(),
            size: self.size,
            unit: self.unit,
        }
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.size)
            .field("capacity", &self.capacity())
            .field("growth_unit", &self.unit)
            .finish()
    }
}

impl From<Buffer> for Bytes {
    fn from(buffer: Buffer) -> Self {
        buffer.freeze()
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buffer: Buffer) -> Self {
        let mut data = buffer.data;
        data.truncate(buffer.size);
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit4() -> Buffer {
        Buffer::with_growth_unit(4).unwrap()
    }

    #[test]
    fn test_new_is_empty() {
        let buf = unit4();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_empty());
        assert!(buf.as_bytes().is_empty());
        assert_eq!(buf.growth_unit(), 4);
    }

    #[test]
    fn test_zero_unit_rejected() {
        assert!(Buffer::with_growth_unit(0).is_err());
        assert!(Buffer::boxed(BufferConfig::default().with_growth_unit(0)).is_err());
    }

    #[test]
    fn test_default_uses_default_unit() {
        let buf = Buffer::default();
        assert_eq!(buf.growth_unit(), DEFAULT_GROWTH_UNIT);
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn test_ensure_capacity_noop_when_sufficient() {
        let mut buf = unit4();
        buf.ensure_capacity(3).unwrap();
        assert_eq!(buf.capacity(), 4);
        buf.ensure_capacity(4).unwrap();
        assert_eq!(buf.capacity(), 4);
        buf.ensure_capacity(0).unwrap();
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn test_ensure_capacity_rounds_to_units() {
        let mut buf = unit4();
        buf.ensure_capacity(9).unwrap();
        assert_eq!(buf.capacity(), 12);
        buf.ensure_capacity(13).unwrap();
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn test_ensure_capacity_preserves_content() {
        let mut buf = unit4();
        buf.append(b"abc").unwrap();
        buf.ensure_capacity(100).unwrap();
        assert_eq!(buf.as_bytes(), b"abc");
    }

    #[test]
    fn test_ensure_capacity_failure_leaves_state() {
        let mut buf = unit4();
        buf.append(b"abc").unwrap();

        let err = buf.ensure_capacity(usize::MAX).unwrap_err();
        assert!(err.is_alloc());
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.as_bytes(), b"abc");
    }

    #[test]
    fn test_allocator_refusal_leaves_state() {
        let mut buf = unit4();
        buf.append(b"abc").unwrap();

        // Rounds up past isize::MAX, which no allocation may exceed.
        let err = buf.ensure_capacity(isize::MAX as usize).unwrap_err();
        assert!(err.is_alloc());
        assert_eq!((buf.len(), buf.capacity()), (3, 4));
        assert_eq!(buf.as_bytes(), b"abc");

        assert!(buf.append(&[0u8; 8]).is_ok());
        assert_eq!(buf.as_bytes(), b"abc\0\0\0\0\0\0\0\0");
    }

    #[test]
    fn test_append_empty_does_not_allocate() {
        let mut buf = unit4();
        buf.append(&[]).unwrap();
        buf.append_str("").unwrap();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn test_append_overflow_is_alloc_error() {
        let mut buf = unit4();
        buf.append(b"x").unwrap();
        assert!(buf.reserve(usize::MAX).unwrap_err().is_alloc());
        assert_eq!(buf.as_bytes(), b"x");
    }

    #[test]
    fn test_append_byte() {
        let mut buf = unit4();
        for b in b"hello" {
            buf.append_byte(*b).unwrap();
        }
        assert_eq!(buf.as_bytes(), b"hello");
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn test_append_cstr() {
        let mut buf = unit4();
        buf.append_cstr(c"hi there").unwrap();
        assert_eq!(buf.as_bytes(), b"hi there");
    }

    #[test]
    fn test_append_buffer() {
        let mut a = unit4();
        let mut b = unit4();
        a.append_str("foo").unwrap();
        b.append_str("bar").unwrap();
        a.append_buffer(&b).unwrap();
        assert_eq!(a.as_bytes(), b"foobar");
        assert_eq!(b.as_bytes(), b"bar");
    }

    #[test]
    fn test_truncate_keeps_capacity() {
        let mut buf = unit4();
        buf.append_str("ABCDE").unwrap();
        buf.truncate();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 8);
        buf.append_str("xy").unwrap();
        assert_eq!(buf.as_bytes(), b"xy");
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn test_clone_capacity_is_size() {
        let mut buf = unit4();
        buf.append_str("ABCDE").unwrap();
        assert_eq!(buf.capacity(), 8);

        let copy = buf.try_clone().unwrap();
        assert_eq!(copy.as_bytes(), b"ABCDE");
        assert_eq!(copy.capacity(), 5);
        assert_eq!(copy.growth_unit(), 4);

        let copy = buf.clone();
        assert_eq!(copy.capacity(), 5);
    }

    #[test]
    fn test_clone_of_empty() {
        let buf = unit4();
        let copy = buf.try_clone().unwrap();
        assert!(copy.is_empty());
        assert_eq!(copy.capacity(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut buf = unit4();
        buf.append_str("abc").unwrap();
        let mut copy = buf.try_clone().unwrap();
        copy.append_str("def").unwrap();
        copy.truncate();
        assert_eq!(buf.as_bytes(), b"abc");
    }

    #[test]
    fn test_boxed_clone_stays_boxed() {
        let mut buf = Buffer::boxed(BufferConfig::new(4).unwrap()).unwrap();
        buf.append_str("abc").unwrap();
        let copy: Box<Buffer> = buf.clone();
        assert_eq!(copy.as_bytes(), b"abc");
        Buffer::free(Some(copy));
        Buffer::free(Some(buf));
        Buffer::free(None);
    }

    #[test]
    fn test_reinit_releases_storage() {
        let mut buf = unit4();
        buf.append_str("ABCDE").unwrap();
        buf.reinit(BufferConfig::new(16).unwrap()).unwrap();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.growth_unit(), 16);
    }

    #[test]
    fn test_reinit_rejects_zero_unit() {
        let mut buf = unit4();
        buf.append_str("abc").unwrap();
        assert!(buf.reinit(BufferConfig::default().with_growth_unit(0)).is_err());
        assert_eq!(buf.as_bytes(), b"abc");
    }

    #[test]
    fn test_freeze_drops_stale_tail() {
        let mut buf = unit4();
        buf.append_str("ABCDE").unwrap();
        buf.truncate();
        buf.append_str("xy").unwrap();
        let bytes = buf.freeze();
        assert_eq!(&bytes[..], b"xy");
    }

    #[test]
    fn test_freeze_reuses_allocation() {
        let mut buf = unit4();
        buf.append_str("ABCDE").unwrap();
        let ptr = buf.as_bytes().as_ptr();
        let bytes = buf.freeze();
        assert_eq!(bytes.as_ptr(), ptr);
        assert_eq!(&bytes[..], b"ABCDE");
    }

    #[test]
    fn test_into_vec() {
        let mut buf = unit4();
        buf.append_str("abc").unwrap();
        let v: Vec<u8> = buf.into();
        assert_eq!(v, b"abc");
    }

    #[test]
    fn test_deref_and_debug() {
        let mut buf = unit4();
        buf.append_str("abc").unwrap();
        assert_eq!(&buf[1..], b"bc");
        assert!(buf.starts_with(b"ab"));

        let s = format!("{:?}", buf);
        assert!(s.contains("len: 3"));
        assert!(s.contains("capacity: 4"));
    }
}
