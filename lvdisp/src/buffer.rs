use alloc::{boxed::Box, vec};

/// Pixel storage backing a display, tagged with who owns it.
///
/// Dropping an `Owned` buffer releases its allocation; a `Borrowed` buffer
/// is handed back to the caller untouched.
#[derive(Debug)]
pub enum DisplayBuffer<'a, C> {
    Owned(Box<[C]>),
    Borrowed(&'a mut [C]),
}

impl<'a, C: Copy + Default> DisplayBuffer<'a, C> {
    /// Allocates `len` pixels initialised to `C::default()`.
    pub fn allocate(len: usize) -> Self {
        DisplayBuffer::Owned(vec![C::default(); len].into_boxed_slice())
    }
}

impl<'a, C> DisplayBuffer<'a, C> {
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, DisplayBuffer::Owned(_))
    }

    pub fn as_slice(&self) -> &[C] {
        match self {
            DisplayBuffer::Owned(buf) => buf,
            DisplayBuffer::Borrowed(buf) => buf,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [C] {
        match self {
            DisplayBuffer::Owned(buf) => buf,
            DisplayBuffer::Borrowed(buf) => buf,
        }
    }
}

impl<'a, C> From<&'a mut [C]> for DisplayBuffer<'a, C> {
    fn from(buf: &'a mut [C]) -> Self {
        DisplayBuffer::Borrowed(buf)
    }
}
