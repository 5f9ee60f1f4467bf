// ABOUTME: Frame storage for the validation engines: one frame per open object.
// ABOUTME: The fast engine uses a fixed array, the precise engine a Vec with diagnostics.

use crate::element::Element;
use crate::types::limits;

/// What opened a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FrameKind {
    /// The top-level document.
    #[default]
    Document,
    /// An embedded object or array.
    Nested,
    /// The outer length of a CodeWScope; has no EOO of its own.
    CodeWScope,
    /// The scope object inside a CodeWScope.
    Scope,
}

/// Bookkeeping for one open container.
pub(crate) trait Frame: Copy + Default {
    /// Offset one past the container's EOO byte.
    fn end(&self) -> usize;

    fn open(&mut self, end: usize, kind: FrameKind, element: Option<Element>);

    /// Remember the top-level `_id` element for diagnostics.
    #[inline]
    fn set_id(&mut self, _element: Element) {}

    /// The element that opened this frame, or `_id` for the top frame.
    #[inline]
    fn element(&self) -> Option<Element> {
        None
    }

    #[inline]
    fn kind(&self) -> FrameKind {
        FrameKind::Document
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FastFrame {
    end: usize,
}

impl Frame for FastFrame {
    #[inline]
    fn end(&self) -> usize {
        self.end
    }

    #[inline]
    fn open(&mut self, end: usize, _kind: FrameKind, _element: Option<Element>) {
        self.end = end;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PreciseFrame {
    end: usize,
    kind: FrameKind,
    element: Option<Element>,
}

impl Frame for PreciseFrame {
    #[inline]
    fn end(&self) -> usize {
        self.end
    }

    #[inline]
    fn open(&mut self, end: usize, kind: FrameKind, element: Option<Element>) {
        self.end = end;
        self.kind = kind;
        self.element = element;
    }

    #[inline]
    fn set_id(&mut self, element: Element) {
        self.element = Some(element);
    }

    #[inline]
    fn element(&self) -> Option<Element> {
        self.element
    }

    #[inline]
    fn kind(&self) -> FrameKind {
        self.kind
    }
}

/// Fixed-size storage for all frames of one validation.
pub(crate) trait FrameStack: AsRef<[Self::Frame]> + AsMut<[Self::Frame]> {
    type Frame: Frame;

    /// Whether frames carry diagnostics and CodeWScope is handled.
    const PRECISE: bool;

    /// Allocate the stack for a `document_len`-byte document.
    fn allocate(max_frames: usize, document_len: usize) -> Self;
}

pub(crate) type FastFrames = [FastFrame; limits::FAST_FRAME_CAPACITY];

impl FrameStack for FastFrames {
    type Frame = FastFrame;
    const PRECISE: bool = false;

    #[inline]
    fn allocate(_max_frames: usize, _document_len: usize) -> Self {
        [FastFrame::default(); limits::FAST_FRAME_CAPACITY]
    }
}

pub(crate) type PreciseFrames = Vec<PreciseFrame>;

impl FrameStack for PreciseFrames {
    type Frame = PreciseFrame;
    const PRECISE: bool = true;

    /// Every frame starts at least 6 bytes after its parent (4-byte length,
    /// type byte, name terminator) and spans at least 5 bytes, so a buffer of
    /// `document_len` bytes can never open more than `document_len / 6 + 1`
    /// frames. Capping the allocation there keeps small documents cheap while
    /// never reporting an overflow below `max_frames`.
    fn allocate(max_frames: usize, document_len: usize) -> Self {
        let reachable = document_len / 6 + 2;
        vec![PreciseFrame::default(); max_frames.min(reachable)]
    }
}
